/// Per-vehicle dynamics tunables, supplied once at setup time.
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePhysics {
    /// Forward speed (units/s) above which no longitudinal force is applied.
    pub max_speed: f64,
    /// Engine strength. Multiplied by `ENGINE_FORCE_SCALE`, throttle and the
    /// tick duration to form the propulsive force.
    pub acceleration_factor: f64,
    /// Heading change rate (degrees/s) at full steer.
    pub turn_speed: f64,
    /// Per-tick multiplier on lateral velocity, in (0, 1). Lower values grip
    /// harder; values near 1 let the vehicle slide.
    pub drift_factor: f64,
}

impl Default for VehiclePhysics {
    fn default() -> Self {
        Self {
            max_speed: 30.0,
            acceleration_factor: 8.0,
            turn_speed: 120.0,
            drift_factor: 0.93,
        }
    }
}
