/// Heading error (degrees) at which the steering command saturates at ±1.
pub const STEER_SATURATION_DEGREES: f64 = 45.0;

/// Steering magnitude above which the autopilot brakes into the turn.
pub const BRAKE_STEER_THRESHOLD: f64 = 0.6;

/// Throttle issued while driving. There is no speed matching; the hard
/// speed cap in the dynamics bounds the result.
pub const FULL_THROTTLE: f64 = 1.0;

/// Longitudinal brake factor. Negative so that braking opposes the forward
/// axis; while not braking the same magnitude is applied with the opposite
/// sign, yielding a small extra thrust.
pub const BRAKE_FORCE_FACTOR: f64 = -0.6;

/// Scale applied to `VehiclePhysics::acceleration_factor` when computing
/// the engine force, keeping the configured factor in a human-sized range.
pub const ENGINE_FORCE_SCALE: f64 = 1.0e5;

/// Squared speed below which steering accumulates no heading change.
pub const MIN_STEERING_SPEED_SQ: f64 = 0.1;

/// Lateral speed above which the skid emitters fire and the drift
/// correction force engages.
pub const SKID_LATERAL_THRESHOLD: f64 = 1.0;

/// Cosmetic front-wheel deflection (degrees) at full steer.
pub const WHEEL_VISUAL_RANGE_DEGREES: f64 = 58.0;

/// Distance at which the current waypoint counts as reached.
pub const DEFAULT_CAPTURE_RADIUS: f64 = 14.0;
