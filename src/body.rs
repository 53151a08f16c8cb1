use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Capability interface over the host's rigid body. The host refreshes the
/// pose before the controller runs and integrates forces afterwards; the
/// controller only ever touches its own vehicle's body within its tick.
pub trait RigidBody {
    fn position(&self) -> Point3<f64>;
    /// Unit vector along the vehicle's nose.
    fn forward(&self) -> Vector3<f64>;
    /// Unit vector out the right side of the vehicle.
    fn right(&self) -> Vector3<f64>;
    /// Unit vector out the roof of the vehicle.
    fn up(&self) -> Vector3<f64>;

    fn velocity(&self) -> Vector3<f64>;
    fn set_velocity(&mut self, velocity: Vector3<f64>);
    /// Queue a continuous force for this tick; the host's integrator scales
    /// it by the tick duration and the body's mass.
    fn add_force(&mut self, force: Vector3<f64>);
    /// Overwrite the body's orientation.
    fn set_rotation(&mut self, rotation: UnitQuaternion<f64>);
}

/// Minimal rigid body with explicit Euler integration. Stands in for a real
/// physics engine in the demo and the tests.
#[derive(Debug, Clone)]
pub struct PointMassBody {
    position: Point3<f64>,
    rotation: UnitQuaternion<f64>,
    velocity: Vector3<f64>,
    mass: f64,
    pending_force: Vector3<f64>,
}

impl PointMassBody {
    pub fn new(mass: f64) -> Self {
        Self::with_pose(mass, Point3::origin(), UnitQuaternion::identity())
    }

    pub fn with_pose(mass: f64, position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            rotation,
            velocity: Vector3::zeros(),
            mass,
            pending_force: Vector3::zeros(),
        }
    }

    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.rotation
    }

    /// Advance the body by one tick, consuming the queued forces.
    pub fn integrate(&mut self, time_delta_sec: f64) {
        self.velocity += self.pending_force / self.mass * time_delta_sec;
        self.position += self.velocity * time_delta_sec;
        self.pending_force = Vector3::zeros();
    }
}

impl RigidBody for PointMassBody {
    fn position(&self) -> Point3<f64> {
        self.position
    }

    fn forward(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    fn right(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    fn up(&self) -> Vector3<f64> {
        self.rotation * Vector3::y()
    }

    fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vector3<f64>) {
        self.velocity = velocity;
    }

    fn add_force(&mut self, force: Vector3<f64>) {
        self.pending_force += force;
    }

    fn set_rotation(&mut self, rotation: UnitQuaternion<f64>) {
        self.rotation = rotation;
    }
}
