use crate::{
    autopilot::WaypointAutopilot,
    body::RigidBody,
    constants::DEFAULT_CAPTURE_RADIUS,
    dynamics::VehicleDynamics,
    feedback::VisualFeedback,
    physics::VehiclePhysics,
    route::Route,
};

/// Setup-time description of a vehicle, built once before simulation starts.
#[derive(Debug, Clone)]
pub struct VehicleControllerInit {
    pub physics: VehiclePhysics,
    pub route: Route,
    pub capture_radius: f64,
}

impl VehicleControllerInit {
    pub fn new(physics: VehiclePhysics, route: Route) -> Self {
        Self {
            physics,
            route,
            capture_radius: DEFAULT_CAPTURE_RADIUS,
        }
    }

    pub fn build(self) -> VehicleController {
        let Self {
            physics,
            route,
            capture_radius,
        } = self;

        VehicleController {
            autopilot: WaypointAutopilot::new(route, capture_radius),
            dynamics: VehicleDynamics::new(physics),
        }
    }
}

/// One vehicle's control core: the waypoint autopilot feeding the dynamics.
///
/// Evaluated once per fixed simulation tick by the host scheduler. Vehicles
/// are independent; each controller touches only its own body.
#[derive(Debug)]
pub struct VehicleController {
    autopilot: WaypointAutopilot,
    dynamics: VehicleDynamics,
}

impl VehicleController {
    pub fn autopilot(&self) -> &WaypointAutopilot {
        &self.autopilot
    }

    pub fn autopilot_mut(&mut self) -> &mut WaypointAutopilot {
        &mut self.autopilot
    }

    pub fn dynamics(&self) -> &VehicleDynamics {
        &self.dynamics
    }

    pub fn is_driving(&self) -> bool {
        self.autopilot.is_driving()
    }

    /// Replace the waypoint route while driving; current progress is
    /// reconciled against the new length.
    pub fn set_route(&mut self, route: Route) {
        self.autopilot.set_route(route);
    }

    /// Resume driving and restart the engine. Idempotent.
    pub fn start_drive<B: RigidBody>(&mut self, body: &mut B) {
        self.autopilot.set_driving(true);
        self.dynamics.start_engine(body);
    }

    /// Stop issuing commands and freeze the engine, preserving momentum for
    /// the next `start_drive`. Idempotent.
    pub fn stop_drive<B: RigidBody>(&mut self, body: &mut B) {
        self.autopilot.set_driving(false);
        self.dynamics.stop_engine(body);
    }

    /// Advance one tick: plan from the current pose, latch the command, and
    /// apply the dynamics. While not driving the engine is stopped and the
    /// tick is a no-op.
    pub fn step<B: RigidBody, F: VisualFeedback>(
        &mut self,
        time_delta_sec: f64,
        body: &mut B,
        feedback: &mut F,
    ) {
        assert!(time_delta_sec > 0.0);

        if let Some(command) = self.autopilot.plan(body) {
            self.dynamics.set_drive(command);
        }
        self.dynamics.step(time_delta_sec, body, feedback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{body::PointMassBody, feedback::NullFeedback};
    use nalgebra::{Point3, Vector3};

    const DT: f64 = 0.02;

    fn straight_route() -> Route {
        Route::new(vec![Point3::new(0.0, 0.0, 200.0)]).unwrap()
    }

    fn controller() -> VehicleController {
        VehicleControllerInit::new(VehiclePhysics::default(), straight_route()).build()
    }

    #[test]
    fn drives_forward_toward_a_waypoint_dead_ahead() {
        let mut controller = controller();
        let mut body = PointMassBody::new(1200.0);

        for _ in 0..50 {
            controller.step(DT, &mut body, &mut NullFeedback);
            body.integrate(DT);
        }

        assert!(body.velocity().z > 0.0);
        assert!(body.position().z > 0.0);
        assert!(body.position().x.abs() < 1e-6);
    }

    #[test]
    fn stop_drive_freezes_and_start_drive_resumes_with_momentum() {
        let mut controller = controller();
        let mut body = PointMassBody::new(1200.0);

        for _ in 0..50 {
            controller.step(DT, &mut body, &mut NullFeedback);
            body.integrate(DT);
        }
        let cruising = body.velocity();
        assert!(cruising.norm() > 0.0);

        controller.stop_drive(&mut body);
        assert!(!controller.is_driving());
        let parked = body.position();
        for _ in 0..10 {
            controller.step(DT, &mut body, &mut NullFeedback);
            body.integrate(DT);
        }
        assert_eq!(body.position(), parked);

        // Second stop must not clobber the captured velocity.
        controller.stop_drive(&mut body);

        controller.start_drive(&mut body);
        assert!(controller.is_driving());
        assert_eq!(body.velocity(), cruising);
    }

    #[test]
    fn not_driving_means_no_commands_and_no_motion() {
        let mut controller = controller();
        let mut body = PointMassBody::new(1200.0);
        body.set_velocity(Vector3::new(0.0, 0.0, 5.0));

        controller.stop_drive(&mut body);
        controller.step(DT, &mut body, &mut NullFeedback);
        body.integrate(DT);

        assert!(body.velocity().norm() < 1e-12);
    }
}
