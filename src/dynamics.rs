use crate::{
    body::RigidBody,
    constants::{
        BRAKE_FORCE_FACTOR, ENGINE_FORCE_SCALE, MIN_STEERING_SPEED_SQ, SKID_LATERAL_THRESHOLD,
        WHEEL_VISUAL_RANGE_DEGREES,
    },
    feedback::VisualFeedback,
    physics::VehiclePhysics,
};
use nalgebra::{UnitQuaternion, Vector3};
use tracing::debug;

/// One tick's worth of driver input. Recomputed every tick by the autopilot;
/// `steer` is pre-clamped to [-1, 1] by the producer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCommand {
    pub steer: f64,
    pub throttle: f64,
    pub is_braking: bool,
}

impl Default for DriveCommand {
    fn default() -> Self {
        Self {
            steer: 0.0,
            throttle: 0.0,
            is_braking: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Running,
    Stopped,
}

/// Converts drive commands into forces, velocity corrections and rotation on
/// the host rigid body, once per tick while the engine is running.
///
/// Owns the heading accumulator (the applied rotation is a pure function of
/// it) and the Running/Stopped state machine, which captures the body's
/// velocity on stop and restores it on start.
#[derive(Debug)]
pub struct VehicleDynamics {
    physics: VehiclePhysics,
    command: DriveCommand,
    heading_degrees: f64,
    engine: EngineState,
    saved_velocity: Vector3<f64>,
}

impl VehicleDynamics {
    pub fn new(physics: VehiclePhysics) -> Self {
        Self {
            physics,
            command: DriveCommand::default(),
            heading_degrees: 0.0,
            engine: EngineState::Running,
            saved_velocity: Vector3::zeros(),
        }
    }

    /// Latch the next tick's input. No validation; the caller guarantees
    /// `steer` is already clamped.
    pub fn set_drive(&mut self, command: DriveCommand) {
        self.command = command;
    }

    pub fn is_stopped(&self) -> bool {
        self.engine == EngineState::Stopped
    }

    /// Accumulated heading in degrees around world up.
    pub fn heading_degrees(&self) -> f64 {
        self.heading_degrees
    }

    /// Freeze the vehicle: capture its velocity, zero the body, and suspend
    /// all per-tick effects. Calling this while already stopped changes
    /// nothing; the first capture is kept.
    pub fn stop_engine<B: RigidBody>(&mut self, body: &mut B) {
        if self.engine == EngineState::Stopped {
            return;
        }
        self.saved_velocity = body.velocity();
        body.set_velocity(Vector3::zeros());
        self.engine = EngineState::Stopped;
        debug!(speed = self.saved_velocity.norm(), "engine stopped");
    }

    /// Resume from a stop, restoring the captured velocity. A no-op while
    /// already running, so a fresh vehicle's first start never rewrites the
    /// body's live velocity.
    pub fn start_engine<B: RigidBody>(&mut self, body: &mut B) {
        if self.engine == EngineState::Running {
            return;
        }
        body.set_velocity(self.saved_velocity);
        self.engine = EngineState::Running;
        debug!(speed = self.saved_velocity.norm(), "engine started");
    }

    /// Apply one tick of vehicle dynamics. While stopped this does nothing:
    /// no forces, no damping, no rotation, no skid signaling.
    pub fn step<B: RigidBody, F: VisualFeedback>(
        &mut self,
        time_delta_sec: f64,
        body: &mut B,
        feedback: &mut F,
    ) {
        assert!(time_delta_sec > 0.0);

        if self.engine == EngineState::Stopped {
            return;
        }

        self.apply_engine_force(time_delta_sec, body);
        self.damp_lateral_velocity(body);
        self.apply_steering(time_delta_sec, body, feedback);
        self.apply_drift(time_delta_sec, body, feedback);
    }

    /// Propulsion and longitudinal brake term. Above `max_speed` the whole
    /// longitudinal model is skipped for the tick, hard cap, including the
    /// small forward thrust the not-braking state produces.
    fn apply_engine_force<B: RigidBody>(&self, time_delta_sec: f64, body: &mut B) {
        let forward = body.forward();
        let forward_speed = body.velocity().dot(&forward);
        if forward_speed > self.physics.max_speed {
            return;
        }

        let engine_force = forward
            * (self.physics.acceleration_factor
                * ENGINE_FORCE_SCALE
                * self.command.throttle
                * time_delta_sec);
        let brake_scale = if self.command.is_braking {
            BRAKE_FORCE_FACTOR
        } else {
            -BRAKE_FORCE_FACTOR
        };
        body.add_force(engine_force);
        body.add_force(forward * brake_scale);
    }

    /// Bleed off sideways slide: recompose velocity from the forward
    /// component plus the lateral component scaled by the drift factor.
    /// Any vertical component is dropped in the recomposition.
    fn damp_lateral_velocity<B: RigidBody>(&self, body: &mut B) {
        let velocity = body.velocity();
        let forward = body.forward();
        let right = body.right();
        let forward_velocity = forward * velocity.dot(&forward);
        let lateral_velocity = right * velocity.dot(&right);
        body.set_velocity(forward_velocity + lateral_velocity * self.physics.drift_factor);
    }

    fn apply_steering<B: RigidBody, F: VisualFeedback>(
        &mut self,
        time_delta_sec: f64,
        body: &mut B,
        feedback: &mut F,
    ) {
        // Steering has no effect while nearly stationary.
        if body.velocity().norm_squared() >= MIN_STEERING_SPEED_SQ {
            self.heading_degrees += self.command.steer * self.physics.turn_speed * time_delta_sec;
        }

        let rotation =
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.heading_degrees.to_radians());
        body.set_rotation(rotation);
        feedback.set_wheel_rotation(WHEEL_VISUAL_RANGE_DEGREES * self.command.steer);
    }

    fn apply_drift<B: RigidBody, F: VisualFeedback>(
        &self,
        time_delta_sec: f64,
        body: &mut B,
        feedback: &mut F,
    ) {
        if self.command.steer == 0.0 {
            feedback.set_skid_emitting(false);
            return;
        }

        let right = body.right();
        let lateral_speed = right.dot(&body.velocity());
        if lateral_speed.abs() > SKID_LATERAL_THRESHOLD {
            feedback.set_skid_emitting(true);
            feedback.emit_smoke(1);
            body.add_force(-right * (lateral_speed * self.physics.drift_factor * time_delta_sec));
        } else {
            feedback.set_skid_emitting(false);
        }
    }
}
