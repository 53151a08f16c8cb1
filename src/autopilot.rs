use crate::{
    body::RigidBody,
    constants::{BRAKE_STEER_THRESHOLD, FULL_THROTTLE, STEER_SATURATION_DEGREES},
    dynamics::DriveCommand,
    route::Route,
};
use nalgebra::{Point3, Vector3};
use tracing::warn;

/// Steers a vehicle along a circular waypoint route.
///
/// Once per tick, while driving, `plan` reads the body's pose, produces a
/// [`DriveCommand`] and advances the waypoint index when the current target
/// comes within the capture radius.
#[derive(Debug)]
pub struct WaypointAutopilot {
    route: Route,
    current_index: usize,
    capture_radius: f64,
    is_driving: bool,
}

impl WaypointAutopilot {
    pub fn new(route: Route, capture_radius: f64) -> Self {
        Self {
            route,
            current_index: 0,
            capture_radius,
            is_driving: true,
        }
    }

    pub fn is_driving(&self) -> bool {
        self.is_driving
    }

    pub fn set_driving(&mut self, is_driving: bool) {
        self.is_driving = is_driving;
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Replace the route atomically. If the new route is shorter than the
    /// current progress, the index is clamped to the new last waypoint.
    pub fn set_route(&mut self, route: Route) {
        let last = route.waypoint_count() - 1;
        if self.current_index > last {
            warn!(
                index = self.current_index,
                clamped_to = last,
                "waypoint index out of range for new route, clamping"
            );
            self.current_index = last;
        }
        self.route = route;
    }

    /// Aim at the waypoint closest to `position` instead of waypoint 0.
    pub fn target_nearest(&mut self, position: Point3<f64>) {
        self.current_index = self.route.nearest_index(position);
    }

    /// Compute this tick's drive command and advance the waypoint index if
    /// the target was captured. Returns `None` while not driving.
    pub fn plan<B: RigidBody>(&mut self, body: &B) -> Option<DriveCommand> {
        if !self.is_driving {
            return None;
        }

        let target = self.route.waypoint(self.current_index);
        let to_target = target - body.position();
        let steer = if to_target.norm_squared() > f64::EPSILON {
            let direction = to_target.normalize();
            let angle = signed_angle_degrees(&body.forward(), &direction, &body.up());
            (angle / STEER_SATURATION_DEGREES).clamp(-1.0, 1.0)
        } else {
            // Sitting exactly on the waypoint; capture below will advance it.
            0.0
        };

        let command = DriveCommand {
            steer,
            throttle: FULL_THROTTLE,
            is_braking: steer.abs() > BRAKE_STEER_THRESHOLD,
        };

        if to_target.norm() < self.capture_radius {
            self.current_index = self.route.next_index(self.current_index);
        }

        Some(command)
    }
}

/// Signed angle in degrees from `from` to `to`, measured around `axis`.
/// Positive means `to` lies clockwise of `from` when looking down `axis`,
/// i.e. toward the vehicle's right when `axis` is the up vector.
fn signed_angle_degrees(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    from.cross(to).dot(axis).atan2(from.dot(to)).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::PointMassBody;
    use nalgebra::{Point3, UnitQuaternion};

    fn body_at(position: Point3<f64>) -> PointMassBody {
        PointMassBody::with_pose(1000.0, position, UnitQuaternion::identity())
    }

    fn single_waypoint(point: Point3<f64>, capture_radius: f64) -> WaypointAutopilot {
        WaypointAutopilot::new(Route::new(vec![point]).unwrap(), capture_radius)
    }

    #[test]
    fn signed_angle_convention() {
        let forward = Vector3::z();
        let up = Vector3::y();
        assert!(signed_angle_degrees(&forward, &Vector3::z(), &up).abs() < 1e-9);
        assert!((signed_angle_degrees(&forward, &Vector3::x(), &up) - 90.0).abs() < 1e-9);
        assert!((signed_angle_degrees(&forward, &-Vector3::x(), &up) + 90.0).abs() < 1e-9);
        assert!((signed_angle_degrees(&forward, &-Vector3::z(), &up).abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn steer_is_monotonic_and_saturates_at_45_degrees() {
        let mut previous = -2.0;
        for heading in (-90i32..=90).step_by(5) {
            let direction = Vector3::new(
                (heading as f64).to_radians().sin(),
                0.0,
                (heading as f64).to_radians().cos(),
            );
            let mut autopilot = single_waypoint(Point3::origin() + direction * 100.0, 1.0);
            let command = autopilot.plan(&body_at(Point3::origin())).unwrap();
            assert!(command.steer >= previous);
            previous = command.steer;
            if heading.abs() >= 45 {
                assert!((command.steer.abs() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn target_straight_ahead_gives_neutral_steer_and_no_brake() {
        let mut autopilot = single_waypoint(Point3::new(0.0, 0.0, 50.0), 20.0);
        let command = autopilot.plan(&body_at(Point3::origin())).unwrap();
        assert!(command.steer.abs() < 1e-9);
        assert!(!command.is_braking);
        assert!((command.throttle - 1.0).abs() < 1e-12);
        // 50 units out, capture radius 20: no advancement yet.
        assert_eq!(autopilot.current_index(), 0);

        // Re-plan from within the capture radius: the index wraps (single
        // waypoint, so back to 0) only now.
        let command = autopilot.plan(&body_at(Point3::new(0.0, 0.0, 35.0))).unwrap();
        assert!(command.steer.abs() < 1e-9);
        assert_eq!(autopilot.current_index(), 0);
    }

    #[test]
    fn target_directly_right_saturates_steer_and_brakes() {
        let mut autopilot = single_waypoint(Point3::new(50.0, 0.0, 0.0), 20.0);
        let command = autopilot.plan(&body_at(Point3::origin())).unwrap();
        assert!((command.steer - 1.0).abs() < 1e-9);
        assert!(command.is_braking);
    }

    #[test]
    fn waypoint_advances_within_capture_radius_and_wraps() {
        let route = Route::new(vec![
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(0.0, 0.0, 20.0),
            Point3::new(0.0, 0.0, 30.0),
        ])
        .unwrap();
        let mut autopilot = WaypointAutopilot::new(route, 5.0);

        for expected_next in [1, 2, 0] {
            let target = autopilot.route().waypoint(autopilot.current_index());
            autopilot.plan(&body_at(target + Vector3::new(0.0, 0.0, -2.0))).unwrap();
            assert_eq!(autopilot.current_index(), expected_next);
        }
    }

    #[test]
    fn plan_yields_nothing_while_not_driving() {
        let mut autopilot = single_waypoint(Point3::new(0.0, 0.0, 50.0), 20.0);
        autopilot.set_driving(false);
        assert!(autopilot.plan(&body_at(Point3::origin())).is_none());
    }

    #[test]
    fn shrinking_route_clamps_the_index() {
        let route = Route::new(vec![
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(0.0, 0.0, 20.0),
            Point3::new(0.0, 0.0, 30.0),
        ])
        .unwrap();
        let mut autopilot = WaypointAutopilot::new(route, 5.0);
        autopilot.plan(&body_at(Point3::new(0.0, 0.0, 8.0))).unwrap();
        autopilot.plan(&body_at(Point3::new(0.0, 0.0, 18.0))).unwrap();
        assert_eq!(autopilot.current_index(), 2);

        let shorter = Route::new(vec![Point3::new(0.0, 0.0, 40.0)]).unwrap();
        autopilot.set_route(shorter);
        assert_eq!(autopilot.current_index(), 0);
    }

    #[test]
    fn target_nearest_repoints_progress() {
        let route = Route::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(50.0, 0.0, 0.0),
            Point3::new(50.0, 0.0, 50.0),
        ])
        .unwrap();
        let mut autopilot = WaypointAutopilot::new(route, 5.0);
        autopilot.target_nearest(Point3::new(48.0, 0.0, 44.0));
        assert_eq!(autopilot.current_index(), 2);
    }
}
