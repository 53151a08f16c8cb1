use crate::error::Error;
use nalgebra::Point3;
use noisy_float::types::r64;

/// Ordered, circular sequence of target points. Never empty: construction
/// rejects the empty list, so every index in `[0, waypoint_count)` is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<Point3<f64>>,
}

impl Route {
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self, Error> {
        if points.is_empty() {
            return Err(Error::InvalidRoute);
        }
        Ok(Self { points })
    }

    pub fn waypoint_count(&self) -> usize {
        self.points.len()
    }

    pub fn waypoint(&self, index: usize) -> Point3<f64> {
        self.points[index]
    }

    /// Successor of `index`, wrapping from the last waypoint back to 0.
    pub fn next_index(&self, index: usize) -> usize {
        if index == self.points.len() - 1 {
            0
        } else {
            index + 1
        }
    }

    /// Index of the waypoint closest to `position`. Useful for starting a
    /// lap from wherever the vehicle was placed.
    pub fn nearest_index(&self, position: Point3<f64>) -> usize {
        self.points
            .iter()
            .enumerate()
            .min_by_key(|(_, point)| r64(nalgebra::distance(point, &position)))
            .map(|(index, _)| index)
            .unwrap_or(0)
    }
}
