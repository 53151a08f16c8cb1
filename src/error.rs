/// Errors surfaced by the autopilot crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("waypoint route must contain at least one point")]
    InvalidRoute,
}
