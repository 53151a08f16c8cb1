pub mod autopilot;
pub mod body;
pub mod constants;
pub mod dynamics;
pub mod error;
pub mod feedback;
pub mod physics;
pub mod route;
pub mod vehicle;

pub use error::Error;
pub use vehicle::{VehicleController, VehicleControllerInit};
