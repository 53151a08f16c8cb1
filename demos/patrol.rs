use anyhow::Result;
use clap::Parser;
use nalgebra::{Point3, Vector3};
use rand::prelude::*;
use waypoint_autopilot::{
    body::{PointMassBody, RigidBody},
    feedback::NullFeedback,
    physics::VehiclePhysics,
    route::Route,
    VehicleControllerInit,
};

#[derive(Parser)]
struct Opts {
    /// Number of fixed simulation ticks to run.
    #[clap(long, default_value = "3000")]
    pub ticks: u32,
    /// Fixed tick duration in seconds.
    #[clap(long, default_value = "0.02")]
    pub dt: f64,
    /// Random offset applied to each waypoint of the patrol square.
    #[clap(long, default_value = "10.0")]
    pub jitter: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let Opts { ticks, dt, jitter } = Opts::parse();

    // Lay out a jittered patrol square.
    let mut rng = rand::thread_rng();
    let mut offset = |point: Point3<f64>| {
        point + Vector3::new(rng.gen_range(-jitter..=jitter), 0.0, rng.gen_range(-jitter..=jitter))
    };
    let route = Route::new(vec![
        offset(Point3::new(0.0, 0.0, 150.0)),
        offset(Point3::new(150.0, 0.0, 150.0)),
        offset(Point3::new(150.0, 0.0, 0.0)),
        offset(Point3::new(0.0, 0.0, 0.0)),
    ])?;

    let mut controller = VehicleControllerInit::new(VehiclePhysics::default(), route).build();
    let mut body = PointMassBody::new(1200.0);
    controller
        .autopilot_mut()
        .target_nearest(body.position());

    for tick in 0..ticks {
        controller.step(dt, &mut body, &mut NullFeedback);
        body.integrate(dt);

        if tick % 100 == 0 {
            let position = body.position();
            println!(
                "t={:7.2}s waypoint={} pos=({:7.1}, {:7.1}) speed={:5.1}",
                tick as f64 * dt,
                controller.autopilot().current_index(),
                position.x,
                position.z,
                body.velocity().norm(),
            );
        }
    }

    Ok(())
}
