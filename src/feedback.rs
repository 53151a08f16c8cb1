/// Fire-and-forget sink for the vehicle's visual side effects. Hosts fan
/// these out to their skid trails, smoke emitters and wheel transforms;
/// failures are ignored by contract.
pub trait VisualFeedback {
    /// Enable or disable the skid trail emitters.
    fn set_skid_emitting(&mut self, emitting: bool);
    /// Emit `count` smoke particles from each smoke source.
    fn emit_smoke(&mut self, count: u32);
    /// Cosmetic front-wheel deflection in degrees, bounded by the steering
    /// clamp to ±`WHEEL_VISUAL_RANGE_DEGREES`.
    fn set_wheel_rotation(&mut self, degrees: f64);
}

/// Feedback sink that discards everything, for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl VisualFeedback for NullFeedback {
    fn set_skid_emitting(&mut self, _emitting: bool) {}
    fn emit_smoke(&mut self, _count: u32) {}
    fn set_wheel_rotation(&mut self, _degrees: f64) {}
}
