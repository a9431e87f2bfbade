/// Receives fractional progress (0.0 to 1.0) during a decode or encode.
///
/// Any `Fn(f32)` closure is a `Progress`. When no sink is attached, nothing
/// is reported.
pub trait Progress {
    fn report(&self, fraction: f32);
}

impl<F: Fn(f32)> Progress for F {
    fn report(&self, fraction: f32) {
        self(fraction)
    }
}

/// Rows between two progress reports.
pub(crate) const REPORT_INTERVAL: usize = 20;
