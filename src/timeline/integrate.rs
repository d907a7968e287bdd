//! The warp range integrator: elapsed real time across an explicit beat
//! range under a variable tempo curve.

use crate::{
    chart::Millis,
    timeline::tempo::{TempoCurve, beat_length_ms},
};

/// The fixed integration step, in beats. Small enough that a tempo change
/// inside a warped range lands within a sixteenth of where it belongs.
pub const WARP_FUSE: f64 = 1.0 / 16.0;

/// Integrates elapsed real time across the beat range `[start, end)` by
/// stepping `fuse` beats at a time and summing the instantaneous beat length.
///
/// Fixed-step integration is deliberate: the tempo may change anywhere inside
/// the range, so there is no closed form over the whole span. The final step
/// may overhang `end`; the resulting overshoot is bounded by the step size and
/// accepted. Callers wanting a tighter bound pass a smaller `fuse`.
#[must_use]
pub fn range_duration(curve: &TempoCurve, start: f64, end: f64, fuse: f64) -> Millis {
    let mut length = 0.0;
    let mut beat = start;
    while beat < end {
        length += beat_length_ms(curve.bpm_at(beat)) * fuse;
        beat += fuse;
    }
    Millis(length)
}
