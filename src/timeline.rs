//! The timing compiler pipeline: from a chart's directives and note grid to
//! one deterministically ordered event timeline.
//!
//! The stages run in a fixed order, each pure:
//!
//! 1. [`timing`]: fold the merged timing directives into timestamped timing
//!    events, synthesizing warps from tempo spikes and mid-warp stops
//!    ([`integrate`] supplies explicit warp durations).
//! 2. [`notes`]: decode the note grid on its own elapsed-time cursor against
//!    the compiled timing stream.
//! 3. [`assemble`]: merge and sort both streams, resolve scroll suspensions
//!    ([`scroll`]), apply the global offset and round.

pub mod assemble;
pub mod event;
pub mod integrate;
pub mod notes;
pub mod scroll;
pub mod tempo;
pub mod timing;

pub use event::{ColumnMask, Event, EventKind, NoteKind};
pub use integrate::{WARP_FUSE, range_duration};
pub use tempo::{FAST_BPM_WARP, TempoCurve, beat_length_ms};

use crate::{
    Result,
    chart::{Header, NoteGrid},
};

/// Compiles one chart into its playback timeline.
///
/// Pure and deterministic: the same `(header, grid)` always yields the same
/// event sequence, and concurrent calls over different charts need no
/// coordination. The inputs are only read.
///
/// # Errors
///
/// Returns [`crate::ChartError::InvalidTimingSegment`] when a timing directive
/// carries a negative value. [`crate::ChartError::UnknownSegmentKind`] is
/// reserved for unrecognized directive tags; with this crate's closed
/// [`crate::chart::SegmentKind`] it can only arise at the text front-end.
pub fn compile(header: &Header, grid: &NoteGrid) -> Result<Vec<Event>> {
    let curve = TempoCurve::from_header(header);
    let timing = timing::compile_timing(header, &curve)?;
    let notes = notes::decode_notes(grid, &timing);
    Ok(assemble::assemble(timing, notes, header.offset_ms))
}
