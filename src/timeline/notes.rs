//! The note grid decoder: turns measures of note symbols into timestamped
//! note events.
//!
//! The decoder runs on its own forward time cursor, indexed by raw elapsed
//! time rather than beats: each line advances the cursor by its share of a
//! whole note at the tempo in effect at the cursor, looked up against the
//! already-compiled `SetTempo` events. This is a coarser axis than the
//! beat-indexed timing walk on purpose; see the crate docs.

use crate::{
    chart::{Millis, NoteGrid, NoteSymbol},
    timeline::{
        event::{ColumnMask, EventKind, NoteKind, RawEvent},
        tempo::beat_length_ms,
    },
};

/// One measure spans one whole note, four beats.
const BEATS_PER_MEASURE: f64 = 4.0;

impl NoteSymbol {
    /// The note event subtype a symbol decodes to, if any. Unsupported
    /// symbols decode to nothing and are dropped without complaint.
    #[must_use]
    pub const fn note_kind(self) -> Option<NoteKind> {
        match self {
            Self::Tap => Some(NoteKind::Note),
            Self::HoldHead => Some(NoteKind::HoldHead),
            Self::HoldTail => Some(NoteKind::HoldTail),
            Self::Mine => Some(NoteKind::Mine),
            Self::Fake => Some(NoteKind::Fake),
            Self::Lift => Some(NoteKind::Lift),
            Self::Empty | Self::Other(_) => None,
        }
    }
}

/// Cumulative stop compensation along the note cursor.
///
/// Stop events live on the compiled timeline, which already includes every
/// earlier stop; the cursor does not. This maps a raw cursor time to the
/// shift it owes: the summed length of all stops that started strictly before
/// it. A note exactly at a stop's start plays before the pause and is not
/// shifted.
#[derive(Debug, Clone, Default)]
struct StopShift {
    /// `(raw start, length)` per stop, ascending by raw start.
    stops: Vec<(f64, f64)>,
}

impl StopShift {
    fn from_timing(timing: &[RawEvent]) -> Self {
        let mut stops = Vec::new();
        let mut accumulated = 0.0;
        for event in timing {
            if let EventKind::Stop { length } = event.kind {
                stops.push((event.timestamp.value() - accumulated, length.value()));
                accumulated += length.value();
            }
        }
        Self { stops }
    }

    fn shift_at(&self, raw: f64) -> f64 {
        self.stops
            .iter()
            .take_while(|&&(start, _)| start < raw)
            .map(|&(_, length)| length)
            .sum()
    }
}

/// The tempo in effect at `timestamp`, looked up against the compiled
/// `SetTempo` events; 0 when none has happened yet.
fn bpm_at_timestamp(timing: &[RawEvent], timestamp: Millis) -> f64 {
    timing
        .iter()
        .rev()
        .find_map(|event| match event.kind {
            EventKind::SetTempo { bpm } if timestamp.value() >= event.timestamp.value() => {
                Some(bpm)
            }
            _ => None,
        })
        .unwrap_or(0.0)
}

/// Whether `timestamp` falls inside any emitted warp interval.
fn inside_warp(timing: &[RawEvent], timestamp: Millis) -> bool {
    timing.iter().any(|event| match event.kind {
        EventKind::Warp { length } => {
            timestamp.value() >= event.timestamp.value()
                && timestamp.value() < event.timestamp.value() + length.value()
        }
        _ => false,
    })
}

/// Decodes the grid into note events against the already-compiled timing
/// stream.
///
/// Tap notes whose timestamp falls inside a warp interval are discarded; the
/// player never sees them. Hold heads and tails survive so holds spanning a
/// warp keep both ends.
pub(crate) fn decode_notes(grid: &NoteGrid, timing: &[RawEvent]) -> Vec<RawEvent> {
    let shift = StopShift::from_timing(timing);
    let mut events = Vec::new();
    let mut cursor = 0.0_f64;

    for measure in &grid.measures {
        if measure.lines.is_empty() {
            continue;
        }
        let subdivision = 1.0 / measure.lines.len() as f64;
        for line in &measure.lines {
            let timestamp = Millis(cursor + shift.shift_at(cursor));
            let bpm = bpm_at_timestamp(timing, timestamp);
            cursor += subdivision * BEATS_PER_MEASURE * beat_length_ms(bpm);

            // Per note subtype, in rank order, so output is deterministic.
            let mut masks = [ColumnMask::EMPTY; 6];
            for (column, symbol) in line.symbols().iter().enumerate() {
                if let Some(kind) = symbol.note_kind() {
                    masks[kind as usize].0[column] = true;
                }
            }
            for (slot, columns) in masks.into_iter().enumerate() {
                if !columns.any() {
                    continue;
                }
                let kind = NOTE_KIND_SLOTS[slot];
                if kind == NoteKind::Note && inside_warp(timing, timestamp) {
                    continue;
                }
                events.push(RawEvent::new(timestamp, EventKind::Note { kind, columns }));
            }
        }
    }

    events
}

/// `NoteKind` by discriminant, for the per-line mask accumulator.
const NOTE_KIND_SLOTS: [NoteKind; 6] = [
    NoteKind::Note,
    NoteKind::HoldHead,
    NoteKind::HoldTail,
    NoteKind::Mine,
    NoteKind::Fake,
    NoteKind::Lift,
];
