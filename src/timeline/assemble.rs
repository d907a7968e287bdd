//! The timeline assembler: merge, order, resolve, offset, round.

use crate::{
    chart::Millis,
    timeline::{
        event::{Event, RawEvent},
        scroll::resolve_async_stops,
    },
};

/// Sorts events by `(timestamp, kind rank)`. The rank is a fixed total order,
/// so coincident timestamps come out the same way every time; the sort is
/// stable, so equal-rank events keep their emission order.
pub(crate) fn sort_events(events: &mut [RawEvent]) {
    events.sort_by(|a, b| {
        a.timestamp
            .total_cmp(&b.timestamp)
            .then_with(|| a.kind.rank().cmp(&b.kind.rank()))
    });
}

/// Merges timing and note events into the final timeline: sort, resolve
/// scroll suspensions, add the global offset, and round each timestamp to the
/// nearest integer millisecond (half away from zero).
pub(crate) fn assemble(
    timing: Vec<RawEvent>,
    notes: Vec<RawEvent>,
    offset_ms: f64,
) -> Vec<Event> {
    let mut merged = timing;
    merged.extend(notes);
    sort_events(&mut merged);

    resolve_async_stops(merged)
        .into_iter()
        .map(|event| Event::new((event.timestamp + Millis(offset_ms)).round(), event.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::timeline::event::{ColumnMask, EventKind, NoteKind};

    #[test]
    fn coincident_events_order_by_rank() {
        let timing = vec![RawEvent::new(
            Millis(500.0),
            EventKind::SetTempo { bpm: 150.0 },
        )];
        let notes = vec![RawEvent::new(
            Millis(500.0),
            EventKind::Note {
                kind: NoteKind::Note,
                columns: ColumnMask::from_columns([2]),
            },
        )];
        let timeline = assemble(timing, notes, 0.0);
        assert!(matches!(timeline[0].kind, EventKind::SetTempo { .. }));
        assert!(matches!(timeline[1].kind, EventKind::Note { .. }));
    }

    #[test]
    fn offset_applies_before_rounding() {
        let timing = vec![RawEvent::new(
            Millis(100.2),
            EventKind::SetTempo { bpm: 120.0 },
        )];
        let timeline = assemble(timing, Vec::new(), 0.3);
        assert_eq!(timeline[0].timestamp, 101);
    }

    #[test]
    fn negative_offset_rounds_away_from_zero() {
        let timing = vec![RawEvent::new(
            Millis(0.0),
            EventKind::SetTempo { bpm: 120.0 },
        )];
        let timeline = assemble(timing, Vec::new(), -10.5);
        assert_eq!(timeline[0].timestamp, -11);
    }
}
