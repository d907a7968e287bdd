//! The async-scroll resolver: rewrites scroll-suspension markers into
//! concrete stops and pulls every later timestamp back by the suspended time.
//!
//! While scrolling is disabled the player sees nothing move, so everything
//! compiled into that span appears to happen the instant scrolling resumes.
//! The compensation models that: a synthetic stop is recorded where scrolling
//! was disabled, and all later events lose the suspended duration from their
//! timestamps.

use crate::{
    chart::Millis,
    timeline::{
        assemble::sort_events,
        event::{EventKind, RawEvent},
    },
};

/// Resolves every [`EventKind::AsyncStop`] marker in the interleaved,
/// timestamp-sorted event stream.
///
/// Walks the stream once, accumulating suspended time: markers become
/// [`EventKind::Stop`] events at the timestamp scrolling was disabled, and
/// every other event is shifted back by the time suspended so far. The result
/// is re-sorted, so output timestamps are monotonically non-decreasing.
pub(crate) fn resolve_async_stops(events: Vec<RawEvent>) -> Vec<RawEvent> {
    let mut suspended = Millis::ZERO;
    let mut resolved: Vec<RawEvent> = events
        .into_iter()
        .map(|event| match event.kind {
            EventKind::AsyncStop { length } => {
                let timestamp = event.timestamp - suspended;
                suspended += length;
                RawEvent::new(timestamp, EventKind::Stop { length })
            }
            _ => RawEvent::new(event.timestamp - suspended, event.kind),
        })
        .collect();
    sort_events(&mut resolved);
    resolved
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::timeline::event::{ColumnMask, NoteKind};

    fn note(timestamp: f64) -> RawEvent {
        RawEvent::new(
            Millis(timestamp),
            EventKind::Note {
                kind: NoteKind::Note,
                columns: ColumnMask::from_columns([0]),
            },
        )
    }

    #[test]
    fn marker_becomes_stop_and_later_events_shift() {
        let events = vec![
            note(0.0),
            RawEvent::new(
                Millis(2000.0),
                EventKind::AsyncStop {
                    length: Millis(1000.0),
                },
            ),
            note(2500.0),
            note(3500.0),
        ];
        let resolved = resolve_async_stops(events);

        assert_eq!(
            resolved[1].kind,
            EventKind::Stop {
                length: Millis(1000.0)
            }
        );
        assert_eq!(resolved[1].timestamp, Millis(2000.0));
        let notes: Vec<_> = resolved
            .iter()
            .filter(|ev| matches!(ev.kind, EventKind::Note { .. }))
            .map(|ev| ev.timestamp)
            .collect();
        assert_eq!(notes, vec![Millis(0.0), Millis(1500.0), Millis(2500.0)]);
    }

    #[test]
    fn consecutive_suspensions_accumulate() {
        let events = vec![
            RawEvent::new(
                Millis(1000.0),
                EventKind::AsyncStop {
                    length: Millis(500.0),
                },
            ),
            RawEvent::new(
                Millis(3000.0),
                EventKind::AsyncStop {
                    length: Millis(250.0),
                },
            ),
            note(4000.0),
        ];
        let resolved = resolve_async_stops(events);
        // Second marker loses the first suspension; the note loses both.
        assert_eq!(resolved[1].timestamp, Millis(2500.0));
        assert_eq!(resolved[2].timestamp, Millis(3250.0));
    }

    #[test]
    fn resolved_stream_is_sorted() {
        let events = vec![
            RawEvent::new(
                Millis(1000.0),
                EventKind::AsyncStop {
                    length: Millis(800.0),
                },
            ),
            note(1100.0),
            note(2000.0),
        ];
        let resolved = resolve_async_stops(events);
        assert!(
            resolved
                .windows(2)
                .all(|pair| pair[0].timestamp.total_cmp(&pair[1].timestamp).is_le())
        );
    }

    #[test]
    fn stream_without_markers_is_untouched() {
        let events = vec![note(0.0), note(500.0)];
        assert_eq!(resolve_async_stops(events.clone()), events);
    }
}
