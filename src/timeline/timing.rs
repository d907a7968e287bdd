//! The timing compiler: walks every timing directive in `(beat, kind)` order
//! and produces absolutely-timestamped timing events.
//!
//! The walk keeps a running clock on the beat axis and threads an explicit
//! warp state through the fold: tempo spikes above the sentinel open a
//! synthesized warp instead of emitting a tempo change, the next real tempo
//! change closes it, and a stop landing mid-warp splits the warp around
//! itself so the stopped span stays visually absorbed.

use crate::{
    ChartError, Result,
    chart::{Header, Millis, SegmentKind},
    timeline::{
        event::{EventKind, RawEvent},
        integrate::{WARP_FUSE, range_duration},
        tempo::{FAST_BPM_WARP, TempoCurve, beat_length_ms},
    },
};

/// Whether a synthesized warp is currently open.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WarpState {
    /// No warp in progress.
    Idle,
    /// A warp opened at `start` and has not closed yet.
    Warping {
        /// Timestamp the warp opened at.
        start: Millis,
    },
}

impl WarpState {
    /// Closes the warp, if one is open, into an event ending at `now`.
    /// Zero-length warps are discarded as no-ops.
    fn close(&mut self, now: Millis) -> Option<RawEvent> {
        let Self::Warping { start } = *self else {
            return None;
        };
        *self = Self::Idle;
        let length = now - start;
        (length != Millis::ZERO).then_some(RawEvent::new(start, EventKind::Warp { length }))
    }
}

/// Scroll-toggle bookkeeping: whether scrolling is on, and since when it has
/// been off.
#[derive(Debug, Clone, Copy)]
struct ScrollState {
    enabled: bool,
    disabled_at: Millis,
}

/// Compiles the header's timing directives into timestamped timing events.
///
/// The output contains `SetTempo`, `SetTickcount`, `Stop` and `Warp` events
/// plus unresolved `AsyncStop` markers for the scroll resolver, ordered as
/// emitted (non-decreasing except for warp events, which start earlier than
/// the point they are emitted at; the assembler sorts).
///
/// # Errors
///
/// Returns [`ChartError::InvalidTimingSegment`] when any directive carries a
/// negative value.
pub(crate) fn compile_timing(header: &Header, curve: &TempoCurve) -> Result<Vec<RawEvent>> {
    let mut events = Vec::new();
    let mut current_beat = 0.0_f64;
    let mut current_timestamp = Millis::ZERO;
    let mut current_bpm = curve.bpm_at(0.0);
    let mut warp = WarpState::Idle;
    let mut scroll = ScrollState {
        enabled: true,
        disabled_at: Millis::ZERO,
    };

    for segment in header.segments() {
        let beat = segment.beat.as_f64();
        current_timestamp += Millis((beat - current_beat) * beat_length_ms(current_bpm));
        current_beat = beat;
        current_bpm = curve.bpm_at(beat);
        let timestamp = current_timestamp;

        if segment.value < 0.0 || segment.beat.is_negative() {
            return Err(ChartError::InvalidTimingSegment {
                kind: segment.kind,
                beat: segment.beat,
                value: segment.value,
            });
        }

        match segment.kind {
            SegmentKind::Tempo => {
                if segment.value > FAST_BPM_WARP {
                    // A spike is a warp trigger, not a tempo. Keep the
                    // earliest start if one is already open.
                    if warp == WarpState::Idle {
                        warp = WarpState::Warping { start: timestamp };
                    }
                    continue;
                }
                events.extend(warp.close(timestamp));
                events.push(RawEvent::new(
                    timestamp,
                    EventKind::SetTempo { bpm: current_bpm },
                ));
            }
            SegmentKind::Stop | SegmentKind::Delay => {
                let length = Millis(segment.value * 1000.0);
                if matches!(warp, WarpState::Warping { .. }) {
                    // A stop inside a warp splits it: the re-opened warp
                    // swallows the stopped span once it closes.
                    events.extend(warp.close(timestamp));
                    warp = WarpState::Warping { start: timestamp };
                }
                events.push(RawEvent::new(timestamp, EventKind::Stop { length }));
                current_timestamp += length;
            }
            SegmentKind::Warp => {
                let length = range_duration(curve, beat, beat + segment.value, WARP_FUSE);
                events.push(RawEvent::new(timestamp, EventKind::Warp { length }));
            }
            SegmentKind::Tickcount => {
                events.push(RawEvent::new(
                    timestamp,
                    EventKind::SetTickcount {
                        count: segment.value as u32,
                    },
                ));
            }
            SegmentKind::ScrollToggle => {
                let enabled = segment.value > 0.0;
                match (scroll.enabled, enabled) {
                    (false, true) => {
                        events.push(RawEvent::new(
                            scroll.disabled_at,
                            EventKind::AsyncStop {
                                length: timestamp - scroll.disabled_at,
                            },
                        ));
                        scroll.enabled = true;
                    }
                    (true, false) => {
                        scroll.enabled = false;
                        scroll.disabled_at = timestamp;
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Beat;

    fn header(bpms: &[(i64, f64)]) -> Header {
        let mut header = Header::new();
        for &(beat, bpm) in bpms {
            header.bpms.insert(Beat::from_integer(beat), bpm);
        }
        header
    }

    fn timing(header: &Header) -> Vec<RawEvent> {
        compile_timing(header, &TempoCurve::from_header(header)).unwrap()
    }

    #[test]
    fn spike_becomes_a_single_warp() {
        let mut header = header(&[(0, 120.0), (2, 99_999_999.0), (3, 120.0)]);
        header.tickcounts.insert(Beat::ZERO, 4.0);
        let events = timing(&header);

        let warps: Vec<_> = events
            .iter()
            .filter(|ev| matches!(ev.kind, EventKind::Warp { .. }))
            .collect();
        assert_eq!(warps.len(), 1);
        assert_eq!(warps[0].timestamp, Millis(1000.0));
        assert_eq!(
            warps[0].kind,
            EventKind::Warp {
                length: Millis(500.0)
            }
        );

        // No tempo event for the spike itself: only beat 0 and beat 3.
        let tempos: Vec<_> = events
            .iter()
            .filter(|ev| matches!(ev.kind, EventKind::SetTempo { .. }))
            .map(|ev| ev.timestamp)
            .collect();
        assert_eq!(tempos, vec![Millis(0.0), Millis(1500.0)]);
    }

    #[test]
    fn stop_splits_an_open_warp() {
        let mut header = header(&[(0, 120.0), (2, 99_999_999.0), (4, 120.0)]);
        header.stops.insert(Beat::from_integer(3), 2.0);
        let events = timing(&header);

        // Warp opens at 1000 (beat 2), the stop at beat 3 (1500) closes it
        // and re-opens; the re-opened warp closes at beat 4, absorbing the
        // stopped 2000ms: 1500 + 2000 + 500 = 4000.
        let warps: Vec<_> = events
            .iter()
            .filter_map(|ev| match ev.kind {
                EventKind::Warp { length } => Some((ev.timestamp, length)),
                _ => None,
            })
            .collect();
        assert_eq!(
            warps,
            vec![
                (Millis(1000.0), Millis(500.0)),
                (Millis(1500.0), Millis(2500.0)),
            ]
        );

        // The stop is still recorded even though a warp absorbs it.
        assert!(
            events
                .iter()
                .any(|ev| ev.timestamp == Millis(1500.0)
                    && ev.kind
                        == EventKind::Stop {
                            length: Millis(2000.0)
                        })
        );
    }

    #[test]
    fn stops_shift_later_timing_events() {
        let mut header = header(&[(0, 120.0), (8, 60.0)]);
        header.stops.insert(Beat::from_integer(4), 2.0);
        let events = timing(&header);

        // Beat 8 at 120 BPM is 4000ms; the 2s stop at beat 4 pushes it to 6000.
        assert!(
            events
                .iter()
                .any(|ev| ev.kind == EventKind::SetTempo { bpm: 60.0 }
                    && ev.timestamp == Millis(6000.0))
        );
    }

    #[test]
    fn zero_length_synthesized_warp_is_dropped() {
        // The spike opens a warp at beat 2 and the stop at the same beat
        // closes it immediately: the zero-length warp disappears, only the
        // re-opened one (absorbing the stop) survives.
        let mut header = header(&[(0, 120.0), (2, 99_999_999.0), (3, 120.0)]);
        header.stops.insert(Beat::from_integer(2), 1.0);
        let events = timing(&header);

        let warps: Vec<_> = events
            .iter()
            .filter_map(|ev| match ev.kind {
                EventKind::Warp { length } => Some((ev.timestamp, length)),
                _ => None,
            })
            .collect();
        assert_eq!(warps, vec![(Millis(1000.0), Millis(1500.0))]);
    }

    #[test]
    fn scroll_toggles_become_async_markers() {
        let mut header = header(&[(0, 120.0)]);
        header.scrolls.insert(Beat::ZERO, 1.0);
        header.scrolls.insert(Beat::from_integer(4), 0.0);
        header.scrolls.insert(Beat::from_integer(6), 1.0);
        let events = timing(&header);

        let markers: Vec<_> = events
            .iter()
            .filter_map(|ev| match ev.kind {
                EventKind::AsyncStop { length } => Some((ev.timestamp, length)),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec![(Millis(2000.0), Millis(1000.0))]);
    }

    #[test]
    fn negative_value_is_rejected() {
        let header = header(&[(0, -5.0)]);
        let result = compile_timing(&header, &TempoCurve::from_header(&header));
        assert!(matches!(
            result,
            Err(ChartError::InvalidTimingSegment {
                kind: SegmentKind::Tempo,
                ..
            })
        ));
    }

    #[test]
    fn explicit_warp_uses_the_integrator() {
        let mut header = header(&[(0, 120.0)]);
        header.warps.insert(Beat::from_integer(4), 2.0);
        let events = timing(&header);
        assert!(events.contains(&RawEvent::new(
            Millis(2000.0),
            EventKind::Warp {
                length: Millis(1000.0)
            }
        )));
    }
}
