//! This module introduces struct [`Header`], the beat-indexed timing
//! directives and descriptive metadata of one chart.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::chart::{Beat, SegmentKind, TimingSegment};

/// The timing directives and metadata of a single chart.
///
/// Each directive family is an ordered-by-beat collection; within one family a
/// beat appears at most once, across families beats may coincide. The compiler
/// treats a header as read-only. The metadata fields exist for external
/// collaborators (difficulty classification, display) and never influence
/// compilation.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Tempo changes, beats per minute by beat. `#BPMS`
    pub bpms: BTreeMap<Beat, f64>,
    /// Scroll stops, seconds by beat. `#STOPS`
    pub stops: BTreeMap<Beat, f64>,
    /// Delays, seconds by beat; compiled identically to stops. `#DELAYS`
    pub delays: BTreeMap<Beat, f64>,
    /// Explicit warps, beats to skip by beat. `#WARPS`
    pub warps: BTreeMap<Beat, f64>,
    /// Tick count changes, subdivisions per beat by beat. `#TICKCOUNTS`
    pub tickcounts: BTreeMap<Beat, f64>,
    /// Scroll toggles by beat; positive enables, zero disables. `#SCROLLS`
    pub scrolls: BTreeMap<Beat, f64>,
    /// Global time offset added to every compiled timestamp, in milliseconds.
    /// May be negative.
    pub offset_ms: f64,
    /// Difficulty label. Owned by the external classifier, not the compiler.
    pub difficulty: String,
    /// Numeric chart level.
    pub level: u32,
    /// Chart display name.
    pub name: String,
}

impl Header {
    /// Creates an empty header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a parsed segment collection into the family selected by `kind`,
    /// replacing entries at already-present beats.
    pub fn insert_segments(&mut self, kind: SegmentKind, segments: BTreeMap<Beat, f64>) {
        let family = match kind {
            SegmentKind::Tempo => &mut self.bpms,
            SegmentKind::Stop => &mut self.stops,
            SegmentKind::Delay => &mut self.delays,
            SegmentKind::Warp => &mut self.warps,
            SegmentKind::Tickcount => &mut self.tickcounts,
            SegmentKind::ScrollToggle => &mut self.scrolls,
        };
        family.extend(segments);
    }

    /// Merges every directive family into one list ordered by
    /// `(beat, kind rank)`, the order the timing compiler walks them in.
    #[must_use]
    pub fn segments(&self) -> Vec<TimingSegment> {
        let family = |map: &BTreeMap<Beat, f64>, kind: SegmentKind| {
            map.iter()
                .map(move |(&beat, &value)| TimingSegment::new(kind, beat, value))
                .collect::<Vec<_>>()
        };
        family(&self.bpms, SegmentKind::Tempo)
            .into_iter()
            .chain(family(&self.stops, SegmentKind::Stop))
            .chain(family(&self.delays, SegmentKind::Delay))
            .chain(family(&self.warps, SegmentKind::Warp))
            .chain(family(&self.tickcounts, SegmentKind::Tickcount))
            .chain(family(&self.scrolls, SegmentKind::ScrollToggle))
            .sorted_by(|a, b| a.beat.cmp(&b.beat).then(a.kind.cmp(&b.kind)))
            .collect()
    }

    /// Gets the beat of the last directive of any family, if one exists.
    #[must_use]
    pub fn last_segment_beat(&self) -> Option<Beat> {
        [
            &self.bpms,
            &self.stops,
            &self.delays,
            &self.warps,
            &self.tickcounts,
            &self.scrolls,
        ]
        .into_iter()
        .filter_map(|map| map.last_key_value().map(|(&beat, _)| beat))
        .max()
    }
}
