//! Definitions of timing directives: the segment kinds and the tagged segment
//! value walked by the timing compiler.

use crate::{ChartError, Result, chart::Beat};

/// The family a timing directive belongs to.
///
/// The set is closed; textual directive tags outside it are rejected by
/// [`SegmentKind::from_tag`] with [`ChartError::UnknownSegmentKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// A tempo change; the value is beats per minute. Values above the
    /// fast-tempo sentinel are treated as warp triggers, not tempo changes.
    Tempo,
    /// A scroll stop; the value is seconds to pause.
    Stop,
    /// A delay; same shape as a stop and merged with them at compile time.
    Delay,
    /// An explicit warp; the value is the number of beats to skip.
    Warp,
    /// A tick count change; the value is the integer subdivisions per beat.
    Tickcount,
    /// A scroll toggle; a positive value enables scrolling from this beat,
    /// zero disables it.
    ScrollToggle,
}

impl SegmentKind {
    /// Tie-break rank for directives sharing a beat. The derived [`Ord`]
    /// follows declaration order, which is the compile order: tempo changes
    /// apply before the stop/delay at the same beat, warps before tick counts,
    /// scroll toggles last.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Maps a textual directive family tag (`BPMS`, `STOPS`, `DELAYS`,
    /// `WARPS`, `TICKCOUNTS`, `SCROLLS`) to its kind, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::UnknownSegmentKind`] for any other tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        const TAGS: [(&str, SegmentKind); 6] = [
            ("BPMS", SegmentKind::Tempo),
            ("STOPS", SegmentKind::Stop),
            ("DELAYS", SegmentKind::Delay),
            ("WARPS", SegmentKind::Warp),
            ("TICKCOUNTS", SegmentKind::Tickcount),
            ("SCROLLS", SegmentKind::ScrollToggle),
        ];
        TAGS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|&(_, kind)| kind)
            .ok_or_else(|| ChartError::UnknownSegmentKind {
                tag: tag.to_owned(),
            })
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tempo => "tempo",
            Self::Stop => "stop",
            Self::Delay => "delay",
            Self::Warp => "warp",
            Self::Tickcount => "tickcount",
            Self::ScrollToggle => "scroll toggle",
        };
        write!(f, "{name}")
    }
}

/// One timing directive: a kind, the beat it is keyed by, and its value.
///
/// The meaning of `value` depends on `kind`; see [`SegmentKind`]. Negative
/// values are structurally invalid and rejected during compilation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingSegment {
    /// The directive family.
    pub kind: SegmentKind,
    /// The beat position the directive applies from.
    pub beat: Beat,
    /// The directive value, interpreted per `kind`.
    pub value: f64,
}

impl TimingSegment {
    /// Creates a segment.
    #[must_use]
    pub const fn new(kind: SegmentKind, beat: Beat, value: f64) -> Self {
        Self { kind, beat, value }
    }
}
