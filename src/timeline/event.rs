//! Definitions of compiled playback events.

use crate::chart::{COLUMNS, Millis};

/// A set of playable columns, one flag per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMask(pub [bool; COLUMNS]);

impl ColumnMask {
    /// The empty mask.
    pub const EMPTY: Self = Self([false; COLUMNS]);

    /// Builds a mask from column indices; out-of-range indices are ignored.
    #[must_use]
    pub fn from_columns(columns: impl IntoIterator<Item = usize>) -> Self {
        let mut mask = Self::EMPTY;
        for column in columns {
            if column < COLUMNS {
                mask.0[column] = true;
            }
        }
        mask
    }

    /// Whether any column is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.0.iter().any(|&set| set)
    }

    /// Whether the given column is set. Out-of-range indices read as unset.
    #[must_use]
    pub fn contains(&self, column: usize) -> bool {
        self.0.get(column).copied().unwrap_or(false)
    }

    /// Iterates over the set column indices in ascending order.
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(column, &set)| set.then_some(column))
    }
}

/// The per-column note event subtypes decoded from grid symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteKind {
    /// A tap note to hit.
    Note,
    /// The start of a hold.
    HoldHead,
    /// The end of a hold.
    HoldTail,
    /// A mine to avoid.
    Mine,
    /// A fake note, rendered but not judged.
    Fake,
    /// A lift, released rather than pressed.
    Lift,
}

/// What a compiled event does, with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// The tempo changes to `bpm` beats per minute.
    SetTempo {
        /// The new tempo.
        bpm: f64,
    },
    /// The tick count changes to `count` subdivisions per beat.
    SetTickcount {
        /// The new subdivision count.
        count: u32,
    },
    /// Scrolling pauses for `length` of real time.
    Stop {
        /// How long the pause lasts.
        length: Millis,
    },
    /// An unresolved scroll suspension: scrolling was disabled at this event's
    /// timestamp for `length`. The scroll resolver rewrites these into
    /// [`EventKind::Stop`] while compensating later timestamps; none survive
    /// into compiled output.
    AsyncStop {
        /// How long scrolling stayed disabled.
        length: Millis,
    },
    /// `length` of real time is skipped without skipping rendered beats.
    Warp {
        /// How much real time the warp swallows.
        length: Millis,
    },
    /// A note event on the masked columns.
    Note {
        /// The note subtype.
        kind: NoteKind,
        /// The columns the event lands on.
        columns: ColumnMask,
    },
}

impl EventKind {
    /// Fixed total rank used to break ties between events sharing a
    /// timestamp. Timing events order before note events; the order is
    /// arbitrary but frozen, which is what makes compiled output reproducible.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::SetTempo { .. } => 0,
            Self::SetTickcount { .. } => 1,
            Self::Stop { .. } => 2,
            Self::AsyncStop { .. } => 3,
            Self::Warp { .. } => 4,
            Self::Note { kind, .. } => {
                5 + match kind {
                    NoteKind::Note => 0,
                    NoteKind::HoldHead => 1,
                    NoteKind::HoldTail => 2,
                    NoteKind::Mine => 3,
                    NoteKind::Fake => 4,
                    NoteKind::Lift => 5,
                }
            }
        }
    }
}

/// One event of the compiled timeline, the sole output artifact of
/// compilation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Absolute timestamp in integer milliseconds, global offset included.
    pub timestamp: i64,
    /// What happens at that timestamp.
    pub kind: EventKind,
}

impl Event {
    /// Creates an event.
    #[must_use]
    pub const fn new(timestamp: i64, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

/// A not-yet-rounded event on the working timeline. Timestamps stay fractional
/// until the assembler applies the global offset and rounds once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawEvent {
    pub timestamp: Millis,
    pub kind: EventKind,
}

impl RawEvent {
    pub(crate) const fn new(timestamp: Millis, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}
