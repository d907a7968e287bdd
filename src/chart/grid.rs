//! This module introduces struct [`NoteGrid`], the 5-column note-symbol grid
//! of one chart.

/// The number of playable columns.
pub const COLUMNS: usize = 5;

/// One note symbol, the content of a single grid cell.
///
/// The decoder understands the symbols with a dedicated variant; anything else
/// is preserved as [`NoteSymbol::Other`] and silently dropped during
/// compilation. Unknown symbols are not an error: chart authors extend the
/// symbol set freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteSymbol {
    /// `0`, no note in this cell.
    #[default]
    Empty,
    /// `1`, a tap note.
    Tap,
    /// `2`, the head of a hold.
    HoldHead,
    /// `3`, the tail of a hold.
    HoldTail,
    /// `M`, a mine.
    Mine,
    /// `F`, a fake note.
    Fake,
    /// `L`, a lift.
    Lift,
    /// Any symbol this crate does not interpret.
    Other(char),
}

impl NoteSymbol {
    /// Decodes a single grid character.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        match ch {
            '0' => Self::Empty,
            '1' => Self::Tap,
            '2' => Self::HoldHead,
            '3' => Self::HoldTail,
            'M' => Self::Mine,
            'F' => Self::Fake,
            'L' => Self::Lift,
            other => Self::Other(other),
        }
    }
}

impl From<char> for NoteSymbol {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

/// One fixed-width line of the grid: a symbol per playable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteLine(pub [NoteSymbol; COLUMNS]);

impl NoteLine {
    /// Creates a line from one symbol per column.
    #[must_use]
    pub const fn new(symbols: [NoteSymbol; COLUMNS]) -> Self {
        Self(symbols)
    }

    /// Returns the symbols by column.
    #[must_use]
    pub const fn symbols(&self) -> &[NoteSymbol; COLUMNS] {
        &self.0
    }
}

/// One measure: an ordered run of lines, each representing `1/lines.len()` of
/// a whole note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    /// The symbol lines of the measure, in playback order.
    pub lines: Vec<NoteLine>,
}

impl Measure {
    /// Creates a measure from its lines.
    #[must_use]
    pub const fn new(lines: Vec<NoteLine>) -> Self {
        Self { lines }
    }
}

/// The full note grid of a chart: an ordered sequence of measures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteGrid {
    /// The measures, in playback order.
    pub measures: Vec<Measure>,
}

impl NoteGrid {
    /// Creates a grid from its measures.
    #[must_use]
    pub const fn new(measures: Vec<Measure>) -> Self {
        Self { measures }
    }

    /// Whether the grid contains no measures at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}
