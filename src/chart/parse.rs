//! The text front-end for the chart encodings.
//!
//! An upstream loader owns files and framing; this module only understands the
//! two value encodings named by the chart format: segment lists
//! (`beat=value` pairs separated by commas) and the note grid (measures
//! separated by commas, each a block of fixed-width symbol lines).

use std::collections::BTreeMap;

use num::rational::Rational64;

use crate::{
    ChartError, Result,
    chart::{Beat, COLUMNS, Measure, NoteGrid, NoteLine, NoteSymbol},
};

/// Parses a segment list such as `0.000=120.000,4.000=0.500` into an
/// ordered-by-beat collection.
///
/// Entries may be separated by arbitrary whitespace in addition to the comma.
/// Beats are parsed as exact decimals; a duplicate beat keeps the last entry.
///
/// # Errors
///
/// Returns [`ChartError::InvalidSegmentEntry`] when an entry is not a
/// `beat=value` pair, its beat is not a non-negative decimal, or its value is
/// not a decimal. Negative *values* are accepted here; the compiler rejects
/// them as [`ChartError::InvalidTimingSegment`] so that validation happens in
/// one place.
pub fn parse_segment_list(text: &str) -> Result<BTreeMap<Beat, f64>> {
    let mut segments = BTreeMap::new();
    for entry in text.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let invalid = || ChartError::InvalidSegmentEntry {
            entry: entry.to_owned(),
        };
        let (beat_text, value_text) = entry.split_once('=').ok_or_else(invalid)?;
        let beat = parse_beat(beat_text.trim()).ok_or_else(invalid)?;
        if beat.is_negative() {
            return Err(invalid());
        }
        let value: f64 = value_text.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        segments.insert(beat, value);
    }
    Ok(segments)
}

/// Decimal beat literals keep at most this many fractional digits; further
/// digits carry no musical meaning and would overflow the rational.
const MAX_FRACTION_DIGITS: usize = 9;

fn parse_beat(text: &str) -> Option<Beat> {
    let (int_text, frac_text) = match text.split_once('.') {
        Some((int_text, frac_text)) => (int_text, frac_text),
        None => (text, ""),
    };
    let negative = int_text.starts_with('-');
    let int_text = int_text.strip_prefix(['-', '+']).unwrap_or(int_text);
    if int_text.is_empty() && frac_text.is_empty() {
        return None;
    }
    if !int_text.chars().all(|ch| ch.is_ascii_digit())
        || !frac_text.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }

    let whole: i64 = if int_text.is_empty() {
        0
    } else {
        int_text.parse().ok()?
    };
    let frac_text = &frac_text[..frac_text.len().min(MAX_FRACTION_DIGITS)];
    let (numerator, denominator) = if frac_text.is_empty() {
        (0, 1)
    } else {
        (frac_text.parse().ok()?, 10_i64.pow(frac_text.len() as u32))
    };
    let mut beat = Rational64::from_integer(whole) + Rational64::new(numerator, denominator);
    if negative {
        beat = -beat;
    }
    Some(Beat::from(beat))
}

/// Parses note-grid text into a [`NoteGrid`].
///
/// Measures are separated by `,`. Within a measure, `//` comments are
/// stripped, surrounding whitespace is trimmed, and only lines consisting of
/// exactly [`COLUMNS`] symbol characters (ASCII alphanumeric) are kept;
/// everything else is skipped silently. Measures that end up with no lines at
/// all are dropped the same way the surrounding format drops blank measures.
#[must_use]
pub fn parse_note_grid(text: &str) -> NoteGrid {
    let measures = text
        .split(',')
        .map(parse_measure)
        .filter(|measure| !measure.lines.is_empty())
        .collect();
    NoteGrid::new(measures)
}

fn parse_measure(text: &str) -> Measure {
    let lines = text
        .lines()
        .map(|line| {
            let line = line.split("//").next().unwrap_or(line);
            line.trim()
        })
        .filter_map(parse_line)
        .collect();
    Measure::new(lines)
}

fn parse_line(text: &str) -> Option<NoteLine> {
    if text.len() != COLUMNS || !text.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return None;
    }
    let mut symbols = [NoteSymbol::Empty; COLUMNS];
    for (column, ch) in text.chars().enumerate() {
        symbols[column] = NoteSymbol::from_char(ch);
    }
    Some(NoteLine::new(symbols))
}
