//! Compiler from SSC-style step-chart descriptions into absolute-time event timelines.
//!
//! A chart arrives as two pieces: a [`chart::Header`] holding beat-indexed timing
//! directives (tempo, stops, delays, warps, tickcounts, scroll toggles) plus a
//! global offset, and a [`chart::NoteGrid`] holding the 5-column note-symbol
//! grid. [`timeline::compile`] integrates the tempo curve, folds the five
//! families of timing modifiers into one stream (absorbing extreme tempo spikes
//! and mid-warp stops into synthesized warps), decodes the grid on its own
//! elapsed-time cursor, resolves asynchronous scroll suspensions, and returns a
//! deterministically ordered sequence of [`timeline::Event`]s with integer
//! millisecond timestamps.
//!
//! In detail, our policies are:
//!
//! - Compilation is a pure function: immutable inputs in, one owned event
//!   sequence out. Compiling many charts in parallel needs no coordination.
//! - Unknown note symbols are dropped silently; the grid format is treated as
//!   extensible. Structurally bad timing directives are hard errors.
//! - Do not support reading or writing chart files; the crate starts at
//!   strings and ends at events.

pub mod chart;
pub mod prelude;
pub mod timeline;

use thiserror::Error;

use crate::chart::{Beat, SegmentKind};

/// An error occurred while parsing or compiling a chart.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartError {
    /// A timing segment carried a negative value, which no directive family
    /// admits.
    #[error("invalid timing segment: {kind} at beat {beat} has negative value {value}")]
    InvalidTimingSegment {
        /// The directive family the segment belongs to.
        kind: SegmentKind,
        /// The beat the segment is keyed by.
        beat: Beat,
        /// The offending value.
        value: f64,
    },
    /// A directive family tag was not recognized.
    #[error("unknown timing segment kind: {tag:?}")]
    UnknownSegmentKind {
        /// The unrecognized tag, as written in the source.
        tag: String,
    },
    /// A `beat=value` entry of a segment list could not be parsed.
    #[error("invalid segment list entry: {entry:?}")]
    InvalidSegmentEntry {
        /// The malformed entry, as written in the source.
        entry: String,
    },
}

/// The result type of this crate.
pub type Result<T> = std::result::Result<T, ChartError>;
