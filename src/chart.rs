//! The chart data model: timing directives, header metadata and the note grid.
//!
//! Everything in this module is plain data. An upstream loader fills a
//! [`Header`] and a [`NoteGrid`] (the [`parse`] module handles the textual
//! encodings of both), and [`crate::timeline::compile`] consumes them without
//! mutating either.
//!
//! Two time axes appear throughout the crate and are kept as distinct types on
//! purpose: [`Beat`] is the fractional position in the musical grid that keys
//! every timing directive, while [`Millis`] is elapsed real time on the
//! compiled timeline. Code that converts between them does so explicitly
//! through the tempo curve.

pub mod grid;
pub mod header;
pub mod parse;
pub mod segment;
pub mod time;

pub use grid::{COLUMNS, Measure, NoteGrid, NoteLine, NoteSymbol};
pub use header::Header;
pub use segment::{SegmentKind, TimingSegment};
pub use time::{Beat, Millis};
