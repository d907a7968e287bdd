//! Prelude module for the stepchart crate.
//!
//! This module re-exports the public types in one flat namespace for
//! convenient access. You can use `use stepchart::prelude::*;` to import
//! everything at once.

pub use crate::{
    ChartError, Result,
    chart::{
        Beat, COLUMNS, Header, Measure, Millis, NoteGrid, NoteLine, NoteSymbol, SegmentKind,
        TimingSegment,
        parse::{parse_note_grid, parse_segment_list},
    },
    timeline::{
        ColumnMask, Event, EventKind, FAST_BPM_WARP, NoteKind, TempoCurve, WARP_FUSE,
        beat_length_ms, compile, range_duration,
    },
};
