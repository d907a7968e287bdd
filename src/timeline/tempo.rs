//! This module introduces struct [`TempoCurve`], the piecewise-constant tempo
//! lookup shared by the timing compiler and the warp range integrator.

use crate::chart::Header;

/// Tempo values above this are not playable tempos; they are the sentinel the
/// format uses to express "skip this range", and the compiler turns them into
/// synthesized warps.
pub const FAST_BPM_WARP: f64 = 9_999_999.0;

/// Milliseconds in a minute, the factor between BPM and beat length.
const MINUTE_MS: f64 = 60_000.0;

/// Length of one beat in milliseconds at the given tempo. A tempo of zero
/// (no tempo defined yet) yields a zero-length beat.
#[must_use]
pub fn beat_length_ms(bpm: f64) -> f64 {
    if bpm == 0.0 { 0.0 } else { MINUTE_MS / bpm }
}

/// The chart's tempo as a function of beat position.
///
/// Only finite tempos participate: values above [`FAST_BPM_WARP`] never become
/// the current tempo, so time during a tempo-spike warp keeps flowing at the
/// last real tempo — exactly the span the synthesized warp must cover.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TempoCurve {
    /// `(beat, bpm)` change points, ascending by beat.
    changes: Vec<(f64, f64)>,
}

impl TempoCurve {
    /// Builds the curve from a header's tempo family, keeping finite tempos
    /// only.
    #[must_use]
    pub fn from_header(header: &Header) -> Self {
        let changes = header
            .bpms
            .iter()
            .filter(|&(_, &bpm)| bpm <= FAST_BPM_WARP)
            .map(|(beat, &bpm)| (beat.as_f64(), bpm))
            .collect();
        Self { changes }
    }

    /// The tempo in effect at `beat`: the last change at or before it, or 0
    /// when none is defined yet.
    #[must_use]
    pub fn bpm_at(&self, beat: f64) -> f64 {
        self.changes
            .iter()
            .rev()
            .find(|&&(change_beat, _)| beat >= change_beat)
            .map_or(0.0, |&(_, bpm)| bpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Beat;

    #[test]
    fn bpm_lookup_is_piecewise_constant() {
        let mut header = Header::new();
        header.bpms.insert(Beat::ZERO, 120.0);
        header.bpms.insert(Beat::from_integer(4), 150.0);
        let curve = TempoCurve::from_header(&header);

        assert_eq!(curve.bpm_at(0.0), 120.0);
        assert_eq!(curve.bpm_at(3.999), 120.0);
        assert_eq!(curve.bpm_at(4.0), 150.0);
        assert_eq!(curve.bpm_at(100.0), 150.0);
    }

    #[test]
    fn spike_tempos_never_become_current() {
        let mut header = Header::new();
        header.bpms.insert(Beat::ZERO, 120.0);
        header.bpms.insert(Beat::from_integer(2), 99_999_999.0);
        let curve = TempoCurve::from_header(&header);

        assert_eq!(curve.bpm_at(2.5), 120.0);
    }

    #[test]
    fn no_tempo_reads_as_zero() {
        let curve = TempoCurve::from_header(&Header::new());
        assert_eq!(curve.bpm_at(0.0), 0.0);
        assert_eq!(beat_length_ms(0.0), 0.0);
        assert_eq!(beat_length_ms(120.0), 500.0);
    }
}
