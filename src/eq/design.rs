use std::f64::consts::PI;

use thiserror::Error;

/// Q used when a band does not specify one (roughly one octave).
pub const DEFAULT_Q: f64 = 1.414;

/// Normalized biquad coefficients `[b0, b1, b2, a1, a2]` (a0 is 1).
pub type Coefficients = [f64; 5];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EqError {
    #[error("invalid {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("no equalizer band at {0} Hz")]
    UnknownBand(f64),
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> EqError {
    EqError::InvalidParameter {
        name,
        value,
        reason,
    }
}

/// Check that a band at `freq_hz` can be designed for `sample_rate_hz` with `q`.
pub fn validate_band(freq_hz: f64, sample_rate_hz: f64, q: f64) -> Result<(), EqError> {
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
        return Err(invalid("sample rate", sample_rate_hz, "must be > 0"));
    }
    if !freq_hz.is_finite() || freq_hz <= 0.0 || freq_hz >= sample_rate_hz / 2.0 {
        return Err(invalid(
            "frequency",
            freq_hz,
            "must lie strictly between 0 and half the sample rate",
        ));
    }
    if !q.is_finite() || q <= 0.0 {
        return Err(invalid("q", q, "must be > 0"));
    }
    Ok(())
}

/// Design a peaking EQ section (RBJ audio EQ cookbook).
///
/// Returns `[b0, b1, b2, a1, a2]` already divided by `a0`. A gain of 0 dB
/// yields the identity filter.
pub fn design_peaking_eq(
    freq_hz: f64,
    sample_rate_hz: f64,
    gain_db: f64,
    q: f64,
) -> Result<Coefficients, EqError> {
    validate_band(freq_hz, sample_rate_hz, q)?;
    if !gain_db.is_finite() {
        return Err(invalid("gain", gain_db, "must be finite"));
    }

    let a = 10.0_f64.powf(gain_db / 40.0);
    let w0 = 2.0 * PI * freq_hz / sample_rate_hz;
    let sin_w0 = w0.sin();
    let cos_w0 = w0.cos();
    let alpha = sin_w0 / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_w0;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_w0;
    let a2 = 1.0 - alpha / a;

    Ok([b0 / a0, b1 / a0, b2 / a0, a1 / a0, a2 / a0])
}
