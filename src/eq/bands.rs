use tracing::debug;

use super::design::{Coefficients, EqError, design_peaking_eq, validate_band};

/// Center frequencies of the default 10-band layout.
pub const DEFAULT_BANDS_HZ: [f64; 10] = [
    32.0, 64.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

const FREQ_EPSILON: f64 = 1e-6;

/// One peaking band and its current coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizerBand {
    pub center_frequency_hz: f64,
    pub gain_db: f64,
    pub q: f64,
    pub coefficients: Coefficients,
}

impl EqualizerBand {
    fn design(
        center_frequency_hz: f64,
        gain_db: f64,
        q: f64,
        sample_rate_hz: f64,
    ) -> Result<Self, EqError> {
        let coefficients = design_peaking_eq(center_frequency_hz, sample_rate_hz, gain_db, q)?;
        Ok(Self {
            center_frequency_hz,
            gain_db,
            q,
            coefficients,
        })
    }

    /// Short label such as `125Hz` or `2kHz`.
    pub fn label(&self) -> String {
        let f = self.center_frequency_hz;
        if f >= 1000.0 {
            let k = f / 1000.0;
            if k.fract() == 0.0 {
                format!("{k:.0}kHz")
            } else {
                format!("{k:.1}kHz")
            }
        } else {
            format!("{f:.0}Hz")
        }
    }
}

/// A bank of peaking bands sharing one sample rate.
///
/// Coefficients are recomputed eagerly whenever a band parameter or the
/// sample rate changes.
#[derive(Debug, Clone)]
pub struct Equalizer {
    sample_rate_hz: f64,
    bands: Vec<EqualizerBand>,
}

impl Equalizer {
    /// Build a flat (0 dB) equalizer with one band per entry in `frequencies`.
    pub fn new(sample_rate_hz: f64, q: f64, frequencies: &[f64]) -> Result<Self, EqError> {
        let bands = frequencies
            .iter()
            .map(|&f| EqualizerBand::design(f, 0.0, q, sample_rate_hz))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            sample_rate_hz,
            bands,
        })
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn bands(&self) -> &[EqualizerBand] {
        &self.bands
    }

    fn band_index(&self, freq_hz: f64) -> Result<usize, EqError> {
        self.bands
            .iter()
            .position(|b| (b.center_frequency_hz - freq_hz).abs() < FREQ_EPSILON)
            .ok_or(EqError::UnknownBand(freq_hz))
    }

    /// Set the gain of the band centered at `freq_hz` and redesign it.
    pub fn set_band_gain(
        &mut self,
        freq_hz: f64,
        gain_db: f64,
    ) -> Result<&EqualizerBand, EqError> {
        let i = self.band_index(freq_hz)?;
        let band = &self.bands[i];
        let redesigned =
            EqualizerBand::design(band.center_frequency_hz, gain_db, band.q, self.sample_rate_hz)?;
        debug!(
            band = %redesigned.label(),
            gain_db,
            coefficients = ?redesigned.coefficients,
            "eq band redesigned"
        );
        self.bands[i] = redesigned;
        Ok(&self.bands[i])
    }

    /// Set the Q of the band centered at `freq_hz` and redesign it.
    pub fn set_band_q(&mut self, freq_hz: f64, q: f64) -> Result<&EqualizerBand, EqError> {
        let i = self.band_index(freq_hz)?;
        let band = &self.bands[i];
        let redesigned =
            EqualizerBand::design(band.center_frequency_hz, band.gain_db, q, self.sample_rate_hz)?;
        self.bands[i] = redesigned;
        Ok(&self.bands[i])
    }

    /// Redesign every band for a new sample rate.
    ///
    /// All bands are validated first; on error nothing changes.
    pub fn set_sample_rate(&mut self, sample_rate_hz: f64) -> Result<(), EqError> {
        for b in &self.bands {
            validate_band(b.center_frequency_hz, sample_rate_hz, b.q)?;
        }
        let bands = self
            .bands
            .iter()
            .map(|b| EqualizerBand::design(b.center_frequency_hz, b.gain_db, b.q, sample_rate_hz))
            .collect::<Result<Vec<_>, _>>()?;
        self.bands = bands;
        self.sample_rate_hz = sample_rate_hz;
        Ok(())
    }

    /// Return every band to 0 dB. On error nothing changes.
    pub fn reset(&mut self) -> Result<(), EqError> {
        let bands = self
            .bands
            .iter()
            .map(|b| EqualizerBand::design(b.center_frequency_hz, 0.0, b.q, self.sample_rate_hz))
            .collect::<Result<Vec<_>, _>>()?;
        self.bands = bands;
        Ok(())
    }
}
