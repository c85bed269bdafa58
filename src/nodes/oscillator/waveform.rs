use std::{f64::consts::TAU, str::FromStr};

use crate::Level;

const WAVETABLE_LENGTH: usize = 4096;
const HARMONIC_COUNT: usize = 64;

/// The shape of an oscillator's output
#[derive(Clone, Debug, PartialEq)]
pub enum Waveform {
    /// A pure tone
    Sine,

    /// Odd harmonics at `1/n`
    Square,

    /// A ramp that rises through each period
    Sawtooth,

    /// A ramp that falls through each period
    FallingSawtooth,

    /// Odd harmonics at `1/n²` with alternating sign
    Triangle,

    /// The level of each harmonic, starting at the fundamental
    Custom(Vec<Level>),
}

/// A waveform name that isn't recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown waveform: {0}")]
pub struct ParseWaveformError(String);

impl FromStr for Waveform {
    type Err = ParseWaveformError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "sawtooth" => Ok(Waveform::Sawtooth),
            "falling_sawtooth" => Ok(Waveform::FallingSawtooth),
            "triangle" => Ok(Waveform::Triangle),
            _ => Err(ParseWaveformError(name.to_string())),
        }
    }
}

impl Waveform {
    fn harmonic_amplitude(&self, harmonic: usize) -> f64 {
        let n = harmonic as f64;
        let is_odd = harmonic % 2 == 1;

        match self {
            Waveform::Sine => {
                if harmonic == 1 {
                    1.0
                } else {
                    0.0
                }
            }
            Waveform::Square => {
                if is_odd {
                    1.0 / n
                } else {
                    0.0
                }
            }
            Waveform::Sawtooth => {
                let sign = if is_odd { 1.0 } else { -1.0 };
                sign / n
            }
            Waveform::FallingSawtooth => {
                let sign = if is_odd { -1.0 } else { 1.0 };
                sign / n
            }
            Waveform::Triangle => {
                if is_odd {
                    let sign = if (harmonic / 2) % 2 == 0 { 1.0 } else { -1.0 };
                    sign / (n * n)
                } else {
                    0.0
                }
            }
            Waveform::Custom(levels) => levels
                .get(harmonic - 1)
                .map_or(0.0, |level| level.as_linear()),
        }
    }

    fn harmonic_count(&self) -> usize {
        match self {
            Waveform::Sine => 1,
            Waveform::Custom(levels) => levels.len(),
            _ => HARMONIC_COUNT,
        }
    }

    /// One period of the waveform, normalised to a peak of 1
    ///
    /// A waveform without any harmonics produces silence.
    pub fn wavetable(&self) -> Vec<f64> {
        let mut table = vec![0.0; WAVETABLE_LENGTH];

        for harmonic in 1..=self.harmonic_count() {
            let amplitude = self.harmonic_amplitude(harmonic);

            if amplitude == 0.0 {
                continue;
            }

            for (index, value) in table.iter_mut().enumerate() {
                let phase = index as f64 / WAVETABLE_LENGTH as f64;
                *value += amplitude * (TAU * harmonic as f64 * phase).sin();
            }
        }

        let peak = table
            .iter()
            .fold(0.0_f64, |peak, value| peak.max(value.abs()));

        if peak > 0.0 {
            table.iter_mut().for_each(|value| *value /= peak);
        }

        table
    }
}
