use std::{fmt, str::FromStr};

pub const MINUS_INFINITY_DECIBELS: f64 = -128.0;

/// A gain that converts between linear and decibel representations
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Level {
    linear: f64,
}

/// A level string could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid level '{0}', expected a linear gain such as 0.5 or a decibel value such as -6dB")]
pub struct ParseLevelError(String);

impl Level {
    /// Unity gain (1.0 / 0 dB)
    pub fn unity() -> Self {
        Self::from_linear(1.0)
    }

    /// Zero gain (0.0 / -inf dB)
    pub fn zero() -> Self {
        Self::from_linear(0.0)
    }

    /// Create a level from dB
    pub fn from_db(level_in_db: f64) -> Self {
        if level_in_db <= MINUS_INFINITY_DECIBELS {
            Self::zero()
        } else {
            Self::from_linear(10.0_f64.powf(level_in_db / 20.0))
        }
    }

    /// Convert to dB
    pub fn as_db(&self) -> f64 {
        if self.linear.abs() <= 1e-9 {
            MINUS_INFINITY_DECIBELS
        } else {
            20.0 * self.linear.abs().log10()
        }
    }

    /// Create a level from linear gain
    pub fn from_linear(linear_gain: f64) -> Self {
        Self {
            linear: linear_gain,
        }
    }

    /// Convert to linear gain
    pub fn as_linear(&self) -> f64 {
        self.linear
    }

    /// Convert to linear gain
    pub fn as_linear_f32(&self) -> f32 {
        self.linear as f32
    }

    /// Check if the value represents zero gain
    pub fn is_zero(&self) -> bool {
        self.linear.abs() < 1e-9
    }

    /// Check if the value represents unity gain
    pub fn is_unity(&self) -> bool {
        (self.linear - 1.0).abs() < 1e-9
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let error = || ParseLevelError(text.to_string());

        let lowercase = trimmed.to_ascii_lowercase();

        if let Some(decibels) = lowercase.strip_suffix("db") {
            return decibels
                .trim()
                .parse::<f64>()
                .map(Self::from_db)
                .map_err(|_| error());
        }

        trimmed
            .parse::<f64>()
            .ok()
            .filter(|linear| linear.is_finite())
            .map(Self::from_linear)
            .ok_or_else(error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "-inf dB")
        } else {
            write!(f, "{:.1} dB", self.as_db())
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn db_to_linear() {
        let epsilon = 1e-2;
        assert_relative_eq!(Level::from_db(0.0).as_linear(), 1.0, epsilon = epsilon);
        assert_relative_eq!(Level::from_db(-6.0).as_linear(), 0.5, epsilon = epsilon);
        assert_relative_eq!(Level::from_db(-12.0).as_linear(), 0.25, epsilon = epsilon);
        assert_relative_eq!(Level::from_db(-200.0).as_linear(), 0.0, epsilon = epsilon);
    }

    #[test]
    fn linear_to_db() {
        let epsilon = 0.1;
        assert_relative_eq!(Level::from_linear(1.0).as_db(), 0.0, epsilon = epsilon);
        assert_relative_eq!(Level::from_linear(0.5).as_db(), -6.0, epsilon = epsilon);
        assert_relative_eq!(Level::from_linear(0.0625).as_db(), -24.1, epsilon = epsilon);
        assert_relative_eq!(
            Level::from_linear(0.0).as_db(),
            MINUS_INFINITY_DECIBELS,
            epsilon = epsilon
        );
    }

    #[test]
    fn parses_linear_and_decibel_strings() {
        assert_relative_eq!("0.0625".parse::<Level>().unwrap().as_linear(), 0.0625);
        assert_relative_eq!(
            "-6dB".parse::<Level>().unwrap().as_linear(),
            0.5,
            epsilon = 1e-2
        );
        assert_relative_eq!(
            " -12 db ".parse::<Level>().unwrap().as_linear(),
            0.25,
            epsilon = 1e-2
        );
        assert!("loud".parse::<Level>().is_err());
        assert!("inf".parse::<Level>().is_err());
    }
}
