/// The default, minimum and maximum values of a parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterRange {
    default: f64,
    minimum: f64,
    maximum: f64,
}

impl ParameterRange {
    /// Create a range
    ///
    /// Panics if the minimum is above the maximum or the default is outside
    /// the range.
    pub fn new(default: f64, minimum: f64, maximum: f64) -> Self {
        let range = Self {
            default,
            minimum,
            maximum,
        };

        assert!(range.is_valid(), "Invalid parameter range: {range:?}");

        range
    }

    /// A range with no bounds
    pub fn unbounded(default: f64) -> Self {
        Self::new(default, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// The initial value of the parameter
    pub fn default(&self) -> f64 {
        self.default
    }

    /// The lowest value the parameter can take
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// The highest value the parameter can take
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    fn is_valid(&self) -> bool {
        self.minimum <= self.maximum && (self.minimum..=self.maximum).contains(&self.default)
    }

    /// Limit a value to the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.minimum, self.maximum)
    }
}
