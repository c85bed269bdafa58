use std::sync::Arc;

use crate::Timestamp;

#[derive(Clone, Debug, PartialEq)]
pub enum ValueChangeMethod {
    Immediate,
    Linear,
    Exponential,
    Target { time_constant: f64 },
    Curve(Arc<[f64]>),
}

/// A scheduled change to a parameter
///
/// Immediate changes apply at `start_time` and have `end_time == start_time`.
/// Ramps begin at `start_time` from whatever value the parameter holds and
/// arrive at `value` at `end_time`. Targets also begin at `start_time`, but
/// approach `value` until the next change. Curves follow their points evenly
/// between `start_time` and `end_time` and hold the last point, `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterChange {
    pub value: f64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub method: ValueChangeMethod,
}

impl ParameterChange {
    pub fn immediate(value: f64, at_time: Timestamp) -> Self {
        Self {
            value,
            start_time: at_time,
            end_time: at_time,
            method: ValueChangeMethod::Immediate,
        }
    }

    pub fn linear(value: f64, start_time: Timestamp, end_time: Timestamp) -> Self {
        Self::ramp(value, start_time, end_time, ValueChangeMethod::Linear)
    }

    pub fn exponential(value: f64, start_time: Timestamp, end_time: Timestamp) -> Self {
        Self::ramp(value, start_time, end_time, ValueChangeMethod::Exponential)
    }

    pub fn target(value: f64, start_time: Timestamp, time_constant: f64) -> Self {
        Self {
            value,
            start_time,
            end_time: start_time,
            method: ValueChangeMethod::Target { time_constant },
        }
    }

    /// `values` must not be empty
    pub fn curve(values: Arc<[f64]>, start_time: Timestamp, end_time: Timestamp) -> Self {
        debug_assert!(!values.is_empty());

        let value = values.last().copied().unwrap_or_default();
        Self::ramp(value, start_time, end_time, ValueChangeMethod::Curve(values))
    }

    fn ramp(
        value: f64,
        start_time: Timestamp,
        end_time: Timestamp,
        method: ValueChangeMethod,
    ) -> Self {
        Self {
            value,
            start_time,
            end_time: std::cmp::max(start_time, end_time),
            method,
        }
    }
}
