use std::sync::Arc;

use atomic_float::AtomicF64;

pub type ParameterValue = Arc<AtomicF64>;

pub fn make_parameter_value(value: f64) -> ParameterValue {
    Arc::new(AtomicF64::new(value))
}
