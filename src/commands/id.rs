use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a node or parameter for the lifetime of the process
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id {
    raw_id: u64,
}

impl Id {
    /// A new identifier, unique within the process
    pub fn generate() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);

        Self {
            raw_id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The raw value, for logging
    pub fn as_u64(&self) -> u64 {
        self.raw_id
    }
}
