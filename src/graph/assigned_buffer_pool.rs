use std::collections::HashMap;

use crate::OwnedAudioBuffer;

/// Buffers that are currently holding audio for an identifier
pub struct AssignedBufferPool<Identifier> {
    assigned_buffers: HashMap<Identifier, OwnedAudioBuffer>,
}

impl<Identifier> AssignedBufferPool<Identifier>
where
    Identifier: std::cmp::Eq + std::hash::Hash + Copy,
{
    pub fn with_capacity(buffer_count: usize) -> Self {
        Self {
            assigned_buffers: HashMap::with_capacity(buffer_count),
        }
    }

    pub fn remove(&mut self, id: &Identifier) -> Option<OwnedAudioBuffer> {
        self.assigned_buffers.remove(id)
    }

    pub fn add(&mut self, buffer: OwnedAudioBuffer, id: &Identifier) {
        self.assigned_buffers.insert(*id, buffer);
    }

    pub fn get(&self, id: &Identifier) -> Option<&OwnedAudioBuffer> {
        self.assigned_buffers.get(id)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.assigned_buffers.is_empty()
    }

    pub fn remove_next(&mut self) -> Option<(Identifier, OwnedAudioBuffer)> {
        let id = *self.assigned_buffers.keys().next()?;
        self.remove(&id).map(|buffer| (id, buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_all_assignments() {
        let mut pool = AssignedBufferPool::with_capacity(4);

        for id in 0..3 {
            pool.add(OwnedAudioBuffer::new(8, 1, 44_100), &id);
        }

        assert!(pool.get(&1).is_some());

        let mut drained = 0;
        while pool.remove_next().is_some() {
            drained += 1;
        }

        assert_eq!(drained, 3);
        assert!(pool.is_empty());
    }
}
