// SPDX-License-Identifier: Apache-2.0 OR MIT
// Output slots: the console at id 0 plus any number of registered sinks

use super::sink::LogSink;
use super::{Level, LogError};
use std::sync::Arc;

/// Stable identifier of a live output slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputId(pub(crate) usize);

impl OutputId {
    /// The console slot; always present, never removable
    pub const CONSOLE: OutputId = OutputId(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which outputs an event (or a topic) may reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputTarget {
    #[default]
    All,
    Only(OutputId),
}

impl OutputTarget {
    #[inline]
    pub fn admits(self, id: OutputId) -> bool {
        match self {
            OutputTarget::All => true,
            OutputTarget::Only(only) => only == id,
        }
    }
}

impl From<OutputId> for OutputTarget {
    fn from(id: OutputId) -> Self {
        OutputTarget::Only(id)
    }
}

pub(crate) struct OutputSlot {
    pub(crate) sink: Arc<dyn LogSink>,
    pub(crate) level: Level,
}

/// Slot arena of outputs
///
/// Removing a slot leaves a hole; the next add takes the lowest hole.
pub(crate) struct OutputRegistry {
    slots: Vec<Option<OutputSlot>>,
    capacity: Option<usize>,
}

impl OutputRegistry {
    /// `capacity` counts the console slot; None grows on demand
    pub(crate) fn new(console: Arc<dyn LogSink>, level: Level, capacity: Option<usize>) -> Self {
        let mut slots = Vec::with_capacity(capacity.unwrap_or(1));
        slots.push(Some(OutputSlot {
            sink: console,
            level,
        }));
        Self { slots, capacity }
    }

    pub(crate) fn add(&mut self, sink: Arc<dyn LogSink>, level: Level) -> Result<OutputId, LogError> {
        let slot = OutputSlot { sink, level };
        if let Some(hole) = self.slots.iter().position(Option::is_none) {
            self.slots[hole] = Some(slot);
            return Ok(OutputId(hole));
        }
        if self.capacity.is_some_and(|max| self.slots.len() >= max) {
            return Err(LogError::Full);
        }
        self.slots.push(Some(slot));
        Ok(OutputId(self.slots.len() - 1))
    }

    pub(crate) fn remove(&mut self, id: OutputId) -> Result<(), LogError> {
        if id == OutputId::CONSOLE {
            return Err(LogError::Failed);
        }
        let slot = self.slot_mut(id)?;
        *slot = None;
        Ok(())
    }

    pub(crate) fn set_level(&mut self, id: OutputId, level: Level) -> Result<(), LogError> {
        match self.slot_mut(id)? {
            Some(slot) => {
                slot.level = level;
                Ok(())
            }
            None => Err(LogError::NotFound),
        }
    }

    pub(crate) fn set_level_all(&mut self, level: Level) {
        for slot in self.slots.iter_mut().flatten() {
            slot.level = level;
        }
    }

    /// Lower every level above `max` to `max`
    pub(crate) fn clamp_levels(&mut self, max: Level) {
        for slot in self.slots.iter_mut().flatten() {
            slot.level = slot.level.min(max);
        }
    }

    /// Resolve `id` to its slot position; a hole is NotFound
    fn slot_mut(&mut self, id: OutputId) -> Result<&mut Option<OutputSlot>, LogError> {
        let limit = self.capacity.unwrap_or(self.slots.len());
        if id.0 >= limit {
            return Err(LogError::InvalidArgument);
        }
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.is_some() => Ok(slot),
            _ => Err(LogError::NotFound),
        }
    }

    pub(crate) fn get(&self, id: OutputId) -> Option<&OutputSlot> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Length of the slot table, holes included
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Lowest minimum level over live slots
    pub(crate) fn lowest_level(&self) -> Level {
        self.slots
            .iter()
            .flatten()
            .map(|slot| slot.level)
            .min()
            .unwrap_or(Level::MAX)
    }

    /// Drop every slot except the console
    pub(crate) fn clear_extra(&mut self) {
        self.slots.truncate(1);
    }
}
