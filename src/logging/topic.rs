// SPDX-License-Identifier: Apache-2.0 OR MIT
// Named topics: independently filterable channels orthogonal to level

use super::output::OutputTarget;
use super::{Level, LogError};

/// Stable identifier of a live topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TopicId(pub(crate) usize);

impl TopicId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of one topic's settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
    enabled: bool,
    level: Level,
    target: OutputTarget,
}

impl Topic {
    fn new(name: &str, target: OutputTarget, enabled: bool) -> Self {
        Self {
            name: name.to_owned(),
            enabled,
            level: Level::TRACE,
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Minimum level an event needs to pass this topic
    pub fn level(&self) -> Level {
        self.level
    }

    /// Outputs this topic is allowed to reach
    pub fn target(&self) -> OutputTarget {
        self.target
    }

    /// Whether an event at `level` passes this topic's own filter
    pub(crate) fn admits(&self, level: Level) -> bool {
        self.enabled && level >= self.level
    }
}

/// Slot arena of topics
///
/// Ids are slot indices. A removed topic leaves a hole that the next add
/// reuses, so live ids never shift.
#[derive(Debug)]
pub(crate) struct TopicRegistry {
    slots: Vec<Option<Topic>>,
    capacity: Option<usize>,
}

impl TopicRegistry {
    /// `capacity` of None lets the registry grow on demand
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.unwrap_or(0)),
            capacity,
        }
    }

    /// Add a topic, or return the id of an existing topic with that name
    ///
    /// An existing topic keeps its enabled flag, level and target.
    pub(crate) fn add(
        &mut self,
        name: &str,
        target: OutputTarget,
        enabled: bool,
    ) -> Result<TopicId, LogError> {
        if name.is_empty() {
            return Err(LogError::InvalidArgument);
        }
        if let Some((id, _)) = self.find(name) {
            return Ok(id);
        }

        let topic = Topic::new(name, target, enabled);
        if let Some(hole) = self.slots.iter().position(Option::is_none) {
            self.slots[hole] = Some(topic);
            return Ok(TopicId(hole));
        }
        if self.capacity.is_some_and(|max| self.slots.len() >= max) {
            return Err(LogError::Full);
        }
        self.slots.push(Some(topic));
        Ok(TopicId(self.slots.len() - 1))
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<(), LogError> {
        let id = self.get_id(name)?;
        self.slots[id.0] = None;
        Ok(())
    }

    pub(crate) fn get_id(&self, name: &str) -> Result<TopicId, LogError> {
        if name.is_empty() {
            return Err(LogError::InvalidArgument);
        }
        self.find(name).map(|(id, _)| id).ok_or(LogError::NotFound)
    }

    /// Look up a live topic by name
    pub(crate) fn find(&self, name: &str) -> Option<(TopicId, &Topic)> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            slot.as_ref()
                .filter(|topic| topic.name == name)
                .map(|topic| (TopicId(index), topic))
        })
    }

    pub(crate) fn get(&self, id: TopicId) -> Option<&Topic> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Topic, LogError> {
        let id = self.get_id(name)?;
        self.slots[id.0].as_mut().ok_or(LogError::NotFound)
    }

    pub(crate) fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), LogError> {
        self.find_mut(name)?.enabled = enabled;
        Ok(())
    }

    /// Affects only topics that exist right now
    pub(crate) fn set_enabled_all(&mut self, enabled: bool) {
        for topic in self.slots.iter_mut().flatten() {
            topic.enabled = enabled;
        }
    }

    pub(crate) fn set_level(&mut self, name: &str, level: Level) -> Result<(), LogError> {
        self.find_mut(name)?.level = level;
        Ok(())
    }

    /// Lower every level above `max` to `max`
    pub(crate) fn clamp_levels(&mut self, max: Level) {
        for topic in self.slots.iter_mut().flatten() {
            topic.level = topic.level.min(max);
        }
    }

    /// Number of live topics
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
