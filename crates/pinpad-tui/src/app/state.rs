//! Application state

use std::collections::VecDeque;

/// Current screen/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// The pin pad
    #[default]
    PinEntry,

    /// Key binding reference
    Help,
}

/// Severity of an activity entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Success,
    Warning,
}

/// One line in the activity log
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityEntry {
    pub message: String,
    pub level: ActivityLevel,
}

/// Bounded log of widget notifications, newest last
#[derive(Clone, Debug)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(200)
    }
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, level: ActivityLevel, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            message: message.into(),
            level,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Warning, message);
    }

    /// Most recent `count` entries, oldest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(count))
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_drops_oldest() {
        let mut log = ActivityLog::with_capacity(2);
        log.info("one");
        log.success("two");
        log.warning("three");

        let messages: Vec<_> = log.recent(10).map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(log.last().map(|e| e.level), Some(ActivityLevel::Warning));
    }

    #[test]
    fn test_recent_returns_tail() {
        let mut log = ActivityLog::default();
        for i in 0..5 {
            log.info(format!("entry {i}"));
        }
        let messages: Vec<_> = log.recent(2).map(|e| e.message.clone()).collect();
        assert_eq!(messages, vec!["entry 3", "entry 4"]);
    }
}
