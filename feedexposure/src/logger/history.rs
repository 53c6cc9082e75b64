//! Bounded, newest-first history of formatted log lines.

use std::collections::VecDeque;

/// Default number of lines retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Newest-first ring of log lines with a hard retention cap.
///
/// Not synchronised on its own; the logger keeps it behind its mutex.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Insert a line at the front, dropping the oldest lines beyond the cap.
    ///
    /// Returns how many lines were dropped.
    pub fn push_front(&mut self, line: String) -> usize {
        self.lines.push_front(line);
        let excess = self.lines.len().saturating_sub(self.capacity);
        self.lines.truncate(self.capacity);
        excess
    }

    /// Independent copy of the lines, newest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// Most recent line, if any.
    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut history = HistoryBuffer::new(10);
        history.push_front("one".to_string());
        history.push_front("two".to_string());
        history.push_front("three".to_string());

        assert_eq!(history.snapshot(), vec!["three", "two", "one"]);
        assert_eq!(history.latest(), Some("three"));
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut history = HistoryBuffer::new(2);
        assert_eq!(history.push_front("one".to_string()), 0);
        assert_eq!(history.push_front("two".to_string()), 0);
        assert_eq!(history.push_front("three".to_string()), 1);

        assert_eq!(history.snapshot(), vec!["three", "two"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_zero_capacity_raised_to_one() {
        let mut history = HistoryBuffer::new(0);
        assert_eq!(history.capacity(), 1);

        history.push_front("one".to_string());
        history.push_front("two".to_string());
        assert_eq!(history.snapshot(), vec!["two"]);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut history = HistoryBuffer::new(4);
        history.push_front("one".to_string());

        let mut copy = history.snapshot();
        copy.push("injected".to_string());
        copy[0] = "mutated".to_string();

        assert_eq!(history.snapshot(), vec!["one"]);
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryBuffer::default();
        history.push_front("one".to_string());
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }
}
