use std::collections::VecDeque;

/// Bounded narrative log, most recent message first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarrativeLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl NarrativeLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Messages from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_recent_first_and_drops_oldest() {
        let mut log = NarrativeLog::new(3);
        for i in 0..5 {
            log.push(format!("m{i}"));
        }
        let entries: Vec<_> = log.iter().collect();
        assert_eq!(entries, vec!["m4", "m3", "m2"]);
        assert_eq!(log.latest(), Some("m4"));
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut log = NarrativeLog::new(0);
        log.push("a");
        log.push("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest(), Some("b"));
    }
}
