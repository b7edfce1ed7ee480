use std::collections::VecDeque;

/// In-memory command history, oldest entry first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        History {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Records `entry` unless it is blank. The oldest entries are dropped once
    /// the capacity is exceeded.
    pub fn add(&mut self, entry: &str) {
        if entry.trim().is_empty() {
            return;
        }

        self.entries.push_back(entry.to_owned());
        self.trim_entries();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Yields `(index, line)` pairs with 1-based indices.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.iter().enumerate().map(|(i, line)| (i + 1, line))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn trim_entries(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}
