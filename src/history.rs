use crate::route::Location;

/// Address bar and session history.
pub trait History {
    /// Current fragment, without the `#`.
    fn fragment(&self) -> String;
    fn push(&mut self, location: &Location);
}

/// Session history kept in memory. Pushing discards forward entries, like a browser.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(fragment: &str) -> Self {
        Self {
            entries: vec![fragment.trim_start_matches('#').to_owned()],
            index: 0,
        }
    }

    /// Never zero; the initial entry is always there.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl History for MemoryHistory {
    fn fragment(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, location: &Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index = self.entries.len() - 1;
    }
}
