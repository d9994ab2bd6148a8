/// Ordered list of titles the user wants to watch.
///
/// Duplicates are allowed and membership is exact string equality. The panel
/// is redrawn from this list every frame, so there is no separate render state
/// to keep in sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    titles: Vec<String>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, title: impl Into<String>) {
        let title = title.into();
        tracing::info!(title = %title, "added to watchlist");
        self.titles.push(title);
    }

    /// Removes the first entry equal to `title`. Returns whether anything was removed.
    pub fn remove(&mut self, title: &str) -> bool {
        match self.titles.iter().position(|t| t == title) {
            Some(index) => {
                self.titles.remove(index);
                tracing::info!(title, "removed from watchlist");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        tracing::info!(count = self.titles.len(), "watchlist cleared");
        self.titles.clear();
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
