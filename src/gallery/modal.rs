use crate::options::PictureEntry;

/// Which picture's info panel is open, if any.
#[derive(Debug, Clone, Default)]
pub struct InfoModal {
    entries: Vec<PictureEntry>,
    open: Option<usize>,
}

impl InfoModal {
    /// Closed modal over the picture metadata table.
    #[must_use]
    pub fn new(entries: Vec<PictureEntry>) -> Self {
        Self {
            entries,
            open: None,
        }
    }

    /// Open the panel for picture `index`, replacing any open one.
    ///
    /// Out-of-range indices leave the modal unchanged and return `None`.
    pub fn show(&mut self, index: usize) -> Option<&PictureEntry> {
        let Some(entry) = self.entries.get(index) else {
            log::warn!("no picture metadata for index {index}");
            return None;
        };
        log::info!("{}: {}", entry.title, entry.description);
        self.open = Some(index);
        Some(entry)
    }

    /// Close the panel. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Whether a panel is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Index of the open picture.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.open
    }

    /// Metadata of the open picture.
    #[must_use]
    pub fn current(&self) -> Option<&PictureEntry> {
        self.open.and_then(|i| self.entries.get(i))
    }
}
