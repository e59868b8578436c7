// Scroll state for panels whose content outgrows their surface
//
// Owned by the component; panels and the layout manager never see it.
// Appended content keeps the view on the newest line until the user
// scrolls away from the bottom.

/// Line offset into content that may be taller than its surface
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// First visible line
    offset: usize,
    /// Content length in lines
    total: usize,
    /// Surface height in lines
    viewport: usize,
    /// Pinned to the newest line
    pub auto_follow: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Feed the current content length and surface height; called on every render
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = if self.auto_follow {
            self.max_offset()
        } else {
            self.offset.min(self.max_offset())
        };
    }

    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.detach_at(self.offset - 1);
        }
    }

    pub fn scroll_down(&mut self) {
        self.seek(self.offset + 1);
    }

    pub fn page_up(&mut self) {
        self.detach_at(self.offset.saturating_sub(self.page()));
    }

    pub fn page_down(&mut self) {
        self.seek(self.offset + self.page());
    }

    pub fn scroll_to_top(&mut self) {
        self.detach_at(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.seek(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Half-open range of content lines on screen
    pub fn visible_range(&self) -> (usize, usize) {
        (self.offset, (self.offset + self.viewport).min(self.total))
    }

    /// Move down to `target` (clamped); reaching the last page re-attaches follow
    fn seek(&mut self, target: usize) {
        self.offset = target.min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    fn detach_at(&mut self, target: usize) {
        self.offset = target.min(self.max_offset());
        self.auto_follow = false;
    }

    fn page(&self) -> usize {
        self.viewport.max(1)
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
