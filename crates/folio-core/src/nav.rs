const MAX_HISTORY: usize = 64;

/// Explicit navigation state: the current path plus a bounded back/forward
/// history. Written only by the navigation event source (the key handler);
/// everything downstream reads `current()`.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<String>,
    index: usize,
}

impl Navigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: vec![initial.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.history[self.index]
    }

    /// Programmatic navigation: truncates any forward history, like a
    /// browser address-bar jump.
    pub fn navigate(&mut self, path: impl Into<String>) {
        let path = path.into();
        if path == self.current() {
            return;
        }
        self.history.truncate(self.index + 1);
        self.history.push(path);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.index = self.history.len() - 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.history.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }
}
