//! Highlight state for arrow-key single-select prompts.

/// Position of the highlighted option in a list of `len` options.
///
/// Movement wraps past either end. `len` is never zero; the engine rejects
/// empty option lists before a cursor is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectCursor {
    index: usize,
    len: usize,
}

impl SelectCursor {
    /// Cursor on `initial`, clamped into range.
    pub fn new(initial: usize, len: usize) -> Self {
        let len = len.max(1);
        Self {
            index: initial.min(len - 1),
            len,
        }
    }

    pub fn up(&mut self) {
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
    }

    pub fn down(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn selected(&self) -> usize {
        self.index
    }
}
