//! Clipboard access

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{PortfolioError, Result};

pub trait Clipboard {
    /// # Errors
    /// * `Clipboard` - the write was refused
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Clipboard held in memory; clones share the contents
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
    refuse: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write
    pub fn refusing() -> Self {
        Self {
            contents: Rc::default(),
            refuse: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.refuse {
            return Err(PortfolioError::Clipboard {
                reason: "permission denied".to_string(),
            });
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_contents() {
        let clipboard = MemoryClipboard::new();
        let mut handle = clipboard.clone();
        handle.write_text("ada@example.com").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_refusing() {
        let mut clipboard = MemoryClipboard::refusing();
        let err = clipboard.write_text("x").unwrap_err();
        assert_eq!(err.friendly_message(), "Failed to copy");
        assert_eq!(clipboard.contents(), None);
    }
}
