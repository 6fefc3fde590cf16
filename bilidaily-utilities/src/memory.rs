use std::sync::Arc;

use parking_lot::Mutex;

/// Shared capture of logged messages, without timestamps or levels.
#[derive(Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Captured messages joined by newlines, blank lines dropped.
    pub fn contents(&self) -> String {
        self.lines
            .lock()
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_skip_blank_lines() {
        let buffer = LogBuffer::new();
        buffer.push("first");
        buffer.push("  ");
        buffer.push("second");

        let clone = buffer.clone();
        assert_eq!(clone.contents(), "first\nsecond");
        assert_eq!(clone.lines().len(), 3);

        buffer.clear();
        assert!(clone.is_empty());
    }
}
