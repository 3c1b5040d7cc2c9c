use serde::Serialize;

/// Used when a counted textarea carries no usable `maxlength`.
pub const DEFAULT_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharCount {
    pub length: usize,
    pub max: usize,
    /// Drives the red, bold counter style.
    pub at_limit: bool,
}

/// Live counter under a `.counted-text` textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    max: usize,
}

impl Default for CharCounter {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX_CHARS,
        }
    }
}

impl CharCounter {
    /// Reads the textarea's `maxlength`; zero or unparsable falls back to the default.
    pub fn from_maxlength(raw: Option<&str>) -> Self {
        let max = raw
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&m| m > 0)
            .unwrap_or(DEFAULT_MAX_CHARS);
        Self { max }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn count(&self, text: &str) -> CharCount {
        let length = text.chars().count();
        CharCount {
            length,
            max: self.max,
            at_limit: length >= self.max,
        }
    }
}
