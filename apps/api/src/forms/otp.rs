use serde::Serialize;

pub const OTP_LEN: usize = 6;

/// The six one-character boxes of the verification page and which one has focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OtpEntry {
    boxes: [String; OTP_LEN],
    focus: usize,
}

impl OtpEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Sets box `index`; a single character moves focus to the next box.
    pub fn input(&mut self, index: usize, value: &str) {
        let Some(slot) = self.boxes.get_mut(index) else {
            return;
        };
        *slot = value.to_string();
        self.focus = index;
        if value.chars().count() == 1 && index < OTP_LEN - 1 {
            self.focus = index + 1;
        }
    }

    /// Backspace in an empty box moves focus to the previous one.
    pub fn backspace(&mut self, index: usize) {
        if index >= OTP_LEN {
            return;
        }
        self.focus = index;
        if self.boxes[index].is_empty() && index > 0 {
            self.focus = index - 1;
        }
    }

    /// Value of the combined hidden field.
    pub fn code(&self) -> String {
        self.boxes.concat()
    }

    pub fn is_complete(&self) -> bool {
        self.boxes
            .iter()
            .all(|b| b.len() == 1 && b.bytes().all(|c| c.is_ascii_digit()))
    }
}
