use serde::Serialize;

/// Five minutes, the lifetime of an emailed code.
pub const OTP_VALIDITY_SECS: u32 = 300;

pub const EXPIRED_LABEL: &str = "Expired";

/// The countdown shown under the OTP boxes, advanced once per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OtpCountdown {
    remaining: u32,
    expired: bool,
}

impl Default for OtpCountdown {
    fn default() -> Self {
        Self::new(OTP_VALIDITY_SECS)
    }
}

impl OtpCountdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            expired: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// One second passes. `0:00` is still shown once before expiry.
    pub fn tick(&mut self) {
        if self.remaining == 0 {
            self.expired = true;
        } else {
            self.remaining -= 1;
        }
    }

    /// `m:ss`, or `Expired`.
    pub fn label(&self) -> String {
        if self.expired {
            return EXPIRED_LABEL.to_string();
        }
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
