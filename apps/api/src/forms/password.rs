use serde::Serialize;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Requirements {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl Requirements {
    pub fn of(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_PASSWORD_LEN,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    pub fn score(&self) -> u8 {
        [
            self.length,
            self.uppercase,
            self.lowercase,
            self.number,
            self.special,
        ]
        .into_iter()
        .filter(|met| *met)
        .count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    Weak,
    Good,
    Strong,
}

impl StrengthLevel {
    fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthLevel::Weak,
            3..=4 => StrengthLevel::Good,
            _ => StrengthLevel::Strong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    MatchStrong,
    Mismatch,
    NotStrongEnough,
}

impl MatchStatus {
    pub fn message(&self) -> &'static str {
        match self {
            MatchStatus::MatchStrong => "Passwords match and are strong!",
            MatchStatus::Mismatch => "Passwords do not match",
            MatchStatus::NotStrongEnough => "Password not strong enough",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordReport {
    pub requirements: Requirements,
    pub score: u8,
    pub level: StrengthLevel,
    pub bar_width_pct: u8,
    /// Present once the confirmation field has content.
    pub match_status: Option<MatchStatus>,
    pub match_message: Option<&'static str>,
    pub submit_enabled: bool,
}

pub fn evaluate_password(password: &str, confirm: &str) -> PasswordReport {
    let requirements = Requirements::of(password);
    let score = requirements.score();

    let match_status = (!confirm.is_empty()).then(|| {
        if password != confirm {
            MatchStatus::Mismatch
        } else if score == 5 {
            MatchStatus::MatchStrong
        } else {
            MatchStatus::NotStrongEnough
        }
    });

    PasswordReport {
        requirements,
        score,
        level: StrengthLevel::from_score(score),
        bar_width_pct: score * 20,
        match_status,
        match_message: match_status.map(|s| s.message()),
        submit_enabled: match_status == Some(MatchStatus::MatchStrong),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_and_matching() {
        let r = evaluate_password("Tr0ub4dor&3", "Tr0ub4dor&3");
        assert_eq!(r.score, 5);
        assert_eq!(r.level, StrengthLevel::Strong);
        assert_eq!(r.bar_width_pct, 100);
        assert!(r.submit_enabled);
        assert_eq!(r.match_message, Some("Passwords match and are strong!"));
    }

    #[test]
    fn test_mismatch_takes_precedence() {
        let r = evaluate_password("abc", "abd");
        assert_eq!(r.match_status, Some(MatchStatus::Mismatch));
        assert!(!r.submit_enabled);
    }

    #[test]
    fn test_matching_but_weak() {
        let r = evaluate_password("password", "password");
        assert_eq!(r.score, 2);
        assert_eq!(r.level, StrengthLevel::Weak);
        assert_eq!(r.match_status, Some(MatchStatus::NotStrongEnough));
    }

    #[test]
    fn test_good_band() {
        let r = evaluate_password("Password1", "");
        assert_eq!(r.score, 4);
        assert_eq!(r.level, StrengthLevel::Good);
        assert_eq!(r.match_status, None);
        assert!(!r.submit_enabled);
    }

    #[test]
    fn test_non_ascii_counts_as_special() {
        assert!(Requirements::of("ü").special);
        assert!(!Requirements::of("abc").special);
    }
}
