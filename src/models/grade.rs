//! The four qualitative outcomes of a single review.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Forgot the answer.
    Again,
    /// Recalled with difficulty.
    Hard,
    /// Recalled normally.
    Good,
    /// Recalled effortlessly.
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grade '{0}', expected again, hard, good, easy or 1-4")]
pub struct ParseGradeError(pub String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "1" => Ok(Grade::Again),
            "hard" | "2" => Ok(Grade::Hard),
            "good" | "3" => Ok(Grade::Good),
            "easy" | "4" => Ok(Grade::Easy),
            _ => Err(ParseGradeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_digits() {
        assert_eq!("again".parse::<Grade>(), Ok(Grade::Again));
        assert_eq!("Hard".parse::<Grade>(), Ok(Grade::Hard));
        assert_eq!(" good ".parse::<Grade>(), Ok(Grade::Good));
        assert_eq!("4".parse::<Grade>(), Ok(Grade::Easy));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("perfect".parse::<Grade>().is_err());
        assert!("0".parse::<Grade>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Grade::Easy).unwrap();
        assert_eq!(json, "\"easy\"");
        let grade: Grade = serde_json::from_str("\"again\"").unwrap();
        assert_eq!(grade, Grade::Again);
    }
}
