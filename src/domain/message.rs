// ============================================================
// Layer 3: Labeled Message Domain Type
// ============================================================
// One SMS message together with its ground-truth class.
//
// The CSV stores labels as the strings "ham" and "spam".
// Models work with the numeric codes ham = 0, spam = 1,
// so Label owns both representations in one place.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two classes of the SMS spam dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate message, numeric code 0
    Ham,
    /// Unsolicited message, numeric code 1
    Spam,
}

impl Label {
    /// Numeric code used by the models (ham = 0, spam = 1)
    pub fn code(self) -> u8 {
        match self {
            Label::Ham  => 0,
            Label::Spam => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Ham  => "ham",
            Label::Spam => "spam",
        }
    }

    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a CSV label is neither "ham" nor "spam".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label '{0}', expected 'ham' or 'spam'")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ham"  => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            other  => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// A complete training/evaluation example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledMessage {
    pub text:  String,
    pub label: Label,
}

impl LabeledMessage {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self { text: text.into(), label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_codes() {
        assert_eq!(Label::Ham.code(), 0);
        assert_eq!(Label::Spam.code(), 1);
        assert!(Label::Spam.is_spam());
        assert!(!Label::Ham.is_spam());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" spam ".parse::<Label>(), Ok(Label::Spam));
        assert_eq!("ham".parse::<Label>(), Ok(Label::Ham));
    }

    #[test]
    fn test_parse_rejects_other_labels() {
        assert!("Spam".parse::<Label>().is_err());
        assert!("".parse::<Label>().is_err());
    }
}
