use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The model subsets a Rama-Z score is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsetLabel {
    Whole,
    Helix,
    Sheet,
    Loop,
}

impl SubsetLabel {
    /// Report order.
    pub const ALL: [SubsetLabel; 4] = [
        SubsetLabel::Whole,
        SubsetLabel::Helix,
        SubsetLabel::Sheet,
        SubsetLabel::Loop,
    ];

    /// Secondary-structure partitions, without the whole model.
    pub const PARTITIONS: [SubsetLabel; 3] =
        [SubsetLabel::Helix, SubsetLabel::Sheet, SubsetLabel::Loop];

    pub fn as_str(self) -> &'static str {
        match self {
            SubsetLabel::Whole => "whole",
            SubsetLabel::Helix => "helix",
            SubsetLabel::Sheet => "sheet",
            SubsetLabel::Loop => "loop",
        }
    }
}

impl fmt::Display for SubsetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width specifiers such as `{:<5}` working.
        f.pad(self.as_str())
    }
}

impl FromStr for SubsetLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown subset '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_honours_padding() {
        assert_eq!(format!("{:<5}|", SubsetLabel::Loop), "loop |");
        assert_eq!(format!("{:<5}|", SubsetLabel::Whole), "whole|");
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("Helix".parse(), Ok(SubsetLabel::Helix));
        assert!("strand".parse::<SubsetLabel>().is_err());
    }

    #[test]
    fn report_order_starts_with_whole() {
        assert_eq!(SubsetLabel::ALL[0], SubsetLabel::Whole);
        assert!(!SubsetLabel::PARTITIONS.contains(&SubsetLabel::Whole));
    }
}
