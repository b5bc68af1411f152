use std::fmt;

use serde::Serialize;

use crate::model::Verdict;

pub const VALID_MESSAGE: &str = "All is good! You can publish.";
pub const INVALID_MESSAGE: &str = "There are some errors in your fields.";

/// The two states the sidebar note can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Valid,
    Invalid,
}

impl Status {
    pub fn from_valid(valid: bool) -> Self {
        if valid { Status::Valid } else { Status::Invalid }
    }

    pub fn is_valid(self) -> bool {
        self == Status::Valid
    }

    pub fn message(self) -> &'static str {
        match self {
            Status::Valid => VALID_MESSAGE,
            Status::Invalid => INVALID_MESSAGE,
        }
    }

    /// Note style: `positive` or `negative`.
    pub fn note_kind(self) -> &'static str {
        match self {
            Status::Valid => "positive",
            Status::Invalid => "negative",
        }
    }
}

impl From<&Verdict> for Status {
    fn from(verdict: &Verdict) -> Self {
        Status::from_valid(verdict.valid)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_messages() {
        assert_eq!(Status::Valid.message(), "All is good! You can publish.");
        assert_eq!(
            Status::Invalid.message(),
            "There are some errors in your fields."
        );
        assert_eq!(Status::default(), Status::Valid);
        assert_eq!(Status::from_valid(false).note_kind(), "negative");
    }
}
