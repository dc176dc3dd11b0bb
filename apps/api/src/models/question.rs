use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// A generated yes/no/maybe question. `pillar` is free text from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YesNoQuestion {
    pub question: String,
    pub pillar: String,
}

/// A generated multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub pillar: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNoMaybe {
    Yes,
    No,
    Maybe,
}

impl YesNoMaybe {
    pub const ALL: [YesNoMaybe; 3] = [YesNoMaybe::Yes, YesNoMaybe::No, YesNoMaybe::Maybe];

    pub fn label(&self, language: Language) -> &'static str {
        let labels = language.labels();
        match self {
            YesNoMaybe::Yes => labels.yes,
            YesNoMaybe::No => labels.no,
            YesNoMaybe::Maybe => labels.maybe,
        }
    }
}

impl FromStr for YesNoMaybe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(YesNoMaybe::Yes),
            "no" => Ok(YesNoMaybe::No),
            "maybe" => Ok(YesNoMaybe::Maybe),
            other => Err(format!("'{other}' is not one of yes, no, maybe")),
        }
    }
}

/// Answer key for the question at `index` (`q0`, `q1`, ...).
pub fn question_key(index: usize) -> String {
    format!("q{index}")
}

/// Inverse of [`question_key`]. Only the canonical spelling is accepted,
/// so `q01` and `q+1` are rejected.
pub fn parse_question_key(key: &str) -> Option<usize> {
    let index: usize = key.strip_prefix('q')?.parse().ok()?;
    (question_key(index) == key).then_some(index)
}
