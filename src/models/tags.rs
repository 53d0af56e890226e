use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

pub const KNOWN_STRATEGIES: &[&str] = &["ICT", "Scalping", "Swing", "Breakout", "SMC", "OrderBlocks"];

pub const KNOWN_EMOTIONS: &[&str] = &[
    "Confident",
    "Focused",
    "Calm",
    "Rushed",
    "Uncertain",
    "Fearful",
    "Greedy",
];

pub const KNOWN_MISTAKES: &[&str] = &[
    "Early Exit",
    "No Stop Loss",
    "Overleveraged",
    "FOMO Entry",
    "Revenge Trading",
];

const MAX_TAG_LEN: usize = 32;

/// A user-extensible label (strategy, emotion, mistake).
///
/// Open-ended on purpose: any short name made of letters, digits, spaces,
/// `-` or `_` is accepted, so new tags need no code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn parse(kind: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim();
        let valid = !value.is_empty()
            && value.chars().count() <= MAX_TAG_LEN
            && value
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'));
        if !valid {
            return Err(ValidationError::InvalidTag {
                kind,
                value: raw.to_string(),
            });
        }
        Ok(Tag(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Parse a list of mistake tags, dropping repeats but keeping first-seen order.
pub fn parse_mistakes<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Tag>, ValidationError> {
    let mut out: Vec<Tag> = Vec::with_capacity(raw.len());
    for r in raw {
        let tag = Tag::parse("mistake", r.as_ref())?;
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    Ok(out)
}
