//! Comma-joined "virtual list" fields.
//!
//! The data layer stores `location` and `cuisine_type` as a single string such
//! as `"Anděl, Letná"`. [`MultiValueField`] splits it once on construction and
//! keeps both the raw text and the tokens, so consumers never re-split.

use serde::{Deserialize, Serialize};

use crate::text::title_case;

/// Splits on commas and trims each token, dropping empty ones.
///
/// Used wherever tokens are compared or used as keys: location grouping,
/// exact cuisine grouping, filter matching and branch coordinate lookup.
#[must_use]
pub fn split_raw(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Splits like [`split_raw`], then applies [`title_case`] to each token.
///
/// Used for display and set deduplication: the filter option calculator and
/// the distinct location / cuisine lists.
#[must_use]
pub fn split_normalized_display(field: &str) -> Vec<String> {
    split_raw(field).into_iter().map(title_case).collect()
}

/// A comma-separated field parsed on read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MultiValueField {
    raw: String,
    tokens: Vec<String>,
}

impl MultiValueField {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tokens = split_raw(&raw).into_iter().map(str::to_string).collect();
        Self { raw, tokens }
    }

    /// The field exactly as stored.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed, non-empty tokens in source order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens in display form (first letter upper, rest lower).
    #[must_use]
    pub fn display_tokens(&self) -> Vec<String> {
        self.tokens.iter().map(|t| title_case(t)).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Case-insensitive membership test against the raw tokens.
    #[must_use]
    pub fn contains_ignore_case(&self, value: &str) -> bool {
        let needle = value.trim().to_lowercase();
        self.tokens.iter().any(|t| t.to_lowercase() == needle)
    }
}

impl From<String> for MultiValueField {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for MultiValueField {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<MultiValueField> for String {
    fn from(field: MultiValueField) -> Self {
        field.raw
    }
}

impl std::fmt::Display for MultiValueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
