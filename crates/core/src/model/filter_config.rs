use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{QuestionId, QuestionRecord};

/// Textual value meaning "no restriction" on a filter dimension.
pub const ALL: &str = "All";

/// Textual value selecting bookmarked questions only.
pub const BOOKMARKED: &str = "Bookmarked";

/// Textual value selecting flagged questions only.
pub const YES: &str = "Yes";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterError {
    #[error("unknown filter dimension: {0}")]
    UnknownDimension(String),

    #[error("invalid value {value:?} for filter {dimension}")]
    InvalidValue {
        dimension: FilterDimension,
        value: String,
    },
}

//
// ─── DIMENSIONS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Category,
    SubCategory,
    Bookmarked,
    Asterisk,
    UpdateFlagged,
    ShuffleUnasked,
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Category => "category",
            Self::SubCategory => "subCategory",
            Self::Bookmarked => "bookmarked",
            Self::Asterisk => "hasAsterisk",
            Self::UpdateFlagged => "isUpdateFlagged",
            Self::ShuffleUnasked => "shuffleUnasked",
        };
        f.write_str(name)
    }
}

impl FromStr for FilterDimension {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "category" => Ok(Self::Category),
            "subcategory" => Ok(Self::SubCategory),
            "bookmarked" | "bookmarks" => Ok(Self::Bookmarked),
            "hasasterisk" | "asterisk" | "starred" => Ok(Self::Asterisk),
            "isupdateflagged" | "updateflagged" | "updates" => Ok(Self::UpdateFlagged),
            "shuffleunasked" | "shuffle" => Ok(Self::ShuffleUnasked),
            _ => Err(FilterError::UnknownDimension(s.to_owned())),
        }
    }
}

//
// ─── CHANGES ───────────────────────────────────────────────────────────────────
//

/// A single edit to one filter dimension.
///
/// `None` / `false` stand for the `"All"` selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Category(Option<String>),
    SubCategory(Option<String>),
    BookmarkedOnly(bool),
    AsteriskOnly(bool),
    UpdateFlaggedOnly(bool),
    ShuffleUnasked(bool),
}

impl FilterChange {
    /// Parse the textual `(dimension, value)` pair a UI control produces.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the dimension is unknown or the value is not one
    /// of the options that dimension accepts.
    pub fn parse(dimension: &str, value: &str) -> Result<Self, FilterError> {
        let dimension: FilterDimension = dimension.parse()?;
        let value = value.trim();
        let invalid = || FilterError::InvalidValue {
            dimension,
            value: value.to_owned(),
        };

        match dimension {
            FilterDimension::Category => Ok(Self::Category(selection(value))),
            FilterDimension::SubCategory => Ok(Self::SubCategory(selection(value))),
            FilterDimension::Bookmarked => match value {
                v if v.eq_ignore_ascii_case(ALL) => Ok(Self::BookmarkedOnly(false)),
                v if v.eq_ignore_ascii_case(BOOKMARKED) => Ok(Self::BookmarkedOnly(true)),
                _ => Err(invalid()),
            },
            FilterDimension::Asterisk => yes_or_all(value)
                .map(Self::AsteriskOnly)
                .ok_or_else(invalid),
            FilterDimension::UpdateFlagged => yes_or_all(value)
                .map(Self::UpdateFlaggedOnly)
                .ok_or_else(invalid),
            FilterDimension::ShuffleUnasked => match value.to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(Self::ShuffleUnasked(true)),
                "false" | "off" | "no" | "0" => Ok(Self::ShuffleUnasked(false)),
                _ => Err(invalid()),
            },
        }
    }

    #[must_use]
    pub fn dimension(&self) -> FilterDimension {
        match self {
            Self::Category(_) => FilterDimension::Category,
            Self::SubCategory(_) => FilterDimension::SubCategory,
            Self::BookmarkedOnly(_) => FilterDimension::Bookmarked,
            Self::AsteriskOnly(_) => FilterDimension::Asterisk,
            Self::UpdateFlaggedOnly(_) => FilterDimension::UpdateFlagged,
            Self::ShuffleUnasked(_) => FilterDimension::ShuffleUnasked,
        }
    }
}

fn selection(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value.to_owned())
    }
}

fn yes_or_all(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case(ALL) {
        Some(false)
    } else if value.eq_ignore_ascii_case(YES) {
        Some(true)
    } else {
        None
    }
}

//
// ─── CONFIGURATION ─────────────────────────────────────────────────────────────
//

/// Active filter selection for a session.
///
/// The default configuration selects everything in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FilterConfig {
    category: Option<String>,
    sub_category: Option<String>,
    bookmarked_only: bool,
    asterisk_only: bool,
    update_flagged_only: bool,
    shuffle_unasked: bool,
}

impl FilterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one change. Any category change resets the sub-category to `All`.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Category(category) => {
                self.category = category;
                self.sub_category = None;
            }
            FilterChange::SubCategory(sub_category) => self.sub_category = sub_category,
            FilterChange::BookmarkedOnly(flag) => self.bookmarked_only = flag,
            FilterChange::AsteriskOnly(flag) => self.asterisk_only = flag,
            FilterChange::UpdateFlaggedOnly(flag) => self.update_flagged_only = flag,
            FilterChange::ShuffleUnasked(flag) => self.shuffle_unasked = flag,
        }
    }

    /// Restore every dimension to `All`, optionally keeping the shuffle policy.
    pub fn reset(&mut self, keep_shuffle: bool) {
        let shuffle = keep_shuffle && self.shuffle_unasked;
        *self = Self {
            shuffle_unasked: shuffle,
            ..Self::default()
        };
    }

    /// Returns true when a record passes every active dimension.
    #[must_use]
    pub fn matches(&self, record: &QuestionRecord, bookmarked: &BTreeSet<QuestionId>) -> bool {
        if let Some(category) = &self.category {
            if record.category() != category {
                return false;
            }
        }
        if let Some(sub_category) = &self.sub_category {
            if record.sub_category() != sub_category {
                return false;
            }
        }
        if self.bookmarked_only && !bookmarked.contains(record.id()) {
            return false;
        }
        if self.asterisk_only && !record.has_asterisk() {
            return false;
        }
        if self.update_flagged_only && !record.is_update_flagged() {
            return false;
        }
        true
    }

    /// Returns true when no dimension narrows the record set.
    #[must_use]
    pub fn selects_all(&self) -> bool {
        self.category.is_none()
            && self.sub_category.is_none()
            && !self.bookmarked_only
            && !self.asterisk_only
            && !self.update_flagged_only
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn sub_category(&self) -> Option<&str> {
        self.sub_category.as_deref()
    }

    #[must_use]
    pub fn bookmarked_only(&self) -> bool {
        self.bookmarked_only
    }

    #[must_use]
    pub fn asterisk_only(&self) -> bool {
        self.asterisk_only
    }

    #[must_use]
    pub fn update_flagged_only(&self) -> bool {
        self.update_flagged_only
    }

    #[must_use]
    pub fn shuffle_unasked(&self) -> bool {
        self.shuffle_unasked
    }
}
