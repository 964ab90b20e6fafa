//! Cached value model.
//!
//! [`CachedValue`] is what the stores hold. Absence of a result is a stored
//! variant of its own, so "computed, and there is nothing" is never confused
//! with "not computed yet".

use crate::store::StoreError;

const TEXT_TAG: &str = "t:";
const ABSENT_MARKER: &str = "-";
const FLAG_FALSE: &str = "b:0";
const FLAG_TRUE: &str = "b:1";

/// A memoized view result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// Formatted markup or text.
    Text(String),
    /// The view was computed and has no value.
    Absent,
    /// A boolean flag.
    Flag(bool),
}

impl CachedValue {
    /// Encodes the value for stores that only hold opaque strings.
    ///
    /// Text is always tagged, so no text value can decode as
    /// [`CachedValue::Absent`].
    ///
    /// # Examples
    ///
    /// ```
    /// use threadview_cache::cache::CachedValue;
    ///
    /// assert_eq!(CachedValue::Text("-".into()).encode(), "t:-");
    /// assert_eq!(CachedValue::Absent.encode(), "-");
    /// assert_eq!(CachedValue::Flag(true).encode(), "b:1");
    /// ```
    pub fn encode(&self) -> String {
        match self {
            Self::Text(text) => format!("{}{}", TEXT_TAG, text),
            Self::Absent => ABSENT_MARKER.to_string(),
            Self::Flag(false) => FLAG_FALSE.to_string(),
            Self::Flag(true) => FLAG_TRUE.to_string(),
        }
    }

    /// Decodes a value produced by [`CachedValue::encode`].
    pub fn decode(key: &str, raw: &str) -> Result<Self, StoreError> {
        if let Some(text) = raw.strip_prefix(TEXT_TAG) {
            return Ok(Self::Text(text.to_string()));
        }
        match raw {
            ABSENT_MARKER => Ok(Self::Absent),
            FLAG_FALSE => Ok(Self::Flag(false)),
            FLAG_TRUE => Ok(Self::Flag(true)),
            _ => Err(StoreError::corrupt(key, "unrecognized encoding")),
        }
    }
}

/// Conversion between an accessor's result type and [`CachedValue`].
///
/// `from_cached` returns `None` when the stored variant doesn't fit the
/// type; the cache treats that as a miss.
pub trait ViewValue: Sized {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: CachedValue) -> Option<Self>;
}

impl ViewValue for String {
    fn into_cached(self) -> CachedValue {
        CachedValue::Text(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl ViewValue for Option<String> {
    fn into_cached(self) -> CachedValue {
        match self {
            Some(text) => CachedValue::Text(text),
            None => CachedValue::Absent,
        }
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Text(text) => Some(Some(text)),
            CachedValue::Absent => Some(None),
            CachedValue::Flag(_) => None,
        }
    }
}

impl ViewValue for bool {
    fn into_cached(self) -> CachedValue {
        CachedValue::Flag(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Flag(flag) => Some(flag),
            _ => None,
        }
    }
}
