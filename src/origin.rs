use crate::constants::WILDCARD;
use crate::pattern::Pattern;

/// A configured `allow_origin` entry.
///
/// The entry is compared literally unless the policy enables `origin_regex`,
/// in which case the compiled form is used. Entries that do not compile as a
/// regular expression never match in regex mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginEntry {
    value: String,
    pattern: Option<Pattern>,
}

impl OriginEntry {
    pub fn new<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        let pattern = Pattern::new(&value).ok();
        Self { value, pattern }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub(crate) fn is_valid_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    fn matches_literal(&self, origin: &str) -> bool {
        self.value == origin
    }

    fn matches_pattern(&self, origin: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(origin))
    }
}

impl From<&str> for OriginEntry {
    fn from(value: &str) -> Self {
        OriginEntry::new(value)
    }
}

impl From<String> for OriginEntry {
    fn from(value: String) -> Self {
        OriginEntry::new(value)
    }
}

/// Configuration for which request origins are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowOrigin {
    /// Any origin is allowed.
    Any,
    List(Vec<OriginEntry>),
}

impl Default for AllowOrigin {
    fn default() -> Self {
        AllowOrigin::List(Vec::new())
    }
}

impl AllowOrigin {
    pub fn any() -> Self {
        Self::Any
    }

    /// Builds an allow-list; a `"*"` entry turns the whole list into [`Self::Any`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.iter().any(|value| value == WILDCARD) {
            return Self::Any;
        }

        Self::List(values.into_iter().map(OriginEntry::new).collect())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, AllowOrigin::Any)
    }

    pub fn entries(&self) -> &[OriginEntry] {
        match self {
            AllowOrigin::Any => &[],
            AllowOrigin::List(entries) => entries,
        }
    }

    /// Decides whether `origin` is allowed, treating entries as patterns when
    /// `origin_regex` is set.
    pub fn allows(&self, origin: &str, origin_regex: bool) -> bool {
        match self {
            AllowOrigin::Any => true,
            AllowOrigin::List(entries) if origin_regex => entries.iter().any(|entry| {
                let matched = entry.matches_pattern(origin);
                tracing::debug!(pattern = entry.as_str(), origin, matched, "matched origin regex");
                matched
            }),
            AllowOrigin::List(entries) => entries.iter().any(|entry| entry.matches_literal(origin)),
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
