use crate::constants::{SIMPLE_HEADERS, WILDCARD};
use crate::util::{normalize_lower, split_header_list};

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowHeaders {
    /// Lower-cased header names.
    List(Vec<String>),
    /// Wildcard: the preflight echoes whatever the browser asked for.
    Any,
}

impl Default for AllowHeaders {
    fn default() -> Self {
        AllowHeaders::List(Vec::new())
    }
}

impl AllowHeaders {
    /// Builds a lower-cased list; a `"*"` entry turns it into [`Self::Any`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut headers = Vec::new();
        for value in values {
            let value = value.into();
            if value == WILDCARD {
                return Self::Any;
            }
            headers.push(normalize_lower(&value));
        }

        Self::List(headers)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, AllowHeaders::Any)
    }

    /// True when the preflight should carry an allow-headers value at all.
    pub fn is_configured(&self) -> bool {
        match self {
            AllowHeaders::Any => true,
            AllowHeaders::List(values) => !values.is_empty(),
        }
    }

    /// Value for `Access-Control-Allow-Headers`, given the request's
    /// `Access-Control-Request-Headers`.
    pub fn header_value(&self, requested: Option<&str>) -> Option<String> {
        let value = match self {
            AllowHeaders::Any => requested.unwrap_or_default().to_string(),
            AllowHeaders::List(values) => values.join(", "),
        };

        if value.is_empty() { None } else { Some(value) }
    }

    /// Returns the first requested header that is neither a simple header nor
    /// configured. Always `None` for the wildcard.
    pub fn first_unauthorized(&self, requested: &str) -> Option<String> {
        let AllowHeaders::List(allowed) = self else {
            return None;
        };

        let requested = normalize_lower(requested.trim());
        split_header_list(&requested)
            .filter(|header| !SIMPLE_HEADERS.contains(header))
            .find(|header| !allowed.iter().any(|allowed| allowed == header))
            .map(str::to_string)
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
