use crate::constants::WILDCARD;
use crate::util::normalize_lower;

/// Configuration mirror of the `Access-Control-Expose-Headers` response header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExposeHeaders {
    List(Vec<String>),
    Any,
}

impl Default for ExposeHeaders {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ExposeHeaders {
    /// Builds the list as given; a `"*"` entry turns it into [`Self::Any`].
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
            headers.push(value);
        }

        Self::List(headers)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, ExposeHeaders::Any)
    }

    /// Lower-cased, comma separated header value; `None` for an empty list.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(normalize_lower(&values.join(", "))),
            Self::Any => Some(WILDCARD.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
