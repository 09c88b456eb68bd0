use crate::util::normalize_upper;

/// Configuration for the `Access-Control-Allow-Methods` response header.
///
/// Methods are upper-cased on construction and compared case-sensitively.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AllowMethods(Vec<String>);

impl AllowMethods {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            values
                .into_iter()
                .map(|value| normalize_upper(&value.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, method: &str) -> bool {
        self.0.iter().any(|allowed| allowed == method)
    }

    pub fn header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(", "))
        }
    }

    /// Copy of the list with `requested` appended verbatim when that exact
    /// spelling is not listed yet. Browsers compare the preflight answer
    /// against the method exactly as they sent it (`Link` vs `LINK`).
    pub fn with_requested_spelling(&self, requested: &str) -> Option<AllowMethods> {
        if self.contains(requested) {
            return None;
        }

        let mut extended = self.0.clone();
        extended.push(requested.to_string());
        Some(AllowMethods(extended))
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
