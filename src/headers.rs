use crate::constants::header;
use indexmap::IndexMap;

/// Header name/value pairs in insertion order.
pub type Headers = IndexMap<String, String>;

/// Case-insensitive view over [`Headers`] used for both preflight responses
/// and the host's outgoing response headers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Self::with_estimate(8)
    }

    pub fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers
            .keys()
            .position(|existing| existing.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|idx| self.headers.get_index(idx))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Sets `name`, replacing any existing entry regardless of its casing while
    /// keeping that entry's position.
    pub fn set<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => {
                if let Some((_, existing)) = self.headers.get_index_mut(idx) {
                    *existing = value;
                }
            }
            None => {
                self.headers.insert(name, value);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.position(name)?;
        self.headers.shift_remove_index(idx).map(|(_, value)| value)
    }

    /// Tokens currently listed in `Vary`.
    pub fn vary(&self) -> Vec<String> {
        self.get(header::VARY)
            .map(|value| {
                value
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Puts `value` in front of the existing `Vary` tokens unless it is
    /// already listed.
    pub fn prepend_vary(&mut self, value: &str) {
        let incoming = value.trim();
        if incoming.is_empty() {
            return;
        }

        let mut entries = self.vary();
        if entries
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(incoming))
        {
            return;
        }

        entries.insert(0, incoming.to_string());
        self.set(header::VARY, entries.join(", "));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn into_headers(self) -> Headers {
        self.headers
    }
}

impl From<Headers> for HeaderCollection {
    fn from(headers: Headers) -> Self {
        Self { headers }
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderCollection
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut collection = HeaderCollection::new();
        for (name, value) in iter {
            collection.set(name, value);
        }
        collection
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
