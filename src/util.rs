#[doc(hidden)]
pub fn normalize_lower(value: &str) -> String {
    if value.is_ascii() {
        let mut owned = value.to_owned();
        owned.make_ascii_lowercase();
        owned
    } else {
        value.to_lowercase()
    }
}

#[doc(hidden)]
pub fn normalize_upper(value: &str) -> String {
    if value.is_ascii() {
        let mut owned = value.to_owned();
        owned.make_ascii_uppercase();
        owned
    } else {
        value.to_uppercase()
    }
}

#[doc(hidden)]
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }

    a.to_lowercase() == b.to_lowercase()
}

/// Splits a comma separated header line, trimming spaces around each item and
/// dropping empty items.
///
/// Stray commas and padding are tolerated: `"foo, "` yields only `foo`, so an
/// empty item is never reported as an unauthorized header.
pub(crate) fn split_header_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(|part| part.trim_matches(' '))
        .filter(|part| !part.is_empty())
}

/// Escapes the characters that are significant in HTML text and attributes.
///
/// Single quotes become `&#039;`. Everything else passes through unchanged,
/// including non-ASCII text.
pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Returns the host part of a `Host` header value, without any port.
pub(crate) fn strip_port(authority: &str) -> &str {
    let authority = authority.trim();
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => authority,
    }
}

/// Returns the port of a `Host` header value, if one is present.
pub(crate) fn port_of(authority: &str) -> Option<&str> {
    let authority = authority.trim();
    let host = strip_port(authority);
    authority
        .get(host.len()..)
        .and_then(|rest| rest.strip_prefix(':'))
        .filter(|port| !port.is_empty())
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
