use crate::constants::header;
use crate::headers::HeaderCollection;
use chrono::{DateTime, Utc};

const CACHEABLE_STATUSES: [u16; 7] = [200, 203, 300, 301, 302, 404, 410];

/// Adds `Origin` to the `Vary` header of cacheable responses, so that caches
/// never serve a response computed for one origin to another.
///
/// Runs for every response, after the CORS response phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheableResponseVary;

impl CacheableResponseVary {
    pub fn new() -> Self {
        Self
    }

    pub fn on_response(&self, status: u16, headers: &mut HeaderCollection) {
        if !is_cacheable(status, headers) {
            return;
        }

        headers.prepend_vary(header::ORIGIN);
    }
}

/// Whether a response may be stored by a shared cache: a cacheable status,
/// no `no-store`/`private` directive, and either a validator or a positive
/// freshness lifetime.
pub fn is_cacheable(status: u16, headers: &HeaderCollection) -> bool {
    is_cacheable_at(status, headers, Utc::now())
}

pub(crate) fn is_cacheable_at(status: u16, headers: &HeaderCollection, now: DateTime<Utc>) -> bool {
    if !CACHEABLE_STATUSES.contains(&status) {
        return false;
    }

    let directives = CacheControl::parse(headers.get(header::CACHE_CONTROL).unwrap_or_default());
    if directives.no_store || directives.private {
        return false;
    }

    if headers.contains(header::ETAG) || headers.contains(header::LAST_MODIFIED) {
        return true;
    }

    let Some(lifetime) = freshness_lifetime(&directives, headers, now) else {
        return false;
    };

    lifetime > current_age(headers, now)
}

/// `s-maxage`, then `max-age`, then `Expires` minus `Date`, in seconds.
fn freshness_lifetime(
    directives: &CacheControl,
    headers: &HeaderCollection,
    now: DateTime<Utc>,
) -> Option<i64> {
    if let Some(seconds) = directives.s_maxage.or(directives.max_age) {
        return Some(i64::try_from(seconds).unwrap_or(i64::MAX));
    }

    let expires = headers.get(header::EXPIRES)?;
    // An unparseable Expires means already expired.
    let Some(expires) = parse_http_date(expires) else {
        return Some(0);
    };

    Some((expires - response_date(headers, now)).num_seconds().max(0))
}

/// `Age` when present, otherwise the time elapsed since `Date`.
fn current_age(headers: &HeaderCollection, now: DateTime<Utc>) -> i64 {
    if let Some(age) = headers.get(header::AGE) {
        return age
            .trim()
            .parse::<u64>()
            .map_or(0, |seconds| i64::try_from(seconds).unwrap_or(i64::MAX));
    }

    (now - response_date(headers, now)).num_seconds().max(0)
}

fn response_date(headers: &HeaderCollection, now: DateTime<Utc>) -> DateTime<Utc> {
    headers
        .get(header::DATE)
        .and_then(parse_http_date)
        .unwrap_or(now)
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

#[derive(Debug, Default)]
struct CacheControl {
    no_store: bool,
    private: bool,
    max_age: Option<u64>,
    s_maxage: Option<u64>,
}

impl CacheControl {
    fn parse(value: &str) -> Self {
        let mut directives = CacheControl::default();
        for directive in value.split(',') {
            let (name, argument) = match directive.split_once('=') {
                Some((name, argument)) => (name.trim(), Some(argument.trim().trim_matches('"'))),
                None => (directive.trim(), None),
            };

            match name.to_ascii_lowercase().as_str() {
                "no-store" => directives.no_store = true,
                "private" => directives.private = true,
                "max-age" => directives.max_age = argument.and_then(|v| v.parse().ok()),
                "s-maxage" => directives.s_maxage = argument.and_then(|v| v.parse().ok()),
                _ => {}
            }
        }
        directives
    }
}

#[cfg(test)]
#[path = "vary_test.rs"]
mod vary_test;
