use crate::constants::{header, method};
use crate::util::{port_of, strip_port};

/// Borrowed view of the parts of an HTTP request the CORS core reads.
///
/// Header fields are `None` when the header is absent; an empty value still
/// counts as present.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    /// `http` or `https`.
    pub scheme: &'a str,
    /// `Host` header value, possibly with a port.
    pub host: &'a str,
    pub path: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
    pub access_control_request_private_network: Option<&'a str>,
    /// `false` for sub requests and internal dispatches, which are never
    /// processed.
    pub is_main_request: bool,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str, scheme: &'a str, host: &'a str, path: &'a str) -> Self {
        Self {
            method,
            scheme,
            host,
            path,
            origin: None,
            access_control_request_method: None,
            access_control_request_headers: None,
            access_control_request_private_network: None,
            is_main_request: true,
        }
    }

    /// Builds a context from a header lookup, such as a framework's header
    /// map. `lookup` receives canonical header names and must match them
    /// case-insensitively. A missing `Host` reads as empty.
    pub fn from_headers<F>(method: &'a str, scheme: &'a str, path: &'a str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        Self {
            origin: lookup(header::ORIGIN),
            access_control_request_method: lookup(header::ACCESS_CONTROL_REQUEST_METHOD),
            access_control_request_headers: lookup(header::ACCESS_CONTROL_REQUEST_HEADERS),
            access_control_request_private_network: lookup(
                header::ACCESS_CONTROL_REQUEST_PRIVATE_NETWORK,
            ),
            ..Self::new(method, scheme, lookup(header::HOST).unwrap_or_default(), path)
        }
    }

    pub fn with_origin(mut self, origin: &'a str) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_request_method(mut self, method: &'a str) -> Self {
        self.access_control_request_method = Some(method);
        self
    }

    pub fn with_request_headers(mut self, headers: &'a str) -> Self {
        self.access_control_request_headers = Some(headers);
        self
    }

    pub fn with_request_private_network(mut self, value: &'a str) -> Self {
        self.access_control_request_private_network = Some(value);
        self
    }

    pub fn as_sub_request(mut self) -> Self {
        self.is_main_request = false;
        self
    }

    pub fn is_options(&self) -> bool {
        self.method.eq_ignore_ascii_case(method::OPTIONS)
    }

    /// Request path, `/` when empty.
    pub fn path_or_root(&self) -> &'a str {
        if self.path.is_empty() { "/" } else { self.path }
    }

    /// Lower-cased host name without port.
    pub fn host_name(&self) -> String {
        strip_port(self.host).to_ascii_lowercase()
    }

    /// `scheme://host[:port]` of the request itself, omitting the default
    /// port of the scheme. Compared against `Origin` for same-origin checks.
    pub fn scheme_and_host(&self) -> String {
        let scheme = self.scheme.to_ascii_lowercase();
        let host = self.host_name();
        let default_port = match scheme.as_str() {
            "https" => Some("443"),
            "http" => Some("80"),
            _ => None,
        };

        match port_of(self.host) {
            Some(port) if Some(port) != default_port => format!("{scheme}://{host}:{port}"),
            _ => format!("{scheme}://{host}"),
        }
    }

    /// True when the request asks for private network access.
    pub fn requests_private_network(&self) -> bool {
        self.access_control_request_private_network
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
