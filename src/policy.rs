use crate::allowed_headers::AllowHeaders;
use crate::allowed_methods::AllowMethods;
use crate::exposed_headers::ExposeHeaders;
use crate::options::CorsOptions;
use crate::origin::AllowOrigin;
use crate::pattern::Pattern;

/// Fully resolved CORS policy for one request.
///
/// Built from the merged [`CorsOptions`] of all providers; fields no layer
/// set take their defaults (nothing allowed, `skip_same_as_origin` on).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allow_origin: AllowOrigin,
    pub origin_regex: bool,
    pub allow_credentials: bool,
    pub allow_headers: AllowHeaders,
    pub allow_methods: AllowMethods,
    pub allow_private_network: bool,
    pub expose_headers: ExposeHeaders,
    pub max_age: u64,
    pub hosts: Vec<Pattern>,
    pub forced_allow_origin_value: Option<String>,
    pub skip_same_as_origin: bool,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: AllowOrigin::default(),
            origin_regex: false,
            allow_credentials: false,
            allow_headers: AllowHeaders::default(),
            allow_methods: AllowMethods::default(),
            allow_private_network: false,
            expose_headers: ExposeHeaders::default(),
            max_age: 0,
            hosts: Vec::new(),
            forced_allow_origin_value: None,
            skip_same_as_origin: true,
        }
    }
}

impl CorsPolicy {
    pub fn from_options(options: &CorsOptions) -> Self {
        let defaults = CorsPolicy::default();
        let options = options.clone();
        Self {
            allow_origin: options.allow_origin.unwrap_or(defaults.allow_origin),
            origin_regex: options.origin_regex.unwrap_or(defaults.origin_regex),
            allow_credentials: options
                .allow_credentials
                .unwrap_or(defaults.allow_credentials),
            allow_headers: options.allow_headers.unwrap_or(defaults.allow_headers),
            allow_methods: options.allow_methods.unwrap_or(defaults.allow_methods),
            allow_private_network: options
                .allow_private_network
                .unwrap_or(defaults.allow_private_network),
            expose_headers: options.expose_headers.unwrap_or(defaults.expose_headers),
            max_age: options.max_age.unwrap_or(defaults.max_age),
            hosts: options.hosts.unwrap_or(defaults.hosts),
            forced_allow_origin_value: options.forced_allow_origin_value,
            skip_same_as_origin: options
                .skip_same_as_origin
                .unwrap_or(defaults.skip_same_as_origin),
        }
    }

    /// The forced `Access-Control-Allow-Origin` value, when one is configured
    /// and non-empty.
    pub fn forced_origin(&self) -> Option<&str> {
        self.forced_allow_origin_value
            .as_deref()
            .filter(|value| !value.is_empty())
    }

    /// Full defaults as a fragment, used as the base layer of configuration.
    pub fn default_options() -> CorsOptions {
        let defaults = CorsPolicy::default();
        CorsOptions {
            allow_origin: Some(defaults.allow_origin),
            origin_regex: Some(defaults.origin_regex),
            allow_credentials: Some(defaults.allow_credentials),
            allow_headers: Some(defaults.allow_headers),
            allow_methods: Some(defaults.allow_methods),
            allow_private_network: Some(defaults.allow_private_network),
            expose_headers: Some(defaults.expose_headers),
            max_age: Some(defaults.max_age),
            hosts: Some(defaults.hosts),
            forced_allow_origin_value: None,
            skip_same_as_origin: Some(defaults.skip_same_as_origin),
        }
    }
}

impl From<&CorsOptions> for CorsPolicy {
    fn from(options: &CorsOptions) -> Self {
        CorsPolicy::from_options(options)
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
