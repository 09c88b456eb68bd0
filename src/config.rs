use crate::allowed_headers::AllowHeaders;
use crate::allowed_methods::AllowMethods;
use crate::constants::CONFIG_PROVIDER_PRIORITY;
use crate::exposed_headers::ExposeHeaders;
use crate::options::{CorsOptions, PatternKind, ValidationError};
use crate::origin::AllowOrigin;
use crate::pattern::Pattern;
use crate::policy::CorsPolicy;
use crate::provider::ConfigProvider;
use crate::resolver::Resolver;
use indexmap::IndexMap;
use serde::Deserialize;

/// Deserializable CORS configuration: global defaults plus per-path
/// overrides keyed by path pattern, in declaration order.
///
/// Path blocks never switch a default off: `false`, `0` and empty values in
/// a path block are ignored (see [`OptionsConfig::into_path_options`]).
///
/// ```
/// # use bunner_cors_policy::CorsConfig;
/// # fn load(raw: &str) -> Result<CorsConfig, serde_json::Error> { serde_json::from_str(raw) }
/// let config = load(r#"{
///     "defaults": { "allow_origin": ["https://app.example.com"], "allow_methods": ["GET"] },
///     "paths": { "^/api/": { "allow_origin": "*", "max_age": 3600 } }
/// }"#).unwrap();
/// let resolver = config.into_resolver().unwrap();
/// assert_eq!(resolver.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default)]
    pub defaults: OptionsConfig,
    #[serde(default)]
    pub paths: IndexMap<String, OptionsConfig>,
}

/// One block of options as written in configuration. Keys that are left
/// out do not override anything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    pub allow_origin: Option<OneOrMany>,
    pub origin_regex: Option<bool>,
    pub allow_credentials: Option<bool>,
    pub allow_headers: Option<OneOrMany>,
    pub allow_methods: Option<OneOrMany>,
    pub allow_private_network: Option<bool>,
    pub expose_headers: Option<OneOrMany>,
    pub max_age: Option<MaxAge>,
    pub hosts: Option<OneOrMany>,
    pub forced_allow_origin_value: Option<String>,
    pub skip_same_as_origin: Option<bool>,
}

/// A single string (typically `"*"`) or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn is_empty(&self) -> bool {
        match self {
            OneOrMany::One(value) => value.is_empty(),
            OneOrMany::Many(values) => values.is_empty(),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// `max_age` as written: seconds, either numeric or as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MaxAge {
    Seconds(u64),
    Text(String),
}

impl MaxAge {
    fn is_zero(&self) -> bool {
        match self {
            MaxAge::Seconds(seconds) => *seconds == 0,
            MaxAge::Text(text) => text.trim().is_empty() || text.trim() == "0",
        }
    }

    pub fn seconds(&self) -> Result<u64, ValidationError> {
        match self {
            MaxAge::Seconds(seconds) => Ok(*seconds),
            MaxAge::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| ValidationError::InvalidMaxAge(text.clone())),
        }
    }
}

impl OptionsConfig {
    /// Converts the block into typed options, compiling host patterns and
    /// normalizing wildcards and casing.
    pub fn into_options(self) -> Result<CorsOptions, ValidationError> {
        let hosts = self
            .hosts
            .map(|hosts| {
                hosts
                    .into_vec()
                    .iter()
                    .map(|host| {
                        Pattern::new(host)
                            .map_err(|err| ValidationError::pattern(PatternKind::Host, host, err))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let max_age = self.max_age.as_ref().map(MaxAge::seconds).transpose()?;

        Ok(CorsOptions {
            allow_origin: self.allow_origin.map(|v| AllowOrigin::list(v.into_vec())),
            origin_regex: self.origin_regex,
            allow_credentials: self.allow_credentials,
            allow_headers: self.allow_headers.map(|v| AllowHeaders::list(v.into_vec())),
            allow_methods: self.allow_methods.map(|v| AllowMethods::list(v.into_vec())),
            allow_private_network: self.allow_private_network,
            expose_headers: self.expose_headers.map(|v| ExposeHeaders::list(v.into_vec())),
            max_age,
            hosts,
            forced_allow_origin_value: self.forced_allow_origin_value,
            skip_same_as_origin: self.skip_same_as_origin,
        })
    }

    /// Converts a path block. Only values that are set and non-empty
    /// override the defaults: `false`, `0`, empty strings and empty lists are
    /// treated as if the key were missing.
    pub fn into_path_options(self) -> Result<CorsOptions, ValidationError> {
        self.without_empty_values().into_options()
    }

    fn without_empty_values(self) -> Self {
        let truthy = |flag: Option<bool>| flag.filter(|enabled| *enabled);
        let non_empty = |values: Option<OneOrMany>| values.filter(|values| !values.is_empty());

        Self {
            allow_origin: non_empty(self.allow_origin),
            origin_regex: truthy(self.origin_regex),
            allow_credentials: truthy(self.allow_credentials),
            allow_headers: non_empty(self.allow_headers),
            allow_methods: non_empty(self.allow_methods),
            allow_private_network: truthy(self.allow_private_network),
            expose_headers: non_empty(self.expose_headers),
            max_age: self.max_age.filter(|max_age| !max_age.is_zero()),
            hosts: non_empty(self.hosts),
            forced_allow_origin_value: self
                .forced_allow_origin_value
                .filter(|value| !value.is_empty()),
            skip_same_as_origin: truthy(self.skip_same_as_origin),
        }
    }
}

impl CorsConfig {
    /// Builds the path/host matching provider. The `defaults` block is laid
    /// over the built-in defaults, so the provider always yields complete
    /// options.
    pub fn into_provider(self) -> Result<ConfigProvider, ValidationError> {
        let defaults = CorsPolicy::default_options().merge(self.defaults.into_options()?);
        let paths = self
            .paths
            .into_iter()
            .map(|(path, options)| Ok((path, options.into_path_options()?)))
            .collect::<Result<Vec<_>, ValidationError>>()?;

        ConfigProvider::new(defaults, paths)
    }

    /// Resolver with the configuration provider registered at
    /// [`CONFIG_PROVIDER_PRIORITY`]. Further providers registered at a
    /// higher priority override it.
    pub fn into_resolver(self) -> Result<Resolver, ValidationError> {
        let provider = self.into_provider()?;
        Ok(Resolver::new().with_provider(CONFIG_PROVIDER_PRIORITY, provider))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
