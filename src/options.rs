use crate::allowed_headers::AllowHeaders;
use crate::allowed_methods::AllowMethods;
use crate::exposed_headers::ExposeHeaders;
use crate::origin::AllowOrigin;
use crate::pattern::{Pattern, PatternError};
use thiserror::Error;

/// A possibly partial set of CORS options as returned by a provider.
///
/// Unset fields (`None`) leave the value of a lower-priority layer in place
/// when fragments are merged. A fragment with every field unset is empty and
/// disables CORS handling for the request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsOptions {
    pub allow_origin: Option<AllowOrigin>,
    pub origin_regex: Option<bool>,
    pub allow_credentials: Option<bool>,
    pub allow_headers: Option<AllowHeaders>,
    pub allow_methods: Option<AllowMethods>,
    pub allow_private_network: Option<bool>,
    pub expose_headers: Option<ExposeHeaders>,
    pub max_age: Option<u64>,
    pub hosts: Option<Vec<Pattern>>,
    pub forced_allow_origin_value: Option<String>,
    pub skip_same_as_origin: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("expose_headers cannot contain a wildcard (*) when allow_credentials is enabled")]
    ExposeHeadersWildcardWithCredentials,
    #[error("invalid {kind} pattern `{pattern}`")]
    InvalidPattern {
        kind: PatternKind,
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("max_age must be an integer (seconds), got `{0}`")]
    InvalidMaxAge(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Origin,
    Host,
    Path,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PatternKind::Origin => "origin",
            PatternKind::Host => "host",
            PatternKind::Path => "path",
        };
        f.write_str(name)
    }
}

impl ValidationError {
    pub(crate) fn pattern(kind: PatternKind, pattern: &str, source: PatternError) -> Self {
        ValidationError::InvalidPattern {
            kind,
            pattern: pattern.to_string(),
            source,
        }
    }
}

impl CorsOptions {
    pub fn is_empty(&self) -> bool {
        self == &CorsOptions::default()
    }

    /// Shallow merge: every field set in `over` replaces the field in `self`.
    /// Lists are replaced as a whole, never combined.
    pub fn merge(self, over: CorsOptions) -> CorsOptions {
        CorsOptions {
            allow_origin: over.allow_origin.or(self.allow_origin),
            origin_regex: over.origin_regex.or(self.origin_regex),
            allow_credentials: over.allow_credentials.or(self.allow_credentials),
            allow_headers: over.allow_headers.or(self.allow_headers),
            allow_methods: over.allow_methods.or(self.allow_methods),
            allow_private_network: over.allow_private_network.or(self.allow_private_network),
            expose_headers: over.expose_headers.or(self.expose_headers),
            max_age: over.max_age.or(self.max_age),
            hosts: over.hosts.or(self.hosts),
            forced_allow_origin_value: over
                .forced_allow_origin_value
                .or(self.forced_allow_origin_value),
            skip_same_as_origin: over.skip_same_as_origin.or(self.skip_same_as_origin),
        }
    }

    /// Checks the invariants that must hold before options are put into
    /// service.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.allow_credentials == Some(true)
            && self
                .expose_headers
                .as_ref()
                .is_some_and(ExposeHeaders::is_any)
        {
            return Err(ValidationError::ExposeHeadersWildcardWithCredentials);
        }

        if self.origin_regex == Some(true)
            && let Some(origin) = &self.allow_origin
            && let Some(entry) = origin
                .entries()
                .iter()
                .find(|entry| !entry.is_valid_pattern())
            && let Err(err) = Pattern::new(entry.as_str())
        {
            return Err(ValidationError::pattern(
                PatternKind::Origin,
                entry.as_str(),
                err,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
