use crate::context::RequestContext;
use crate::options::{CorsOptions, PatternKind, ValidationError};
use crate::pattern::Pattern;

/// Source of CORS options for a request.
///
/// Implementations must be total: return an empty [`CorsOptions`] when they
/// have no opinion about a request.
pub trait PolicyProvider: Send + Sync {
    fn options(&self, request: &RequestContext<'_>) -> CorsOptions;
}

impl<F> PolicyProvider for F
where
    F: for<'a> Fn(&RequestContext<'a>) -> CorsOptions + Send + Sync,
{
    fn options(&self, request: &RequestContext<'_>) -> CorsOptions {
        self(request)
    }
}

/// Fixed options, returned for every request.
impl PolicyProvider for CorsOptions {
    fn options(&self, _request: &RequestContext<'_>) -> CorsOptions {
        self.clone()
    }
}

#[derive(Debug, Clone)]
struct PathRule {
    pattern: Pattern,
    options: CorsOptions,
}

/// Provider backed by static configuration: one set of defaults and an
/// ordered list of path patterns with option overrides.
///
/// The first path pattern that matches the request path (and whose merged
/// `hosts` accept the request host, when any are set) wins; otherwise the
/// defaults apply.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    defaults: CorsOptions,
    paths: Vec<PathRule>,
}

impl ConfigProvider {
    pub fn new<I, S>(defaults: CorsOptions, paths: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, CorsOptions)>,
        S: AsRef<str>,
    {
        defaults.validate()?;

        let mut rules = Vec::new();
        for (path, options) in paths {
            let path = path.as_ref();
            options.validate()?;
            defaults.clone().merge(options.clone()).validate()?;
            let pattern = Pattern::new(path)
                .map_err(|err| ValidationError::pattern(PatternKind::Path, path, err))?;
            rules.push(PathRule { pattern, options });
        }

        Ok(Self {
            defaults,
            paths: rules,
        })
    }

    pub fn defaults(&self) -> &CorsOptions {
        &self.defaults
    }
}

impl PolicyProvider for ConfigProvider {
    fn options(&self, request: &RequestContext<'_>) -> CorsOptions {
        let uri = request.path_or_root();

        for rule in &self.paths {
            if !rule.pattern.is_match(uri) {
                continue;
            }

            let options = self.defaults.clone().merge(rule.options.clone());
            let hosts = options.hosts.as_deref().unwrap_or_default();
            if hosts.is_empty() {
                tracing::debug!(path = rule.pattern.as_str(), uri, "matched CORS path");
                return options;
            }

            let host = request.host_name();
            if hosts.iter().any(|pattern| pattern.is_match(&host)) {
                tracing::debug!(path = rule.pattern.as_str(), uri, %host, "matched CORS path and host");
                return options;
            }

            tracing::debug!(path = rule.pattern.as_str(), %host, "CORS path matched but host did not");
        }

        self.defaults.clone()
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;
