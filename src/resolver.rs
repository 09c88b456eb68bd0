use crate::context::RequestContext;
use crate::options::CorsOptions;
use crate::provider::PolicyProvider;
use std::fmt;
use std::sync::Arc;

/// Resolves the effective options for a request.
pub trait OptionsResolver: Send + Sync {
    fn options(&self, request: &RequestContext<'_>) -> CorsOptions;
}

/// Combines providers by ascending priority. Options of a later (higher
/// priority) provider override those of earlier ones field by field.
#[derive(Clone, Default)]
pub struct Resolver {
    providers: Vec<(i32, Arc<dyn PolicyProvider>)>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider`. Providers with equal priority keep their
    /// registration order.
    pub fn with_provider<P>(mut self, priority: i32, provider: P) -> Self
    where
        P: PolicyProvider + 'static,
    {
        self.register(priority, Arc::new(provider));
        self
    }

    pub fn register(&mut self, priority: i32, provider: Arc<dyn PolicyProvider>) {
        let idx = self
            .providers
            .partition_point(|(existing, _)| *existing <= priority);
        self.providers.insert(idx, (priority, provider));
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl OptionsResolver for Resolver {
    fn options(&self, request: &RequestContext<'_>) -> CorsOptions {
        self.providers
            .iter()
            .fold(CorsOptions::default(), |merged, (_, provider)| {
                merged.merge(provider.options(request))
            })
    }
}

impl<R: OptionsResolver + ?Sized> OptionsResolver for Arc<R> {
    fn options(&self, request: &RequestContext<'_>) -> CorsOptions {
        (**self).options(request)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let priorities: Vec<i32> = self.providers.iter().map(|(priority, _)| *priority).collect();
        f.debug_struct("Resolver")
            .field("priorities", &priorities)
            .finish()
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;
