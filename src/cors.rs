use crate::constants::{
    PRIVATE_NETWORK_DENIED_BODY, UNAUTHORIZED_HEADER_PREFIX, header, status,
};
use crate::context::RequestContext;
use crate::headers::HeaderCollection;
use crate::policy::CorsPolicy;
use crate::resolver::{OptionsResolver, Resolver};
use crate::result::{CorsDecision, PreflightResponse, RequestState};
use crate::util::{escape_html, normalize_upper};
use tracing::debug;

/// CORS engine driving the request and response phases of one request.
///
/// The engine holds no per-request state: whatever the request phase decides
/// is returned as a [`RequestState`] that the host hands back to
/// [`Cors::on_response`]. Options are resolved again in the response phase, so
/// resolvers must be deterministic for a given request.
#[derive(Debug, Clone)]
pub struct Cors<R = Resolver> {
    resolver: R,
}

impl<R: OptionsResolver> Cors<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    fn resolve(&self, request: &RequestContext<'_>) -> Option<CorsPolicy> {
        let options = self.resolver.options(request);
        if options.is_empty() {
            None
        } else {
            Some(CorsPolicy::from_options(&options))
        }
    }

    /// Request phase. Returns a preflight response to short-circuit with, or
    /// the state to carry to the response phase.
    pub fn on_request(&self, request: &RequestContext<'_>) -> CorsDecision {
        let mut state = RequestState::default();

        if !request.is_main_request {
            debug!("not a main request, skipping CORS checks");
            return CorsDecision::Continue(state);
        }

        let Some(policy) = self.resolve(request) else {
            debug!("no CORS options for request, skipping CORS checks");
            return CorsDecision::Continue(state);
        };

        if let Some(forced) = policy.forced_origin() {
            debug!(forced, "forced allow origin value configured");
            state.force_origin = true;
        }

        let Some(origin) = request.origin else {
            debug!("request has no Origin header, skipping CORS");
            return CorsDecision::Continue(state);
        };

        if policy.skip_same_as_origin && origin == request.scheme_and_host() {
            debug!(origin, "Origin equals the request scheme and host, skipping CORS");
            return CorsDecision::Continue(state);
        }

        if request.is_options()
            && (request.access_control_request_method.is_some()
                || request.access_control_request_private_network.is_some())
        {
            debug!(origin, "answering preflight request");
            return CorsDecision::Preflight {
                response: Self::preflight_response(request, &policy),
                state,
            };
        }

        if !Self::check_origin(request, &policy) {
            return CorsDecision::Continue(state);
        }

        debug!(origin, "origin allowed, CORS headers will be added to the response");
        state.allow_origin = true;
        CorsDecision::Continue(state)
    }

    /// Response phase. Adds the CORS headers decided in the request phase to
    /// `headers`, which may belong to a handler response or to the preflight
    /// response returned by [`Cors::on_request`].
    pub fn on_response(
        &self,
        request: &RequestContext<'_>,
        state: RequestState,
        headers: &mut HeaderCollection,
    ) {
        if !request.is_main_request {
            debug!("not a main request, skip adding CORS response headers");
            return;
        }

        if !state.is_marked() {
            return;
        }

        let Some(policy) = self.resolve(request) else {
            debug!("no CORS options for request, skip adding CORS response headers");
            return;
        };

        if state.allow_origin
            && let Some(origin) = request.origin
        {
            headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);

            if policy.allow_credentials {
                headers.set(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
            }

            if let Some(exposed) = policy.expose_headers.header_value() {
                debug!(%exposed, "setting Access-Control-Expose-Headers");
                headers.set(header::ACCESS_CONTROL_EXPOSE_HEADERS, exposed);
            }
        }

        if state.force_origin
            && let Some(forced) = policy.forced_origin()
        {
            debug!(forced, "overriding Access-Control-Allow-Origin");
            headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, forced);
        }
    }

    fn preflight_response(request: &RequestContext<'_>, policy: &CorsPolicy) -> PreflightResponse {
        let mut response = PreflightResponse::default();
        response.headers.prepend_vary(header::ORIGIN);

        if policy.allow_credentials {
            response
                .headers
                .set(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }

        if let Some(methods) = policy.allow_methods.header_value() {
            response
                .headers
                .set(header::ACCESS_CONTROL_ALLOW_METHODS, methods);
        }

        if policy.allow_headers.is_configured()
            && let Some(allowed) = policy
                .allow_headers
                .header_value(request.access_control_request_headers)
        {
            response
                .headers
                .set(header::ACCESS_CONTROL_ALLOW_HEADERS, allowed);
        }

        if policy.max_age > 0 {
            response
                .headers
                .set(header::ACCESS_CONTROL_MAX_AGE, policy.max_age.to_string());
        }

        if !Self::check_origin(request, policy) {
            response.headers.remove(header::ACCESS_CONTROL_ALLOW_ORIGIN);
            return response;
        }

        let origin = request.origin.unwrap_or_default();
        response
            .headers
            .set(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);

        if request.requests_private_network() {
            if policy.allow_private_network {
                response
                    .headers
                    .set(header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK, "true");
            } else {
                debug!(origin, "private network access is not allowed");
                response.status = status::BAD_REQUEST;
                response.body = PRIVATE_NETWORK_DENIED_BODY.to_string();
            }
        }

        let requested_method = request.access_control_request_method.unwrap_or_default();
        let method = normalize_upper(requested_method);
        if !policy.allow_methods.contains(&method) {
            debug!(%method, "method is not allowed");
            response.status = status::METHOD_NOT_ALLOWED;
            return response;
        }

        if let Some(methods) = policy
            .allow_methods
            .with_requested_spelling(requested_method)
            .and_then(|methods| methods.header_value())
        {
            response
                .headers
                .set(header::ACCESS_CONTROL_ALLOW_METHODS, methods);
        }

        if let Some(requested_headers) = request.access_control_request_headers
            && !requested_headers.is_empty()
            && let Some(unauthorized) = policy.allow_headers.first_unauthorized(requested_headers)
        {
            debug!(header = %unauthorized, "requested header is not allowed");
            response.status = status::BAD_REQUEST;
            response.body = escape_html(&format!("{UNAUTHORIZED_HEADER_PREFIX}{unauthorized}"));
        }

        response
    }

    /// Whether the request's `Origin` is allowed by `policy`.
    pub fn check_origin(request: &RequestContext<'_>, policy: &CorsPolicy) -> bool {
        let origin = request.origin.unwrap_or_default();
        let allowed = policy.allow_origin.allows(origin, policy.origin_regex);
        if allowed {
            debug!(origin, "origin is allowed");
        } else {
            debug!(origin, "origin is not allowed");
        }
        allowed
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
