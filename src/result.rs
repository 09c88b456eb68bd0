use crate::constants::status;
use crate::headers::{HeaderCollection, Headers};

/// Decisions taken in the request phase that the response phase acts on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestState {
    /// The origin passed the check; echo it on the response.
    pub allow_origin: bool,
    /// A forced `Access-Control-Allow-Origin` value is configured.
    pub force_origin: bool,
}

impl RequestState {
    pub fn is_marked(&self) -> bool {
        self.allow_origin || self.force_origin
    }
}

/// Response synthesized for a preflight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResponse {
    pub status: u16,
    pub headers: HeaderCollection,
    pub body: String,
}

impl Default for PreflightResponse {
    fn default() -> Self {
        Self {
            status: status::OK,
            headers: HeaderCollection::new(),
            body: String::new(),
        }
    }
}

impl PreflightResponse {
    pub fn into_headers(self) -> Headers {
        self.headers.into_headers()
    }
}

/// Outcome of the request phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Answer the request with `response` instead of routing it. The response
    /// still goes through the response phase with `state`.
    Preflight {
        response: PreflightResponse,
        state: RequestState,
    },
    /// Handle the request normally and pass `state` to the response phase.
    Continue(RequestState),
}

impl CorsDecision {
    pub fn state(&self) -> RequestState {
        match self {
            CorsDecision::Preflight { state, .. } => *state,
            CorsDecision::Continue(state) => *state,
        }
    }

    pub fn is_preflight(&self) -> bool {
        matches!(self, CorsDecision::Preflight { .. })
    }
}
