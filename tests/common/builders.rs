use bunner_cors_policy::constants::{header, method};
use bunner_cors_policy::{
    AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsDecision, CorsOptions, ExposeHeaders,
    HeaderCollection, Pattern, RequestContext, Resolver,
};

#[derive(Default)]
pub struct PolicyBuilder {
    options: CorsOptions,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any_origin(mut self) -> Self {
        self.options.allow_origin = Some(AllowOrigin::any());
        self
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.allow_origin = Some(AllowOrigin::list(origins));
        self
    }

    pub fn origin_regex(mut self, enabled: bool) -> Self {
        self.options.origin_regex = Some(enabled);
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.allow_methods = Some(AllowMethods::list(methods));
        self
    }

    pub fn allow_headers(mut self, headers: AllowHeaders) -> Self {
        self.options.allow_headers = Some(headers);
        self
    }

    pub fn expose_headers(mut self, headers: ExposeHeaders) -> Self {
        self.options.expose_headers = Some(headers);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options.allow_credentials = Some(enabled);
        self
    }

    pub fn private_network(mut self, enabled: bool) -> Self {
        self.options.allow_private_network = Some(enabled);
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.options.max_age = Some(seconds);
        self
    }

    pub fn forced_origin(mut self, value: impl Into<String>) -> Self {
        self.options.forced_allow_origin_value = Some(value.into());
        self
    }

    pub fn skip_same_as_origin(mut self, enabled: bool) -> Self {
        self.options.skip_same_as_origin = Some(enabled);
        self
    }

    pub fn hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|host| Pattern::new(host.as_ref()).expect("valid host pattern"))
            .collect();
        self.options.hosts = Some(hosts);
        self
    }

    pub fn options(self) -> CorsOptions {
        self.options
    }

    pub fn build(self) -> Cors {
        self.options
            .validate()
            .expect("valid CORS configuration");
        Cors::new(Resolver::new().with_provider(0, self.options))
    }
}

/// Owned request description; borrow it as a [`RequestContext`] to run it.
pub struct RequestBuilder {
    method: String,
    scheme: String,
    host: String,
    path: String,
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
    private_network: Option<String>,
    sub_request: bool,
}

impl RequestBuilder {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            scheme: "https".into(),
            host: "api.test".into(),
            path: "/".into(),
            origin: None,
            request_method: None,
            request_headers: None,
            private_network: None,
            sub_request: false,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn private_network(mut self, value: impl Into<String>) -> Self {
        self.private_network = Some(value.into());
        self
    }

    pub fn sub_request(mut self) -> Self {
        self.sub_request = true;
        self
    }

    pub fn context(&self) -> RequestContext<'_> {
        let mut ctx = RequestContext::from_headers(&self.method, &self.scheme, &self.path, |name| {
            match name {
                header::HOST => Some(self.host.as_str()),
                header::ORIGIN => self.origin.as_deref(),
                header::ACCESS_CONTROL_REQUEST_METHOD => self.request_method.as_deref(),
                header::ACCESS_CONTROL_REQUEST_HEADERS => self.request_headers.as_deref(),
                header::ACCESS_CONTROL_REQUEST_PRIVATE_NETWORK => self.private_network.as_deref(),
                _ => None,
            }
        });
        ctx.is_main_request = !self.sub_request;
        ctx
    }

    pub fn on_request(&self, cors: &Cors) -> CorsDecision {
        cors.on_request(&self.context())
    }

    /// Runs both phases the way a host would: a preflight answer goes through
    /// the response phase itself, anything else is handed to a handler that
    /// responds with `handler_headers`.
    pub fn exchange(&self, cors: &Cors, handler_headers: HeaderCollection) -> Exchange {
        let ctx = self.context();
        match cors.on_request(&ctx) {
            CorsDecision::Preflight {
                mut response,
                state,
            } => {
                cors.on_response(&ctx, state, &mut response.headers);
                Exchange {
                    preflight: true,
                    status: response.status,
                    headers: response.headers,
                    body: response.body,
                }
            }
            CorsDecision::Continue(state) => {
                let mut headers = handler_headers;
                cors.on_response(&ctx, state, &mut headers);
                Exchange {
                    preflight: false,
                    status: 200,
                    headers,
                    body: String::new(),
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct Exchange {
    pub preflight: bool,
    pub status: u16,
    pub headers: HeaderCollection,
    pub body: String,
}

pub fn policy() -> PolicyBuilder {
    PolicyBuilder::new()
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}
