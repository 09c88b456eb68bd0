pub mod constants;
mod allowed_headers;
mod allowed_methods;
mod config;
mod context;
mod cors;
mod exposed_headers;
mod headers;
mod options;
mod origin;
mod pattern;
mod policy;
mod provider;
mod resolver;
mod result;
mod util;
mod vary;

pub use allowed_headers::AllowHeaders;
pub use allowed_methods::AllowMethods;
pub use config::{CorsConfig, MaxAge, OneOrMany, OptionsConfig};
pub use context::RequestContext;
pub use cors::Cors;
pub use exposed_headers::ExposeHeaders;
pub use headers::{HeaderCollection, Headers};
pub use options::{CorsOptions, PatternKind, ValidationError};
pub use origin::{AllowOrigin, OriginEntry};
pub use pattern::{Pattern, PatternError};
pub use policy::CorsPolicy;
pub use provider::{ConfigProvider, PolicyProvider};
pub use resolver::{OptionsResolver, Resolver};
pub use result::{CorsDecision, PreflightResponse, RequestState};
pub use util::{equals_ignore_case, normalize_lower};
pub use vary::{CacheableResponseVary, is_cacheable};
