use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method},
};
use tower::util::MapRequest;
use tracing::debug;

pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// The router behind the method-override rewrite. The rewrite has to run
/// before routing, so it wraps the whole `Router` instead of being a route layer.
pub type SitekeepService = MapRequest<Router, fn(Request) -> Request>;

pub fn with_method_override(router: Router) -> SitekeepService {
    MapRequest::new(router, method_override as fn(Request) -> Request)
}

/// Turn `POST` + `X-HTTP-Method-Override: PUT|PATCH|DELETE` into that method.
pub fn method_override(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }
    let Some(target) = req
        .headers()
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(overridden_method)
    else {
        return req;
    };
    debug!(method = %target, uri = %req.uri(), "applying method override");
    *req.method_mut() = target;
    req
}

fn overridden_method(value: &HeaderValue) -> Option<Method> {
    match value.to_str().ok()?.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
