//! Security response headers applied to every API response.

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; base-uri 'self'; \
     connect-src 'self' api.spam.com; frame-src 'none'; img-src 'self' static.spam.com";
const STRICT_TRANSPORT_SECURITY: &str = "includeSubDomains; preload; max-age=2592000";
const PERMISSIONS_POLICY: &str = "geolocation=(self 'spam.com'), vibrate=()";

/// Header name/value pairs set on every response.
pub fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (header::SERVER, HeaderValue::from_static("Secure")),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(STRICT_TRANSPORT_SECURITY),
        ),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static(PERMISSIONS_POLICY),
        ),
        (header::CACHE_CONTROL, HeaderValue::from_static("must-revalidate")),
    ]
}

/// Layer [`security_headers`] onto `router`, overriding handler values.
pub fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    security_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}
