use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_VALUE: &str = "default-src 'self'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

/// Adds the security headers to every response of `router`. HSTS is only
/// sent in production, where the service sits behind TLS.
pub fn security_headers<S>(router: Router<S>, production: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = router
        .layer(fixed(header::X_CONTENT_TYPE_OPTIONS, NOSNIFF))
        .layer(fixed(header::X_FRAME_OPTIONS, DENY))
        .layer(fixed(header::CONTENT_SECURITY_POLICY, CSP_VALUE))
        .layer(fixed(header::REFERRER_POLICY, REFERRER_POLICY_VALUE))
        .layer(fixed(
            HeaderName::from_static("permissions-policy"),
            PERMISSIONS_POLICY_VALUE,
        ));

    if production {
        tracing::info!("Security: HSTS header enabled (production mode)");
        router.layer(fixed(header::STRICT_TRANSPORT_SECURITY, HSTS_VALUE))
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
        router
    }
}

fn fixed(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}
