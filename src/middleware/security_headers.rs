use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Middleware to add security and caching headers to all responses
///
/// # Headers
///
/// - **X-Content-Type-Options**: Prevent MIME type sniffing
/// - **X-XSS-Protection**: Enable browser XSS protection
/// - **Cache-Control / Pragma / Expires / Surrogate-Control**: Never cache
///   anything, so clients always load the current game scripts
/// - **X-Powered-By**: Report a decoy stack instead of the real one
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();

    // Prevent MIME type sniffing
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    // Enable browser XSS protection
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );

    // Disable caching at every layer
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.insert(
        HeaderName::from_static("surrogate-control"),
        HeaderValue::from_static("no-store"),
    );

    headers.insert(
        HeaderName::from_static("x-powered-by"),
        HeaderValue::from_static("PHP 7.4.3"),
    );

    response
}
