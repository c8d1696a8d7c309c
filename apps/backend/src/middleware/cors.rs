use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware for the configured browser origins:
/// - Only allow methods actually used by the API
/// - Lightly validate origins, and ignore empty / "null" entries
/// - Fall back to localhost when nothing valid is configured
pub fn cors_middleware(allowed: &[String]) -> Cors {
    let allowed_origins: Vec<&str> = allowed
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    let effective_origins: Vec<&str> = if allowed_origins.is_empty() {
        vec!["http://localhost:3000", "http://127.0.0.1:3000"]
    } else {
        allowed_origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in effective_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
