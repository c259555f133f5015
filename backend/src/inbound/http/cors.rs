//! CORS policy for the public menu endpoint.
//!
//! The allow-list is either `*` or a comma-separated list of origins. A
//! request `Origin` found in the list is echoed back; otherwise the first
//! configured origin is sent. List responses carry `Vary: Origin`.

use actix_web::HttpRequest;
use actix_web::http::header;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";
const MAX_AGE_SECONDS: &str = "86400";

/// Parsed `allow_origin` setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Every origin is allowed.
    #[default]
    Any,
    /// Only the listed origins; never empty.
    List(Vec<String>),
}

impl CorsPolicy {
    /// Parse the setting. Blank input or a `*` entry means [`CorsPolicy::Any`].
    ///
    /// # Examples
    /// ```
    /// use menu_viewer::inbound::http::cors::CorsPolicy;
    ///
    /// let policy = CorsPolicy::parse("https://a.example, https://b.example");
    /// assert_eq!(policy.allow_origin(Some("https://b.example")), "https://b.example");
    /// assert_eq!(policy.allow_origin(Some("https://evil.example")), "https://a.example");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }

    /// `Access-Control-Allow-Origin` value for a request origin.
    #[must_use]
    pub fn allow_origin(&self, origin: Option<&str>) -> &str {
        match self {
            Self::Any => "*",
            Self::List(origins) => origin
                .and_then(|origin| origins.iter().find(|allowed| *allowed == origin))
                .or_else(|| origins.first())
                .map_or("*", String::as_str),
        }
    }

    /// Full CORS header set for `req`.
    #[must_use]
    pub fn headers_for(&self, req: &HttpRequest) -> Vec<(header::HeaderName, String)> {
        let origin = req
            .headers()
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok());
        let mut headers = vec![
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                self.allow_origin(origin).to_owned(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                ALLOW_METHODS.to_owned(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                ALLOW_HEADERS.to_owned(),
            ),
            (header::ACCESS_CONTROL_MAX_AGE, MAX_AGE_SECONDS.to_owned()),
        ];
        if matches!(self, Self::List(_)) {
            headers.push((header::VARY, "Origin".to_owned()));
        }
        headers
    }
}
