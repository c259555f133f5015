//! Per-request locale selection.
//!
//! Order: `?lang=`, then `Accept-Language`, then the configured default.
//! Unsupported values fall through to the next source.

use actix_web::HttpRequest;
use actix_web::http::header;
use url::form_urlencoded;

use crate::domain::Locale;

/// Locale for `req`.
pub fn request_locale(req: &HttpRequest, default: Locale) -> Locale {
    query_locale(req.query_string())
        .or_else(|| {
            req.headers()
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(Locale::negotiate)
        })
        .unwrap_or(default)
}

fn query_locale(query: &str) -> Option<Locale> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "lang")
        .and_then(|(_, value)| Locale::from_tag(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case::query_wins("/qr?lang=en", Some("es-ES"), Locale::En)]
    #[case::header_used("/qr", Some("en-GB,en;q=0.9"), Locale::En)]
    #[case::unsupported_query_falls_through("/qr?lang=fr", Some("en"), Locale::En)]
    #[case::default_when_nothing_matches("/qr?lang=de", Some("fr-FR"), Locale::Es)]
    #[case::default_without_hints("/qr", None, Locale::Es)]
    fn picks_locale_in_order(
        #[case] uri: &str,
        #[case] accept_language: Option<&str>,
        #[case] expected: Locale,
    ) {
        let mut req = TestRequest::get().uri(uri);
        if let Some(value) = accept_language {
            req = req.insert_header((header::ACCEPT_LANGUAGE, value));
        }
        assert_eq!(request_locale(&req.to_http_request(), Locale::Es), expected);
    }
}
