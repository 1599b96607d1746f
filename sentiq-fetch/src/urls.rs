//! URL construction for the backend's two routes.

use sentiq_core::Scheme;
use url::Url;

use crate::error::FetchError;

/// Path of the health-check route.
pub const STATUS_PATH: &str = "/status";

/// Path of the classification route.
pub const PREDICT_PATH: &str = "/predict";

/// Builds the URL for `path` on `base_url`, rewritten under `scheme`.
///
/// Parsing happens on the rewritten URL so a scheme-less base is still
/// accepted, but a base that is otherwise malformed is rejected here rather
/// than at send time.
pub fn endpoint_url(base_url: &str, scheme: Scheme, path: &str) -> Result<String, FetchError> {
    let rewritten = scheme.rewrite(base_url);
    let mut url =
        Url::parse(&rewritten).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.set_path(path);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_url_rewrites_scheme() {
        let url = endpoint_url("https://a.example", Scheme::Http, STATUS_PATH).unwrap();
        assert_eq!(url, "http://a.example/status");
    }

    #[test]
    fn test_predict_url_keeps_port() {
        let url = endpoint_url("http://localhost:8000", Scheme::Http, PREDICT_PATH).unwrap();
        assert_eq!(url, "http://localhost:8000/predict");
    }

    #[test]
    fn test_malformed_base_is_rejected() {
        assert!(matches!(
            endpoint_url("http://", Scheme::Http, STATUS_PATH),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
