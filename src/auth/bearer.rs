use axum::http::{header, HeaderMap};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Authorization header is required")]
    MissingAuthorizationHeader,
    #[error("Authorization header must be 'Bearer <token>'")]
    InvalidAuthorizationFormat,
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, BearerError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingAuthorizationHeader)?
        .to_str()
        .map_err(|_| BearerError::InvalidAuthorizationFormat)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(BearerError::InvalidAuthorizationFormat)?
        .trim();

    if token.is_empty() {
        return Err(BearerError::InvalidAuthorizationFormat);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token() {
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer abc123")),
            Ok("abc123".to_string())
        );
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        assert_eq!(
            extract_bearer_token(&HeaderMap::new()),
            Err(BearerError::MissingAuthorizationHeader)
        );
        assert_eq!(
            extract_bearer_token(&headers_with("Basic abc123")),
            Err(BearerError::InvalidAuthorizationFormat)
        );
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer ")),
            Err(BearerError::InvalidAuthorizationFormat)
        );
    }
}
