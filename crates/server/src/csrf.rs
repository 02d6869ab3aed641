//! Double-submit CSRF check: POSTs must echo the `csrftoken` cookie in the
//! `X-CSRFToken` header.

use axum::http::{header, HeaderMap, HeaderValue};

pub const COOKIE_NAME: &str = "csrftoken";
pub const HEADER_NAME: &str = "x-csrftoken";

/// Value of the `csrftoken` cookie, if the request carries one
pub fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Check that header and cookie are present and equal
pub fn verify(headers: &HeaderMap) -> Result<(), &'static str> {
    let Some(cookie) = cookie_token(headers) else {
        return Err("CSRF cookie not set");
    };
    let header = headers
        .get(HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .ok_or("CSRF token missing")?;
    if header != cookie {
        return Err("CSRF token incorrect");
    }
    Ok(())
}

/// A fresh random token
pub fn issue() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// `Set-Cookie` header value for a token
pub fn set_cookie(token: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{COOKIE_NAME}={token}; Path=/; SameSite=Lax")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: Option<&str>, token: Option<&str>) -> HeaderMap {
        let mut h = HeaderMap::new();
        if let Some(c) = cookie {
            h.insert(header::COOKIE, HeaderValue::from_str(c).unwrap());
        }
        if let Some(t) = token {
            h.insert(HEADER_NAME, HeaderValue::from_str(t).unwrap());
        }
        h
    }

    #[test]
    fn test_cookie_token_among_others() {
        let h = headers(Some("sessionid=xyz; csrftoken=abc; theme=dark"), None);
        assert_eq!(cookie_token(&h).as_deref(), Some("abc"));
    }

    #[test]
    fn test_cookie_token_absent() {
        assert!(cookie_token(&headers(Some("sessionid=xyz"), None)).is_none());
        assert!(cookie_token(&headers(None, None)).is_none());
    }

    #[test]
    fn test_verify_matching() {
        assert!(verify(&headers(Some("csrftoken=abc"), Some("abc"))).is_ok());
    }

    #[test]
    fn test_verify_failures() {
        assert_eq!(verify(&headers(None, Some("abc"))), Err("CSRF cookie not set"));
        assert_eq!(verify(&headers(Some("csrftoken=abc"), None)), Err("CSRF token missing"));
        assert_eq!(
            verify(&headers(Some("csrftoken=abc"), Some("def"))),
            Err("CSRF token incorrect")
        );
    }

    #[test]
    fn test_issue_is_unique() {
        let a = issue();
        assert_eq!(a.len(), 32);
        assert_ne!(a, issue());
        assert!(set_cookie(&a).is_some());
    }
}
