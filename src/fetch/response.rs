//! Successful fetch outcome.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// A whole successful response: status, headers, and the full body.
///
/// No streaming is modeled; the unit of success is one complete request.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl FetchResponse {
    pub(crate) fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8 text, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying decode error when the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response_with_body(body: &[u8]) -> FetchResponse {
        FetchResponse::new(200, HeaderMap::new(), body.to_vec())
    }

    #[test]
    fn test_text_decodes_utf8() {
        let response = response_with_body("hello".as_bytes());
        assert_eq!(response.text(), "hello");
    }

    #[test]
    fn test_text_replaces_invalid_utf8() {
        let response = response_with_body(&[0x68, 0x69, 0xFF]);
        assert!(response.text().starts_with("hi"));
    }

    #[test]
    fn test_json_decodes_typed_value() {
        let response = response_with_body(br#"{"count": 3}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_json_decode_failure_surfaces_error() {
        let response = response_with_body(b"not json");
        let result: Result<serde_json::Value, _> = response.json();
        assert!(result.is_err());
    }
}
