//! Request/response middleware around the single HTTP call primitive.
//!
//! Outgoing requests are stamped with the stored token; every outcome is
//! classified into success or one [`ClientError`]. None of this touches the
//! network, so eviction and message normalization are testable on their own.

use aerodesk_common::config::DEFAULT_PASSWORD_MISMATCH_MESSAGE;
use aerodesk_common::models::{Envelope, UNAUTHORIZED_CODE};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::session::Session;

/// Header carrying the raw token. Not the bearer scheme.
pub const TOKEN_HEADER: &str = "token";

pub const MSG_REQUEST_FAILED: &str = "request failed";
pub const MSG_UNAUTHORIZED: &str = "unauthorized, please log in again";
pub const MSG_FORBIDDEN: &str = "access denied";
pub const MSG_NOT_FOUND: &str = "resource not found";
pub const MSG_SERVER_ERROR: &str = "internal server error";

/// Attach the stored token, verbatim, if there is one.
pub fn stamp_headers(headers: &mut HeaderMap, session: &Session) -> Result<()> {
    if let Some(token) = session.get_token() {
        let value = HeaderValue::from_str(&token).map_err(|e| {
            ClientError::InvalidRequest(format!("stored token is not a valid header value: {e}"))
        })?;
        headers.insert(TOKEN_HEADER, value);
    }
    Ok(())
}

/// Default message for a failed HTTP status with no usable body.
pub fn status_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => MSG_UNAUTHORIZED.to_owned(),
        StatusCode::FORBIDDEN => MSG_FORBIDDEN.to_owned(),
        StatusCode::NOT_FOUND => MSG_NOT_FOUND.to_owned(),
        StatusCode::INTERNAL_SERVER_ERROR => MSG_SERVER_ERROR.to_owned(),
        other => format!("{MSG_REQUEST_FAILED}: {}", other.as_u16()),
    }
}

/// Classifies responses and evicts the token on unauthorized outcomes.
#[derive(Debug, Clone)]
pub struct ResponseGuard {
    session: Session,
    password_mismatch_message: String,
}

impl ResponseGuard {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            password_mismatch_message: DEFAULT_PASSWORD_MISMATCH_MESSAGE.to_owned(),
        }
    }

    /// Replace the exact 401 message that must not log the user out.
    ///
    /// The exemption matches message text, not a dedicated code, so it breaks
    /// silently if the server rewords the message.
    pub fn with_password_mismatch_message(mut self, message: impl Into<String>) -> Self {
        self.password_mismatch_message = message.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Classify the body of a 2xx response.
    pub fn on_body(&self, body: &[u8]) -> Result<Envelope> {
        match serde_json::from_slice::<Envelope>(body) {
            Ok(envelope) => self.on_envelope(envelope),
            Err(source) => {
                tracing::error!("Response is not an envelope: {source}");
                Err(ClientError::Payload { message: MSG_REQUEST_FAILED.to_owned(), source })
            }
        }
    }

    /// Business code 200 passes the envelope through unchanged; anything else fails.
    pub fn on_envelope(&self, envelope: Envelope) -> Result<Envelope> {
        if envelope.is_success() {
            return Ok(envelope);
        }
        let message = envelope.message().unwrap_or(MSG_REQUEST_FAILED).to_owned();
        tracing::error!(code = envelope.code, "Request failed: {message}");
        if envelope.code == UNAUTHORIZED_CODE {
            return Err(self.unauthorized(message));
        }
        Err(ClientError::Business { code: envelope.code, message })
    }

    /// Classify a non-2xx response. A non-empty `msg` in the body wins over
    /// the status-derived message.
    ///
    /// A 401 evicts the token only when the body carried no message of its
    /// own; a server-explained 401 is reported as is and leaves the session.
    pub fn on_http_status(&self, status: StatusCode, body: &[u8]) -> ClientError {
        let server_message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_owned))
            .filter(|m| !m.is_empty());
        let explained = server_message.is_some();
        let message = server_message.unwrap_or_else(|| status_message(status));
        tracing::error!(status = status.as_u16(), "Response error: {message}");
        if status == StatusCode::UNAUTHORIZED {
            if explained {
                return ClientError::Unauthorized { message, token_evicted: false };
            }
            return self.unauthorized(message);
        }
        ClientError::Http { status: status.as_u16(), message }
    }

    /// No response at all.
    pub fn on_network(&self, source: reqwest::Error) -> ClientError {
        tracing::error!("Request failed: {source}");
        ClientError::Network { message: MSG_REQUEST_FAILED.to_owned(), source }
    }

    fn unauthorized(&self, message: String) -> ClientError {
        let token_evicted = message != self.password_mismatch_message
            && self.session.evict("unauthorized response");
        ClientError::Unauthorized { message, token_evicted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use serde_json::json;

    fn guard_with_token() -> ResponseGuard {
        ResponseGuard::new(Session::new(MemoryTokenStore::with_token("h.c.s")))
    }

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn stamps_raw_token() {
        let session = Session::new(MemoryTokenStore::with_token("aaa.bbb.ccc"));
        let mut headers = HeaderMap::new();
        stamp_headers(&mut headers, &session).unwrap();
        assert_eq!(headers.get(TOKEN_HEADER).unwrap(), "aaa.bbb.ccc");
        assert!(headers.get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn no_token_no_header() {
        let mut headers = HeaderMap::new();
        stamp_headers(&mut headers, &Session::in_memory()).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn unprintable_token_is_rejected() {
        let session = Session::new(MemoryTokenStore::with_token("bad\ntoken"));
        let mut headers = HeaderMap::new();
        let err = stamp_headers(&mut headers, &session).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn success_passes_envelope_through() {
        let guard = guard_with_token();
        let env = guard.on_envelope(envelope(json!({ "code": 200, "data": [1, 2, 3] }))).unwrap();
        assert_eq!(env.data, Some(json!([1, 2, 3])));
        assert!(guard.session().get_token().is_some());
    }

    #[test]
    fn business_failure_uses_server_message() {
        let guard = guard_with_token();
        let err = guard.on_envelope(envelope(json!({ "code": 400, "msg": "seat taken" }))).unwrap_err();
        assert!(matches!(err, ClientError::Business { code: 400, .. }));
        assert_eq!(err.to_string(), "seat taken");
        assert!(guard.session().get_token().is_some());
    }

    #[test]
    fn business_failure_defaults_message() {
        let guard = guard_with_token();
        for body in [json!({ "code": 500 }), json!({ "code": 500, "msg": "" })] {
            let err = guard.on_envelope(envelope(body)).unwrap_err();
            assert_eq!(err.message(), MSG_REQUEST_FAILED);
        }
    }

    #[test]
    fn business_401_evicts() {
        let guard = guard_with_token();
        let err = guard.on_envelope(envelope(json!({ "code": 401, "msg": "token expired" }))).unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized { token_evicted: true, .. }));
        assert_eq!(err.to_string(), "token expired");
        assert!(guard.session().get_token().is_none());
    }

    #[test]
    fn wrong_old_password_keeps_token() {
        let guard = guard_with_token();
        let err = guard
            .on_envelope(envelope(json!({ "code": 401, "msg": "old password incorrect" })))
            .unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized { token_evicted: false, .. }));
        assert_eq!(err.to_string(), "old password incorrect");
        assert!(guard.session().get_token().is_some());
    }

    #[test]
    fn password_sentinel_is_configurable() {
        let guard = guard_with_token().with_password_mismatch_message("旧密码错误");
        guard.on_envelope(envelope(json!({ "code": 401, "msg": "旧密码错误" }))).unwrap_err();
        assert!(guard.session().get_token().is_some());

        guard
            .on_envelope(envelope(json!({ "code": 401, "msg": "old password incorrect" })))
            .unwrap_err();
        assert!(guard.session().get_token().is_none());
    }

    #[test]
    fn sentinel_match_is_exact() {
        let guard = guard_with_token();
        guard
            .on_envelope(envelope(json!({ "code": 401, "msg": "Old password incorrect" })))
            .unwrap_err();
        assert!(guard.session().get_token().is_none());
    }

    #[test]
    fn non_envelope_body_fails() {
        let guard = guard_with_token();
        for body in [&b"<html>"[..], b"", br#"{"data":1}"#] {
            let err = guard.on_body(body).unwrap_err();
            assert_eq!(err.message(), MSG_REQUEST_FAILED);
        }
    }

    #[test]
    fn status_messages() {
        let cases = [
            (StatusCode::FORBIDDEN, MSG_FORBIDDEN),
            (StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            (StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_ERROR),
            (StatusCode::BAD_GATEWAY, "request failed: 502"),
            (StatusCode::TOO_MANY_REQUESTS, "request failed: 429"),
        ];
        let guard = guard_with_token();
        for (status, expected) in cases {
            let err = guard.on_http_status(status, b"");
            assert!(matches!(err, ClientError::Http { .. }));
            assert_eq!(err.message(), expected);
        }
        assert!(guard.session().get_token().is_some());
    }

    #[test]
    fn http_401_evicts_with_generic_message() {
        let guard = guard_with_token();
        let err = guard.on_http_status(StatusCode::UNAUTHORIZED, b"");
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), MSG_UNAUTHORIZED);
        assert!(guard.session().get_token().is_none());
    }

    #[test]
    fn http_401_with_server_message_keeps_token() {
        let guard = guard_with_token();
        let err = guard.on_http_status(StatusCode::UNAUTHORIZED, br#"{"code":401,"msg":"token invalid"}"#);
        assert!(matches!(err, ClientError::Unauthorized { token_evicted: false, .. }));
        assert_eq!(err.message(), "token invalid");
        assert_eq!(guard.session().get_token().as_deref(), Some("h.c.s"));
    }

    #[test]
    fn http_401_with_empty_server_message_evicts() {
        let guard = guard_with_token();
        let err = guard.on_http_status(StatusCode::UNAUTHORIZED, br#"{"code":401,"msg":""}"#);
        assert!(matches!(err, ClientError::Unauthorized { token_evicted: true, .. }));
        assert_eq!(err.message(), MSG_UNAUTHORIZED);
        assert!(guard.session().get_token().is_none());
    }

    #[test]
    fn server_message_beats_status_message() {
        let guard = guard_with_token();
        let err = guard.on_http_status(StatusCode::NOT_FOUND, br#"{"code":404,"msg":"flight gone"}"#);
        assert_eq!(err.message(), "flight gone");

        let err = guard.on_http_status(StatusCode::NOT_FOUND, br#"{"code":404,"msg":""}"#);
        assert_eq!(err.message(), MSG_NOT_FOUND);
    }
}
