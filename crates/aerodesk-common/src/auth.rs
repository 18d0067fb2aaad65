//! Client-side token decoding and label mapping.
//!
//! The platform issues compact `header.claims.signature` tokens. The client
//! reads the claims segment for UI personalization only: **the signature is
//! never verified here**, so decoded claims are advisory. Every authorization
//! decision is re-checked by the server.

use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard alphabet, padding optional, stray trailing bits tolerated.
const FORGIVING_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Why a token's claims segment could not be read.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("token has no claims segment")]
    MissingClaims,

    #[error("claims segment is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("claims segment is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("claims segment is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("claims segment is not a JSON object")]
    NotAnObject,
}

// ============================================================
// Claims
// ============================================================

/// Decoded claims of a token, kept verbatim.
///
/// Accessors read the well-known fields leniently: a field that is missing or
/// has the wrong JSON type reads as `None`, as do a zero user id, an empty
/// username and a zero user type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Numeric user identifier (`userId`).
    pub fn user_id(&self) -> Option<i64> {
        self.0.get("userId").and_then(integral).filter(|id| *id != 0)
    }

    /// Login name (`username`).
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str).filter(|name| !name.is_empty())
    }

    /// Numeric user type code (`userType`): 1 user, 2 service, 3 admin.
    pub fn user_type(&self) -> Option<i64> {
        self.0.get("userType").and_then(integral).filter(|code| *code != 0)
    }

    /// Membership level code (`memberLevel`), 1 through 5.
    pub fn member_level(&self) -> Option<i64> {
        self.0.get("memberLevel").and_then(integral)
    }

    /// Expiry as seconds since the Unix epoch (`exp`). Zero reads as absent.
    pub fn exp(&self) -> Option<f64> {
        self.0.get("exp").and_then(Value::as_f64).filter(|exp| *exp != 0.0)
    }

    /// `true` only when an expiry is present and strictly before `now_secs`.
    pub fn is_expired_at(&self, now_secs: f64) -> bool {
        self.exp().is_some_and(|exp| exp < now_secs)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Integer claim value. Integral floats such as `7.0` are accepted; values
/// outside the `i64` range are not.
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Decode the claims segment of `token` without verifying its signature.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let segment = token.split('.').nth(1).ok_or(DecodeError::MissingClaims)?;
    // Tokens are URL-safe base64; fold back to the standard alphabet.
    let standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = FORGIVING_B64.decode(standard.as_bytes())?;
    let text = String::from_utf8(bytes)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(Claims(map)),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Lenient form of [`decode_claims`]: failures are logged and yield empty claims.
pub fn parse_claims(token: &str) -> Claims {
    decode_claims(token).unwrap_or_else(|e| {
        tracing::warn!("Token decode failed: {e}");
        Claims::default()
    })
}

// ============================================================
// Labels
// ============================================================

/// Role derived from the numeric user type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Service,
    Admin,
}

impl Role {
    /// Total over all integers; anything unknown is a plain user.
    pub fn from_user_type(code: i64) -> Self {
        match code {
            2 => Self::Service,
            3 => Self::Admin,
            _ => Self::User,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Service => "service",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership tier derived from the numeric member level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberTier {
    Regular,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl MemberTier {
    /// Total over all integers; anything unknown is the regular tier.
    pub fn from_level(code: i64) -> Self {
        match code {
            2 => Self::Silver,
            3 => Self::Gold,
            4 => Self::Platinum,
            5 => Self::Diamond,
            _ => Self::Regular,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Diamond => "Diamond",
        }
    }
}

impl fmt::Display for MemberTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn label_for_user_type(code: i64) -> &'static str {
    Role::from_user_type(code).as_str()
}

pub fn label_for_member_tier(code: i64) -> &'static str {
    MemberTier::from_level(code).label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use proptest::prelude::*;
    use serde_json::json;

    fn mint(claims: &Value) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(b"test-secret")).unwrap()
    }

    fn with_segment(payload: &[u8]) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn reads_well_known_claims() {
        let token = mint(&json!({
            "userId": 42,
            "username": "alice",
            "userType": 3,
            "memberLevel": 4,
            "exp": 4_102_444_800_i64,
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.username(), Some("alice"));
        assert_eq!(claims.user_type(), Some(3));
        assert_eq!(claims.member_level(), Some(4));
        assert_eq!(claims.exp(), Some(4_102_444_800.0));
    }

    #[test]
    fn utf8_claims_round_trip_unchanged() {
        let original = json!({
            "userId": 7,
            "username": "张伟",
            "note": "✈️ café → 東京",
            "nested": { "tags": ["ü", "ß"] },
        });
        let claims = decode_claims(&mint(&original)).unwrap();
        assert_eq!(Value::Object(claims.into_map()), original);
    }

    fn claim_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            "\\PC*".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn arbitrary_claims_round_trip(entries in prop::collection::btree_map("\\PC{0,12}", claim_value(), 0..8)) {
            let original: Map<String, Value> = entries.into_iter().collect();
            let claims = decode_claims(&mint(&Value::Object(original.clone()))).unwrap();
            prop_assert_eq!(claims.into_map(), original);
        }
    }

    #[test]
    fn fewer_than_two_segments_is_empty() {
        for token in ["", "no-dots-here", "eyJhbGciOiJIUzI1NiJ9"] {
            assert!(matches!(decode_claims(token), Err(DecodeError::MissingClaims)));
            assert!(parse_claims(token).is_empty());
        }
    }

    #[test]
    fn two_segments_are_enough() {
        let token = format!("header.{}", URL_SAFE_NO_PAD.encode(br#"{"userId":1}"#));
        assert_eq!(decode_claims(&token).unwrap().user_id(), Some(1));
    }

    #[test]
    fn accepts_standard_alphabet_and_padding() {
        // Encodes as `eyJrIjoiPz8+In0=`: a '+' and trailing padding.
        let payload = br#"{"k":"??>"}"#;
        let padded = base64::engine::general_purpose::STANDARD.encode(payload);
        let token = format!("h.{padded}.s");
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.get("k"), Some(&json!("??>")));
    }

    #[test]
    fn malformed_segments_fail_without_panicking() {
        assert!(matches!(decode_claims("a.!!!.c"), Err(DecodeError::Base64(_))));
        assert!(matches!(decode_claims(&with_segment(&[0xff, 0xfe, 0xfd])), Err(DecodeError::Utf8(_))));
        assert!(matches!(decode_claims(&with_segment(b"{not json")), Err(DecodeError::Json(_))));
        assert!(matches!(decode_claims(&with_segment(b"[1,2]")), Err(DecodeError::NotAnObject)));
        assert!(parse_claims(&with_segment(b"\"str\"")).is_empty());
    }

    #[test]
    fn falsy_fields_read_as_absent() {
        let token = with_segment(br#"{"userId":0,"username":"","userType":0}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id(), None);
        assert_eq!(claims.username(), None);
        assert_eq!(claims.user_type(), None);
    }

    #[test]
    fn wrong_types_read_as_absent() {
        let token = with_segment(br#"{"userId":"12","username":5,"exp":"soon"}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id(), None);
        assert_eq!(claims.username(), None);
        assert_eq!(claims.exp(), None);
    }

    #[test]
    fn integral_floats_are_integers() {
        let claims = decode_claims(&with_segment(br#"{"userId":7.0,"userType":3.0,"memberLevel":2.0}"#)).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.user_type(), Some(3));
        assert_eq!(claims.member_level(), Some(2));

        let claims = decode_claims(&with_segment(br#"{"userId":7.5,"userType":18446744073709551615}"#)).unwrap();
        assert_eq!(claims.user_id(), None);
        assert_eq!(claims.user_type(), None);
    }

    #[test]
    fn zero_expiry_is_absent() {
        let claims = decode_claims(&with_segment(br#"{"userId":5,"exp":0}"#)).unwrap();
        assert_eq!(claims.exp(), None);
        assert!(!claims.is_expired_at(1_000.0));
    }

    #[test]
    fn expiry_is_strict() {
        let claims = decode_claims(&with_segment(br#"{"exp":1000}"#)).unwrap();
        assert!(claims.is_expired_at(1000.5));
        assert!(!claims.is_expired_at(1000.0));
        assert!(!Claims::default().is_expired_at(f64::MAX));
    }

    #[test]
    fn user_type_labels_are_total() {
        assert_eq!(label_for_user_type(1), "user");
        assert_eq!(label_for_user_type(2), "service");
        assert_eq!(label_for_user_type(3), "admin");
        for code in [0, 4, 99, -1, i64::MIN, i64::MAX] {
            assert_eq!(label_for_user_type(code), "user");
        }
    }

    #[test]
    fn member_tier_labels_are_total() {
        let expected = ["Regular", "Silver", "Gold", "Platinum", "Diamond"];
        for (level, label) in (1..=5).zip(expected) {
            assert_eq!(label_for_member_tier(level), label);
        }
        for code in [0, 6, -3, i64::MAX] {
            assert_eq!(label_for_member_tier(code), "Regular");
        }
    }
}
