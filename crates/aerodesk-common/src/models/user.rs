//! User accounts and the auth request bodies.

use serde::{Deserialize, Serialize};

/// Profile returned by `GET /user/{id}`. Sensitive fields are never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub real_name: Option<String>,
    pub id_card: Option<String>,
    /// 1 user, 2 customer service, 3 administrator
    pub user_type: Option<i64>,
    /// 1 through 5, regular to diamond
    pub member_level: Option<i64>,
}

/// Body of `PUT /user/{id}`; only the present fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account details submitted at registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_card: Option<String>,
}

/// Registration request: the account plus the emailed verification code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user: NewUser,
    pub code: String,
}

/// What a verification code will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPurpose {
    Register,
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCodeRequest {
    pub email: String,
    #[serde(rename = "type")]
    pub purpose: VerificationPurpose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub username: String,
    pub email: String,
    pub new_password: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyPasswordRequest {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_request_nests_the_user() {
        let req = RegisterRequest {
            user: NewUser {
                username: "bob".into(),
                password: "hunter22".into(),
                email: "bob@example.com".into(),
                ..Default::default()
            },
            code: "123456".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "user": { "username": "bob", "password": "hunter22", "email": "bob@example.com" },
                "code": "123456",
            })
        );
    }

    #[test]
    fn verification_purpose_is_sent_as_type() {
        let req = VerificationCodeRequest {
            email: "a@b.c".into(),
            purpose: VerificationPurpose::Reset,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "email": "a@b.c", "type": "reset" }));
    }
}
