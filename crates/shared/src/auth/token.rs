use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use validator::Validate;

/// Tokens issued after a successful code exchange or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of `access_token` in seconds
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}

impl TokenResponse {
    /// `None` when the lifetime does not fit the calendar.
    pub fn expires_at(&self, issued_at: OffsetDateTime) -> Option<OffsetDateTime> {
        let lifetime = i64::try_from(self.expires_in).ok()?;
        issued_at.checked_add(Duration::seconds(lifetime))
    }

    pub fn is_expired(&self, issued_at: OffsetDateTime, now: OffsetDateTime) -> bool {
        self.expires_at(issued_at).is_some_and(|at| now >= at)
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn token(expires_in: u64) -> TokenResponse {
        TokenResponse {
            access_token: "at-1".to_owned(),
            token_type: "Bearer".to_owned(),
            expires_in,
            refresh_token: None,
            scope: None,
        }
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let token: TokenResponse =
            serde_json::from_value(json!({"access_token": "abc", "expires_in": 7200})).unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.refresh_token, None);
        assert_eq!(token.authorization(), "Bearer abc");
    }

    #[test]
    fn optional_fields_are_omitted() {
        assert_eq!(
            serde_json::to_value(token(60)).unwrap(),
            json!({"access_token": "at-1", "token_type": "Bearer", "expires_in": 60})
        );
        assert_eq!(serde_json::to_value(LogoutRequest::default()).unwrap(), json!({}));
    }

    #[test]
    fn expiry() {
        let issued = datetime!(2024-03-01 10:00:00 UTC);
        let token = token(3600);

        assert_eq!(token.expires_at(issued), Some(datetime!(2024-03-01 11:00:00 UTC)));
        assert!(!token.is_expired(issued, datetime!(2024-03-01 10:59:59 UTC)));
        assert!(token.is_expired(issued, datetime!(2024-03-01 11:00:00 UTC)));
    }

    #[test]
    fn absurd_lifetime_never_expires() {
        let issued = datetime!(2024-03-01 10:00:00 UTC);
        let token = token(u64::MAX);

        assert_eq!(token.expires_at(issued), None);
        assert!(!token.is_expired(issued, datetime!(9999-12-31 23:59:59 UTC)));
    }

    #[test]
    fn refresh_token_is_required() {
        let request = RefreshTokenRequest {
            refresh_token: String::new(),
        };

        assert!(request.validate().is_err());
    }
}
