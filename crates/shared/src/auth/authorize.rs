use serde::{Deserialize, Serialize};
use ulid::Ulid;
use url::Url;
use validator::{Validate, ValidationError};

use super::{AuthApiError, OAuthProvider};

/// Asks the backend where to send the user to sign in with `provider`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AuthorizeRequest {
    pub provider: OAuthProvider,
    #[validate(custom(function = "validate_redirect_uri"))]
    pub redirect_uri: String,
    #[validate(length(min = 8, max = 128))]
    pub state: Option<String>,
}

fn validate_redirect_uri(value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|_| ValidationError::new("redirect_uri_invalid"))?;

    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(ValidationError::new("redirect_uri_scheme"));
    }

    Ok(())
}

impl AuthorizeRequest {
    /// The caller's anti-forgery state, or a fresh one.
    pub fn state_or_generate(&self) -> String {
        self.state
            .clone()
            .unwrap_or_else(|| Ulid::new().to_string())
    }

    /// Authorization-code URL for the provider's consent page.
    pub fn authorize_url(
        &self,
        endpoint: &Url,
        client_id: &str,
        state: &str,
    ) -> Result<Url, AuthApiError> {
        self.validate()?;

        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", state);

        Ok(url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    pub authorize_url: String,
    pub state: String,
}

/// What the provider hands back on the redirect URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OAuthCallbackRequest {
    pub provider: OAuthProvider,
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub state: String,
}

impl OAuthCallbackRequest {
    pub fn verify_state(&self, expected: &str) -> Result<(), AuthApiError> {
        self.validate()?;

        if self.state != expected {
            return Err(AuthApiError::StateMismatch);
        }

        Ok(())
    }
}
