//! Contracts of the OAuth login API: what the client sends and what the
//! backend answers. The exchange itself lives elsewhere.

mod authorize;
mod profile;
mod token;

pub use authorize::*;
pub use profile::*;
pub use token::*;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use thiserror::Error;

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Github,
    Google,
    Wechat,
    Apple,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error("OAuth state mismatch")]
    StateMismatch,
}
