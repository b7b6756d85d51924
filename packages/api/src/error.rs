//! Error types for the accounts store and the OAuth flow.

use thiserror::Error;

/// Failures of an [`crate::Accounts`] implementation.
#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("profile from {provider} has no email")]
    MissingEmail { provider: String },
}

/// Failures while running an OAuth sign-in.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("invalid OAuth endpoint: {0}")]
    Endpoint(#[from] oauth2::url::ParseError),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("callback is missing the authorization code")]
    MissingCode,

    #[error("callback is missing the state parameter")]
    MissingState,

    #[error("provider refused the sign-in: {0}")]
    ProviderDenied(String),

    #[error("invalid or expired OAuth state")]
    InvalidState,

    #[error("no verified primary email found")]
    MissingEmail,

    #[error(transparent)]
    Accounts(#[from] AccountsError),
}

impl AuthError {
    /// Short code appended to the login redirect (`?error=<code>`).
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::NotConfigured(_) | AuthError::Endpoint(_) => "config_error",
            AuthError::MissingCode => "missing_code",
            AuthError::MissingState => "missing_state",
            AuthError::ProviderDenied(_) => "access_denied",
            AuthError::InvalidState => "invalid_state",
            AuthError::Session(_) => "session_error",
            AuthError::MissingEmail => "missing_email",
            AuthError::TokenExchange(_) | AuthError::Http(_) | AuthError::Accounts(_) => {
                "oauth_error"
            }
        }
    }
}
