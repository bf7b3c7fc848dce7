//! Auth Config

use clap::Args;
use jiff::SignedDuration;

use shopfront_app::auth::{TokenLifetimes, TokenSigner};

/// Token signing settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HS256 signing secret for access and refresh tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    #[arg(long, env = "ACCESS_TOKEN_TTL_SECONDS", default_value_t = 300)]
    pub access_token_ttl_seconds: u32,

    /// Refresh token lifetime in seconds
    #[arg(long, env = "REFRESH_TOKEN_TTL_SECONDS", default_value_t = 86_400)]
    pub refresh_token_ttl_seconds: u32,
}

impl AuthConfig {
    /// Build the token signer described by these settings.
    #[must_use]
    pub fn signer(&self) -> TokenSigner {
        TokenSigner::new(
            self.jwt_secret.as_bytes(),
            TokenLifetimes {
                access: SignedDuration::from_secs(i64::from(self.access_token_ttl_seconds)),
                refresh: SignedDuration::from_secs(i64::from(self.refresh_token_ttl_seconds)),
            },
        )
    }
}
