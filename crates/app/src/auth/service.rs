//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    auth::{
        AuthServiceError, Credentials, TokenPair, TokenSigner, TokenType,
        password::{verify_password, verify_unusable_password},
        repository::PgAuthRepository,
    },
    domain::users::records::UserRecord,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    signer: TokenSigner,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, signer: TokenSigner) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            signer,
        }
    }

    async fn active_user_for(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<UserRecord, AuthServiceError> {
        let claims = self.signer.verify(token, expected).map_err(|error| {
            debug!(%error, "rejected {expected:?} token");
            AuthServiceError::InvalidToken
        })?;

        self.repository
            .find_active_user(claims.user())
            .await?
            .ok_or(AuthServiceError::InvalidToken)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn obtain_token_pair(
        &self,
        credentials: Credentials,
    ) -> Result<TokenPair, AuthServiceError> {
        let Some(stored) = self
            .repository
            .find_credentials_by_username(&credentials.username)
            .await?
        else {
            verify_unusable_password(credentials.password).await?;

            return Err(AuthServiceError::InvalidCredentials);
        };

        let password_matches = verify_password(credentials.password, stored.password_hash).await?;

        if !password_matches || !stored.user.is_active {
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(TokenPair {
            access: self.signer.issue(TokenType::Access, stored.user.id)?,
            refresh: self.signer.issue(TokenType::Refresh, stored.user.id)?,
        })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthServiceError> {
        let user = self.active_user_for(refresh_token, TokenType::Refresh).await?;

        Ok(self.signer.issue(TokenType::Access, user.id)?)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserRecord, AuthServiceError> {
        self.active_user_for(bearer_token, TokenType::Access).await
    }
}

#[automock]
#[async_trait]
/// Token issuance and bearer authentication.
pub trait AuthService: Send + Sync {
    /// Exchanges valid credentials of an active user for an access/refresh pair.
    async fn obtain_token_pair(
        &self,
        credentials: Credentials,
    ) -> Result<TokenPair, AuthServiceError>;

    /// Issues a fresh access token from a refresh token.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthServiceError>;

    /// Resolves an access token to the active user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserRecord, AuthServiceError>;
}
