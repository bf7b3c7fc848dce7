//! Signed access and refresh tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserId;

pub const DEFAULT_ACCESS_TOKEN_TTL: SignedDuration = SignedDuration::from_mins(5);
pub const DEFAULT_REFRESH_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

impl Claims {
    #[must_use]
    pub fn user(&self) -> UserId {
        UserId::from_i64(self.user_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: SignedDuration,
    pub refresh: SignedDuration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: DEFAULT_ACCESS_TOKEN_TTL,
            refresh: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }
}

impl TokenLifetimes {
    #[must_use]
    pub fn of(&self, token_type: TokenType) -> SignedDuration {
        match token_type {
            TokenType::Access => self.access,
            TokenType::Refresh => self.refresh,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token could not be signed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token has the wrong type")]
    WrongType,
}

/// HS256 signer holding the shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    lifetimes: TokenLifetimes,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>, lifetimes: TokenLifetimes) -> Self {
        Self {
            secret: secret.into(),
            lifetimes,
        }
    }

    /// Issue a token of `token_type` for `user`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue(&self, token_type: TokenType, user: UserId) -> Result<String, TokenError> {
        self.issue_at(token_type, user, Timestamp::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue_at(
        &self,
        token_type: TokenType,
        user: UserId,
        now: Timestamp,
    ) -> Result<String, TokenError> {
        let iat = now.as_second();

        let claims = Claims {
            token_type,
            user_id: user.into_i64(),
            iat,
            exp: iat.saturating_add(self.lifetimes.of(token_type).as_secs()),
            jti: Uuid::now_v7(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(TokenError::Encode)
    }

    /// Verify signature, expiry and type of `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed, tampered with, expired or of another type.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let claims = decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map_err(TokenError::Invalid)?
            .claims;

        if claims.token_type != expected {
            return Err(TokenError::WrongType);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"**redacted**")
            .field("lifetimes", &self.lifetimes)
            .finish()
    }
}

impl Drop for TokenSigner {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}
