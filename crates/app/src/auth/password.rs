//! Password hashing.

use bcrypt::{BcryptError, DEFAULT_COST};
use thiserror::Error;
use tokio::{
    sync::OnceCell,
    task::{JoinError, spawn_blocking},
};

/// Hash checked when no stored hash exists, so unknown usernames cost a full bcrypt round.
static UNUSABLE_HASH: OnceCell<String> = OnceCell::const_new();

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure")]
    Bcrypt(#[from] BcryptError),

    #[error("password task failed")]
    Join(#[from] JoinError),
}

/// Hash `password` with bcrypt on the blocking pool.
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    let hash = spawn_blocking(move || bcrypt::hash(password, DEFAULT_COST)).await??;

    Ok(hash)
}

/// Check `password` against a stored bcrypt hash on the blocking pool.
///
/// # Errors
///
/// Returns an error if the stored hash is malformed or the blocking task panics.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    let valid = spawn_blocking(move || bcrypt::verify(password, &hash)).await??;

    Ok(valid)
}

/// Run a bcrypt verification that can never succeed, taking as long as [`verify_password`].
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics.
pub async fn verify_unusable_password(password: String) -> Result<(), PasswordError> {
    let hash = UNUSABLE_HASH
        .get_or_try_init(|| hash_password(String::from("unusable password")))
        .await?
        .clone();

    verify_password(password, hash).await?;

    Ok(())
}
