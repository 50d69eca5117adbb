use sociable_core::error::{SocError, SocResult};

use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash};
use entrait::entrait_export as entrait;

#[entrait(pub HashPassword, no_deps)]
async fn hash_password(password: String) -> SocResult<sociable_core::PasswordHash> {
    // Argon2 hashing is designed to be computationally intensive,
    // so we need to do this on a blocking thread.
    tokio::task::spawn_blocking(move || -> SocResult<sociable_core::PasswordHash> {
        let salt = SaltString::generate(rand::thread_rng());
        Ok(sociable_core::PasswordHash(
            argon2::PasswordHash::generate(Argon2::default(), password, salt.as_str())
                .map_err(|e| anyhow::anyhow!("failed to generate password hash: {}", e))?
                .to_string(),
        ))
    })
    .await
    .context("panic when generating password hash")?
}

#[entrait(pub VerifyPassword, no_deps)]
async fn verify_password(
    password: String,
    password_hash: sociable_core::PasswordHash,
) -> SocResult<()> {
    tokio::task::spawn_blocking(move || -> SocResult<()> {
        let hash = PasswordHash::new(&password_hash.0)
            .map_err(|e| anyhow::anyhow!("invalid password hash: {}", e))?;

        hash.verify_password(&[&Argon2::default()], password)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => SocError::BadCredentials,
                _ => anyhow::anyhow!("failed to verify password hash: {}", e).into(),
            })
    })
    .await
    .context("panic when verifying password hash")??;

    Ok(())
}
