use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use rand_core::{OsRng, RngCore};
use uuid::Uuid;

use crate::types::error::AppError;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn new_nanoid(len: usize) -> String {
    nanoid::nanoid!(len)
}

/// Random session secret. URL-safe alphabet, so it never contains the `.` separator.
pub fn new_secret() -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    format!("tok_{}", URL_SAFE_NO_PAD.encode(buf))
}

/// Argon2 hash of a password or session secret.
pub fn encrypt(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok())
}

/// Access token handed to clients: base64 of `session_id.secret`.
pub fn construct_token(session_id: &str, secret: &str) -> String {
    STANDARD.encode(format!("{session_id}.{secret}"))
}

/// Inverse of [`construct_token`]. Returns `(session_id, secret)`.
pub fn extract_token_parts(token: &str) -> Option<(String, String)> {
    let decoded = STANDARD.decode(token.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (session_id, secret) = decoded.split_once('.')?;
    if session_id.is_empty() || secret.is_empty() {
        return None;
    }
    Some((session_id.to_string(), secret.to_string()))
}

/// [`encrypt`] for request handlers.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    encrypt(password).map_err(|e| AppError::Internal(format!("hash password: {e}")))
}
