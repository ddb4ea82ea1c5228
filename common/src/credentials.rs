//! Recruitment login credentials
//!
//! Passwords are stored as `hex(sha256(salt || password))` next to the salt.
//! The plaintext field is cleared as soon as it is sealed.

use crate::error::{Error, Result};
use crate::types::RecruitmentCandidate;
use sha2::{Digest, Sha256};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Salt length in bytes, before hex encoding
pub const SALT_BYTES: usize = 16;

/// Hex-encode random bytes as a salt. The bytes come from the caller's OS RNG.
pub fn encode_salt(bytes: &[u8; SALT_BYTES]) -> String {
    hex::encode(bytes)
}

/// Replace a pending plaintext password with hash + salt.
///
/// No-op when the form carries no new password (an edit that keeps the old
/// one).
pub fn seal(candidate: &mut RecruitmentCandidate, salt: &str) -> Result<()> {
    let Some(password) = candidate.password.take() else {
        return Ok(());
    };
    if password.is_empty() {
        return Ok(());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        candidate.password = Some(password);
        return Err(Error::Validation(format!(
            "password: must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    candidate.password_hash = Some(hash_password(salt, &password));
    candidate.password_salt = Some(salt.to_string());
    Ok(())
}

pub fn verify(candidate: &RecruitmentCandidate, password: &str) -> bool {
    match (&candidate.password_salt, &candidate.password_hash) {
        (Some(salt), Some(hash)) => hash_password(salt, password).eq_ignore_ascii_case(hash),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_sha256_hex() {
        // sha256("") with empty salt
        assert_eq!(
            hash_password("", ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(hash_password("a", "secret"), hash_password("b", "secret"));
        assert_eq!(hash_password("a", "bc"), hash_password("ab", "c"));
    }

    #[test]
    fn test_seal_then_verify() {
        let mut c = RecruitmentCandidate {
            username: "jdelacruz".into(),
            password: Some("fire-safety-1".into()),
            ..Default::default()
        };
        seal(&mut c, &encode_salt(&[7; SALT_BYTES])).unwrap();
        assert!(c.password.is_none());
        assert_eq!(c.password_salt.as_deref().map(str::len), Some(32));
        assert!(verify(&c, "fire-safety-1"));
        assert!(!verify(&c, "fire-safety-2"));

        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("fire-safety-1"));
    }

    #[test]
    fn test_seal_short_password_is_rejected() {
        let mut c = RecruitmentCandidate { password: Some("short".into()), ..Default::default() };
        assert!(seal(&mut c, "salt").is_err());
        assert!(c.password_hash.is_none());
    }

    #[test]
    fn test_seal_without_password_keeps_existing_hash() {
        let mut c = RecruitmentCandidate {
            password_hash: Some("abc".into()),
            password_salt: Some("s".into()),
            ..Default::default()
        };
        seal(&mut c, "new").unwrap();
        assert_eq!(c.password_hash.as_deref(), Some("abc"));
        assert!(!verify(&RecruitmentCandidate::default(), ""));
    }
}
