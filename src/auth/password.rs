use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2 hash plus the salt it was derived with.
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

pub fn hash_password(plain: &str) -> anyhow::Result<HashedPassword> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(HashedPassword {
        hash,
        salt: salt.as_str().to_owned(),
    })
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hashed = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hashed.hash).expect("verify should succeed"));
    }

    #[test]
    fn hash_embeds_the_stored_salt() {
        let hashed = hash_password("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!hashed.salt.is_empty());
        assert!(hashed.hash.contains(&hashed.salt));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hashed = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hashed.hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
