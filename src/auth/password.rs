use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

/// Memory cost in KiB (46 MiB).
pub const M_COST_KIB: u32 = 46 * 1024;
/// Passes over memory.
pub const T_COST: u32 = 1;
/// Lanes.
pub const P_COST: u32 = 1;

fn hasher() -> anyhow::Result<Argon2<'static>> {
    let params = Params::new(M_COST_KIB, T_COST, P_COST, None).map_err(|e| {
        error!(error = %e, "argon2 params error");
        anyhow::anyhow!("invalid argon2 params: {e}")
    })?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Salted argon2id hash in PHC string form; the cost parameters travel with it.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = hasher()?
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!("password hashing failed: {e}")
        })?;
    Ok(phc.to_string())
}

/// Checks `plain` against a stored PHC string using the parameters recorded
/// in that string, so hashes made under older costs keep verifying.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash unreadable");
        anyhow::anyhow!("malformed password hash: {e}")
    })?;
    Ok(hasher()?.verify_password(plain.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_records_algorithm_and_costs() {
        let hash = hash_password("Secur3P@ssw0rd!").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"), "{hash}");
        assert!(hash.contains("$m=47104,t=1,p=1$"), "{hash}");
        assert!(verify_password("Secur3P@ssw0rd!", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("quiz-master").unwrap();
        let b = hash_password("quiz-master").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("correct-horse-battery-staple").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashes_with_other_costs_still_verify() {
        let salt = SaltString::generate(&mut OsRng);
        let legacy = Argon2::default()
            .hash_password(b"older-account", &salt)
            .unwrap()
            .to_string();
        assert!(!legacy.contains("m=47104"));
        assert!(verify_password("older-account", &legacy).unwrap());
        assert!(!verify_password("someone-else", &legacy).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(err.to_string().starts_with("malformed password hash"));
    }
}
