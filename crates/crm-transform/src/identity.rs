//! Stable identity hashing.
//!
//! The identity must not change between runs or hosts, since the downstream
//! store deduplicates on it. SHA-256 over the canonical phone text, first
//! eight bytes big-endian, sign bit cleared.

use sha2::{Digest, Sha256};

use crm_model::{Identity, Phone};

/// Non-negative 63-bit hash of `value`.
pub fn stable_hash(value: &str) -> u64 {
    let digest: [u8; 32] = Sha256::digest(value.as_bytes()).into();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix) & (i64::MAX as u64)
}

/// Identity keyed on the canonical phone; digitless contacts have none.
pub fn identity_for(phone: &Phone) -> Identity {
    match phone {
        Phone::Canonical(value) => Identity::hashed(stable_hash(value)),
        Phone::Unparseable => Identity::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_key_sensitive() {
        let a = stable_hash("(11)999998888");
        let b = stable_hash("(11)999998888");
        let c = stable_hash("(21)988887777");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a <= i64::MAX as u64);
    }

    #[test]
    fn unparseable_phone_has_no_identity() {
        assert_eq!(identity_for(&Phone::Unparseable), Identity::Missing);
        let phone = Phone::Canonical("(11)999998888".to_string());
        assert_eq!(
            identity_for(&phone),
            Identity::Hashed(stable_hash("(11)999998888"))
        );
    }
}
