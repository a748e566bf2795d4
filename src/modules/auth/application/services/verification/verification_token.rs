use data_encoding::HEXLOWER;
use rand::RngCore;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

/// Fresh email-verification token: 32 random bytes, hex encoded.
/// Only its hash is ever persisted.
pub fn generate_verification_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    HEXLOWER.encode(&bytes)
}

/// SHA-256 of a token, hex encoded, for storage and lookup.
pub fn hash_token(token: &str) -> String {
    HEXLOWER.encode(&Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_64_hex_chars() {
        let token = generate_verification_token();

        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_tokens_differ() {
        assert_ne!(generate_verification_token(), generate_verification_token());
    }

    #[test]
    fn test_hash_token_consistency() {
        let token = "my_token_123";
        assert_eq!(hash_token(token), hash_token(token));
    }

    #[test]
    fn test_hash_token_different_inputs() {
        assert_ne!(hash_token("token_1"), hash_token("token_2"));
    }

    #[test]
    fn test_hash_is_not_the_token() {
        let token = generate_verification_token();
        let hash = hash_token(&token);

        assert_eq!(hash.len(), 64);
        assert_ne!(hash, token);
    }
}
