pub mod verification_token;

pub use verification_token::{generate_verification_token, hash_token};
