pub mod token_provider;
pub mod user_repository;

pub use token_provider::{SessionClaims, SessionTokenError, SessionTokenProvider};
pub use user_repository::{UserRepository, UserRepositoryError};
