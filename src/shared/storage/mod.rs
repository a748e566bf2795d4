pub mod facade;
pub mod readiness;

pub use facade::{Storage, StorageMode, StoreHandle};
pub use readiness::{DatabaseReadiness, ManualReadiness, NeverReady, StoreReadiness};
