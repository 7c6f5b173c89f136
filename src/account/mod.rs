//! Account registry for the badge portal.
//!
//! Accounts live in memory for the lifetime of the server process:
//! - Sequential numeric ids
//! - Email as the unique key
//! - Argon2id salted password hashes

pub mod auth;
pub mod registry;
pub mod store;
pub mod types;

pub use registry::{AccountRegistry, LoginAck, RegistryError};
pub use store::{AccountRepository, InMemoryAccountRepository, RepositoryError};
pub use types::{Account, AccountId, NewAccount};
