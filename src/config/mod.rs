//! Configuration Management
//!
//! Environment-driven settings for the REST client, the canister agent and logging.

pub mod credentials;
pub mod odin;

pub use credentials::SecretString;
pub use odin::{CanisterConfig, OdinConfig};
