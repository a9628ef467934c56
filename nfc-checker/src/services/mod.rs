//! Service clients for external collaborators
//!
//! - **verifier_client** - claim classification service (`/predict`, `/health`)

pub mod verifier_client;

pub use verifier_client::{VerifierClient, VerifierHealth, VERIFIER_SOURCE};
