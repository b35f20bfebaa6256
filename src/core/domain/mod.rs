//! Domain types.

mod certificate;
mod effective;
mod environment;
mod secret;
pub mod stack;

pub use certificate::{CertificateNames, CertificateRequest};
pub use effective::EffectiveConfig;
pub use environment::Environment;
pub use secret::SecretName;
pub use stack::{StackKind, StackRecord};
