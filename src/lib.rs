//! Citadel - provisioning operator for a secrets-management cluster.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── output        # Styled terminal output
//! │   ├── prompt        # Terminal confirmation
//! │   ├── wiring        # Builds collaborators from settings
//! │   ├── status        # Environment status report
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # citadel.toml and overrides
//!     ├── command       # Provisioning commands
//!     ├── engine        # Resolves and drives operations
//!     ├── operation/    # One file per provisioning step
//!     ├── merge         # Precedence merge of configuration layers
//!     ├── domain/       # Environment, stacks, secrets, certificates
//!     ├── store/        # Config store backends
//!     │   ├── fs        # Local directory
//!     │   ├── memory    # In-process
//!     │   └── s3        # S3 bucket
//!     ├── cloud/        # STS and EC2 clients, idempotency probes
//!     ├── acme/         # Certificate authority client (lego)
//!     └── prompt        # Operator confirmation trait
//! ```
//!
//! # Outcomes
//!
//! Every command ends in one of three ways: completed, skipped because its
//! precondition did not hold, or failed. The binary exits with 0, 2 and 1
//! respectively.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::command::Command;
pub use crate::core::engine::{Engine, Outcome, Services};
pub use crate::core::operation::{Operation, Readiness};
pub use crate::error::{Error, Result};
