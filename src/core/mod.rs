//! Core library components.
//!
//! Operations, the engine that drives them, and the collaborators they use:
//! config store, cloud clients, certificate authority and operator prompt.

pub mod acme;
pub mod cloud;
pub mod command;
pub mod config;
pub mod constants;
pub mod domain;
pub mod engine;
pub mod merge;
pub mod operation;
pub mod prompt;
pub mod store;
