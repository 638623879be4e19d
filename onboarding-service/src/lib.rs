//! Onboarding feedback service.
//!
//! Renders onboarding answers into a fixed set of prompt templates and relays
//! the prompt to a generative model, degrading to fallback text instead of
//! surfacing errors to the onboarding UI.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
