//! HTTP handlers for the onboarding service.

pub mod feedback;
pub mod health;
