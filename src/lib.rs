//! Skill Swap — conversational onboarding core.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod wizard;
