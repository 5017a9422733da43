//! Homecare onboarding — candidate onboarding workflow engine.

pub mod autosave;
pub mod backend;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod onboarding;
