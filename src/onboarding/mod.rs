//! Onboarding workflow: the eight-step progress model, the tracker that gates
//! navigation between steps, and the flow that commits steps to the backend.
//!
//! Progress is derived entirely from the backend's completion vector; the
//! tracker never invents a step the backend has not confirmed.

pub mod flow;
pub mod model;
pub mod progress;
pub mod routes;
pub mod steps;
pub mod tracker;

pub use flow::OnboardingFlow;
pub use model::{ApplicationStatus, PrescreenOutcome, ProfileRecord};
pub use progress::{CompletionVector, StepStatus};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use steps::{STEPS, SaveCadence, StepDescriptor, StepId};
pub use tracker::{OnboardingSession, ProgressTracker, StepView};
