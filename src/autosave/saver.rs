//! The persistence seam an auto-save coordinator writes through.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::backend::{AuthContext, ProfileBackend};
use crate::error::BackendError;
use crate::onboarding::steps::StepId;

/// Persists one snapshot of form data.
#[async_trait]
pub trait Saver<T>: Send + Sync {
    async fn save(&self, value: T) -> Result<(), BackendError>;

    /// Name used in log events.
    fn label(&self) -> String {
        "form".to_string()
    }
}

/// Saves a step's form data through `ProfileBackend::auto_save`.
pub struct StepSaver<T> {
    backend: Arc<dyn ProfileBackend>,
    auth: AuthContext,
    step: StepId,
    _form: PhantomData<fn(T)>,
}

impl<T> StepSaver<T> {
    pub fn new(backend: Arc<dyn ProfileBackend>, auth: AuthContext, step: StepId) -> Self {
        Self {
            backend,
            auth,
            step,
            _form: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Saver<T> for StepSaver<T>
where
    T: Serialize + Send + 'static,
{
    async fn save(&self, value: T) -> Result<(), BackendError> {
        let data = serde_json::to_value(&value).map_err(|e| BackendError::Serialization {
            reason: e.to_string(),
        })?;
        self.backend.auto_save(&self.auth, self.step, &data).await
    }

    fn label(&self) -> String {
        self.step.to_string()
    }
}
