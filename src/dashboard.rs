//! Dashboard collaborator — read-only consumption of the finished profile.
//!
//! The wizard hands the finalized profile off through a completion event;
//! the dashboard keeps the latest one for its presentation layer and offers
//! the edit-profile re-entry operation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::WizardError;
use crate::wizard::{ProfileRecord, WizardController, WizardEvent};

/// Receiver of finalized profiles.
#[async_trait]
pub trait CompletionSink: Send + Sync {
    async fn profile_completed(&self, session_id: Uuid, profile: ProfileRecord);
}

/// Holds the most recently completed profile for read-only presentation.
#[derive(Default)]
pub struct Dashboard {
    profile: RwLock<Option<ProfileRecord>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finalized profile, if a session has completed.
    pub async fn profile(&self) -> Option<ProfileRecord> {
        self.profile.read().await.clone()
    }
}

#[async_trait]
impl CompletionSink for Dashboard {
    async fn profile_completed(&self, session_id: Uuid, profile: ProfileRecord) {
        tracing::info!(%session_id, answers = profile.len(), "Profile received by dashboard");
        *self.profile.write().await = Some(profile);
    }
}

/// Forward completion events from a controller subscription to a sink.
pub fn spawn_completion_forwarder(
    mut events: broadcast::Receiver<WizardEvent>,
    sink: Arc<dyn CompletionSink>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(WizardEvent::Completed {
                    session_id,
                    profile,
                }) => sink.profile_completed(session_id, profile).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Completion forwarder lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Edit-profile re-entry: the prior run is discarded and the flow restarts
/// from step 0 with empty buffers.
pub async fn reenter(controller: &WizardController) -> Result<(), WizardError> {
    controller.reset().await;
    controller.start().await
}
