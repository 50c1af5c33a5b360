//! Farmer session state machine and the registry of live sessions
//!
//! A [`SessionController`] is either `Anonymous` or `Authenticated`.
//! Registration never changes the state; login moves to `Authenticated`
//! only when the contact is known; logout drops all farmer data.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{AnalysisReport, DetectionOutcome, FarmerRecord, RegisterFarmerInput};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::EconomicsConfig;
use crate::error::{AppError, AppResult};
use crate::external::{DiseaseInference, ImageUpload};
use crate::services::economics::{self, EconomicRequest};
use crate::services::links::resource_links;
use crate::services::FarmerStore;

/// Who the session belongs to
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(FarmerRecord),
}

/// Drives one farmer's register / login / analyze / logout cycle
#[derive(Clone)]
pub struct SessionController {
    store: FarmerStore,
    inference: Arc<dyn DiseaseInference>,
    economics: EconomicsConfig,
    state: SessionState,
}

impl SessionController {
    /// Create an anonymous session over the given collaborators
    pub fn new(
        store: FarmerStore,
        inference: Arc<dyn DiseaseInference>,
        economics: EconomicsConfig,
    ) -> Self {
        Self {
            store,
            inference,
            economics,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// The logged-in farmer, if any
    pub fn farmer(&self) -> Option<&FarmerRecord> {
        match &self.state {
            SessionState::Authenticated(farmer) => Some(farmer),
            SessionState::Anonymous => None,
        }
    }

    pub fn farmer_id(&self) -> Option<i64> {
        self.farmer().map(|f| f.id)
    }

    /// Register a farmer. Does not log in.
    pub async fn register(&self, input: &RegisterFarmerInput) -> AppResult<i64> {
        if self.is_authenticated() {
            return Err(AppError::InvalidStateTransition(
                "Log out before registering another farmer".into(),
            ));
        }
        self.store.upsert(input).await
    }

    /// Log in by contact number.
    ///
    /// An unknown contact leaves the session anonymous and returns
    /// `NotFound`; no account is created.
    pub async fn login(&mut self, contact: &str) -> AppResult<&FarmerRecord> {
        if self.is_authenticated() {
            return Err(AppError::InvalidStateTransition("Already logged in".into()));
        }

        let farmer = self.store.find_by_contact(contact).await?;
        tracing::info!(farmer_id = farmer.id, "Farmer logged in");
        self.state = SessionState::Authenticated(farmer);

        self.farmer()
            .ok_or_else(|| AppError::Internal("Session lost after login".into()))
    }

    /// Return to `Anonymous`, clearing the held farmer record
    pub fn logout(&mut self) {
        if let SessionState::Authenticated(farmer) = std::mem::take(&mut self.state) {
            tracing::info!(farmer_id = farmer.id, "Farmer logged out");
        }
    }

    /// Run disease detection on `image` (when given) and evaluate the
    /// economic inputs. Requires an authenticated session.
    ///
    /// A failed or empty inference only affects the detection section.
    pub async fn analyze(
        &self,
        image: Option<ImageUpload>,
        economics: &EconomicRequest,
    ) -> AppResult<AnalysisReport> {
        let farmer = self
            .farmer()
            .ok_or_else(|| AppError::Unauthorized("Please log in first".into()))?;

        let detection = match image {
            Some(image) => self.detect(&image).await?,
            None => DetectionOutcome::NotRequested,
        };
        let economics = economics::evaluate(economics, Some(farmer.field_size), &self.economics);

        Ok(AnalysisReport {
            farmer: farmer.clone(),
            detection,
            economics,
        })
    }

    async fn detect(&self, image: &ImageUpload) -> AppResult<DetectionOutcome> {
        let result = match self.inference.infer(image).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Disease inference failed: {}", e);
                return Ok(DetectionOutcome::no_detection());
            }
        };

        match result.into_top_prediction() {
            Some(top) => {
                let links = resource_links(&top.label)?;
                tracing::info!(label = %top.label, confidence = top.confidence, "Disease detected");
                Ok(DetectionOutcome::detected(top, links))
            }
            None => Ok(DetectionOutcome::no_detection()),
        }
    }
}

struct SessionEntry {
    controller: SessionController,
    expires_at: DateTime<Utc>,
}

/// Live authenticated sessions, keyed by session id
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session until `expires_at` and return its new id.
    /// Sessions already past their expiry are dropped first.
    pub async fn insert(&self, controller: SessionController, expires_at: DateTime<Utc>) -> Uuid {
        let session_id = Uuid::new_v4();
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        if sessions.len() < before {
            tracing::debug!("Pruned {} expired sessions", before - sessions.len());
        }

        sessions.insert(
            session_id,
            SessionEntry {
                controller,
                expires_at,
            },
        );
        session_id
    }

    /// Snapshot of a live session
    pub async fn get(&self, session_id: &Uuid) -> Option<SessionController> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.controller.clone())
    }

    pub async fn remove(&self, session_id: &Uuid) -> Option<SessionController> {
        self.sessions
            .write()
            .await
            .remove(session_id)
            .map(|entry| entry.controller)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
