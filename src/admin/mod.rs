//! Admin back office.
//!
//! An [`AdminWorkspace`] is the list state one signed-in admin is looking at.
//! Loads replace a list wholesale; writes go straight to the gateway and, on
//! success, patch the list by id (see [`patch`]). A failed write leaves the
//! list as it was and surfaces as an [`AdminError`] carrying the message to
//! show inline. The public content cache is never touched from here.

pub mod cases;
pub mod content;
pub mod images;
pub mod patch;
pub mod services;
pub mod submissions;

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;

pub use images::{ImagePayload, ImageSlot, ImageUpload};
pub use submissions::SubmissionTab;

use crate::gateway::{Gateway, GatewayError};
use crate::models::{Case, ContactInfo, ContentBlock, Service, ValidationError};
use crate::types::RowId;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Deletion must be confirmed")]
    Unconfirmed,

    #[error("Nothing with id {0} is loaded")]
    Missing(RowId),

    #[error("{message}")]
    Remote {
        message: String,
        #[source]
        source: GatewayError,
    },
}

pub type AdminResult<T> = Result<T, AdminError>;

impl AdminError {
    pub(crate) fn remote(message: &str) -> impl FnOnce(GatewayError) -> AdminError + '_ {
        move |source| {
            tracing::error!("{}: {}", message, source);
            AdminError::Remote {
                message: message.to_string(),
                source,
            }
        }
    }
}

/// Everything `/admin` shows at once
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub cases: Vec<Case>,
    pub blocks: Vec<ContentBlock>,
    pub services: Vec<Service>,
    pub contact: Option<ContactInfo>,
    /// Inline messages for sections that failed to load
    pub messages: Vec<String>,
}

pub struct AdminWorkspace {
    gateway: Arc<dyn Gateway>,
    bucket: String,
    pub cases: Vec<Case>,
    pub services: Vec<Service>,
    pub blocks: Vec<ContentBlock>,
    pub contact: Option<ContactInfo>,
    pub submissions: SubmissionTab,
}

impl AdminWorkspace {
    /// `gateway` should already be scoped to the admin's session.
    pub fn new(gateway: Arc<dyn Gateway>, bucket: impl Into<String>) -> Self {
        Self {
            gateway,
            bucket: bucket.into(),
            cases: Vec::new(),
            services: Vec::new(),
            blocks: Vec::new(),
            contact: None,
            submissions: SubmissionTab::default(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Load every dashboard section. A failed section keeps its previous
    /// contents and contributes a message.
    pub async fn load_dashboard(&mut self) -> Dashboard {
        let mut messages = Vec::new();
        if let Err(e) = self.load_cases().await {
            messages.push(e.to_string());
        }
        if let Err(e) = self.load_blocks().await {
            messages.push(e.to_string());
        }
        if let Err(e) = self.load_services().await {
            messages.push(e.to_string());
        }
        if let Err(e) = self.load_contact_info().await {
            messages.push(e.to_string());
        }
        Dashboard {
            cases: self.cases.clone(),
            blocks: self.blocks.clone(),
            services: self.services.clone(),
            contact: self.contact.clone(),
            messages,
        }
    }
}

/// Workspaces of the signed-in admins, keyed by access token
#[derive(Clone, Default)]
pub struct AdminSessions {
    workspaces: Arc<RwLock<HashMap<String, Arc<Mutex<AdminWorkspace>>>>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session's workspace, created on first use.
    pub fn workspace(&self, access_token: &str, create: impl FnOnce() -> AdminWorkspace) -> Arc<Mutex<AdminWorkspace>> {
        if let Some(existing) = self
            .workspaces
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(access_token)
        {
            return existing.clone();
        }
        self.workspaces
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(access_token.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(create())))
            .clone()
    }

    /// Forget the session's list state. Returns false if there was none.
    pub fn end(&self, access_token: &str) -> bool {
        self.workspaces
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(access_token)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.workspaces.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::workspace;
    use super::*;
    use crate::gateway::{tables, MemoryGateway};
    use crate::types::Operation;
    use serde_json::json;

    #[tokio::test]
    async fn dashboard_collects_section_failures() {
        let (mut ws, gw) = workspace();
        gw.seed(tables::CASES, vec![json!({"id": "c1", "title": "Chair"})]);
        let dashboard = ws.load_dashboard().await;
        assert_eq!(dashboard.cases.len(), 1);
        // No contact_info row seeded
        assert_eq!(dashboard.messages.len(), 1);

        gw.fail(Operation::Select);
        let dashboard = ws.load_dashboard().await;
        assert_eq!(dashboard.cases.len(), 1);
        assert_eq!(dashboard.messages.len(), 4);
    }

    #[tokio::test]
    async fn sessions_keep_one_workspace_per_token() {
        let sessions = AdminSessions::new();
        let gw: Arc<dyn Gateway> = Arc::new(MemoryGateway::new());
        let a = sessions.workspace("t1", || AdminWorkspace::new(gw.clone(), "images"));
        a.lock().await.cases.clear();
        let again = sessions.workspace("t1", || panic!("created twice"));
        assert!(Arc::ptr_eq(&a, &again));
        sessions.workspace("t2", || AdminWorkspace::new(gw.clone(), "images"));
        assert_eq!(sessions.len(), 2);
        assert!(sessions.end("t1"));
        assert!(!sessions.end("t1"));
    }
}
