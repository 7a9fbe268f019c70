//! Content-driven view layer.
//!
//! Pages are plain serializable structs built from a [`ContentMap`] and list
//! data. Building never fails; whatever is missing renders empty.

pub mod contact;
pub mod content;
pub mod home;
pub mod portfolio;

use serde::Serialize;

pub use contact::{ContactSection, FormState, SubmitOutcome};
pub use content::ContentMap;
pub use home::HomePage;
pub use portfolio::PortfolioPage;

use crate::icons::ResolvedIcon;
use crate::models::{Case, Service};
use crate::types::RowId;

/// Case as shown in a list: the after image stands for the whole project
#[derive(Debug, Clone, Serialize)]
pub struct CaseCard {
    pub id: RowId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub href: String,
}

impl From<&Case> for CaseCard {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.clone(),
            title: case.title.clone(),
            description: case.description.clone(),
            image: case.after_image.clone(),
            href: format!("/cases/{}", case.id),
        }
    }
}

/// Full case, opened from a card
#[derive(Debug, Clone, Serialize)]
pub struct CaseDetail {
    pub id: RowId,
    pub title: String,
    pub description: String,
    pub before_image: Option<String>,
    pub after_image: Option<String>,
    pub process: Vec<String>,
    pub category: String,
    pub duration: String,
}

impl From<&Case> for CaseDetail {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.clone(),
            title: case.title.clone(),
            description: case.description.clone(),
            before_image: case.before_image.clone(),
            after_image: case.after_image.clone(),
            process: case.process.clone(),
            category: case.category.clone(),
            duration: case.duration.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCard {
    pub id: Option<RowId>,
    pub title: String,
    pub description: String,
    pub icon: ResolvedIcon,
}

impl ServiceCard {
    pub fn new(id: Option<RowId>, title: String, description: String, icon: &str) -> Self {
        Self {
            id,
            title,
            description,
            icon: ResolvedIcon::new(icon),
        }
    }
}

impl From<&Service> for ServiceCard {
    fn from(service: &Service) -> Self {
        Self::new(
            Some(service.id.clone()),
            service.title.clone(),
            service.description.clone(),
            &service.icon,
        )
    }
}
