use serde::Serialize;

use super::content::ContentMap;
use super::home::Header;
use super::CaseCard;
use crate::models::Case;

/// Full portfolio: every case, newest first, no paging
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPage {
    pub header: Header,
    pub back_href: &'static str,
    pub cases: Vec<CaseCard>,
}

impl PortfolioPage {
    pub fn build(content: &ContentMap, cases: &[Case]) -> Self {
        Self {
            header: Header::build(content, false),
            back_href: "/",
            cases: cases.iter().map(CaseCard::from).collect(),
        }
    }
}
