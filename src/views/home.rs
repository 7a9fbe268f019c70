use serde::Serialize;

use super::content::ContentMap;
use super::{CaseCard, ServiceCard};
use crate::icons::Icon;
use crate::models::{Case, Service};

pub const DEFAULT_HERO_IMAGE: &str = "https://cdn.pixabay.com/photo/2016/04/18/13/53/room-1336497_1280.jpg";
pub const PORTFOLIO_PREVIEW: usize = 2;

/// Header navigation: label block and the section anchor it scrolls to
const MENU: [(&str, &str); 5] = [
    ("menu1", "hero"),
    ("menu2", "services"),
    ("menu3", "process"),
    ("menu4", "portfolio"),
    ("menu5", "contact"),
];

/// Shown when no service rows exist yet: block name, icon, fallback title and text.
const DEFAULT_SERVICES: [(&str, Icon, &str, &str); 3] = [
    (
        "services_handwork",
        Icon::HandMetal,
        "Hand restoration",
        "Careful restoration of antique furniture using traditional techniques and materials",
    ),
    (
        "services_painting",
        Icon::Palette,
        "Decorative painting",
        "Unique artistic elements and decorative painting on furniture",
    ),
    (
        "services_finishing",
        Icon::Brush,
        "Signature finishing",
        "Individual finishing and decoration solutions for furniture",
    ),
];

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub label: String,
    pub anchor: &'static str,
    /// Off the home page the anchor is reached through `/#anchor`
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub title: String,
    pub menu: Vec<NavItem>,
}

impl Header {
    pub fn build(content: &ContentMap, on_home: bool) -> Self {
        let menu = MENU
            .iter()
            .map(|&(block, anchor)| NavItem {
                label: content.title(block),
                anchor,
                href: if on_home {
                    format!("#{}", anchor)
                } else {
                    format!("/#{}", anchor)
                },
            })
            .collect();
        Self {
            title: content.title("header"),
            menu,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub title: String,
    pub description: String,
    pub background_image: String,
    pub button_label: String,
    pub button_href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicesSection {
    pub title: String,
    pub description: String,
    pub items: Vec<ServiceCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessStep {
    pub step: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessSection {
    pub title: String,
    pub description: String,
    pub steps: Vec<ProcessStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPreview {
    pub title: String,
    pub description: String,
    pub cases: Vec<CaseCard>,
    pub details_label: String,
    pub more_label: String,
    pub more_href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub header: Header,
    pub hero: Hero,
    pub services: ServicesSection,
    pub process: ProcessSection,
    pub portfolio: PortfolioPreview,
}

impl HomePage {
    pub fn build(content: &ContentMap, cases: &[Case], services: &[Service]) -> Self {
        let hero_text = content.block("hero");
        let hero = Hero {
            title: hero_text.title,
            description: hero_text.description,
            background_image: content
                .hero_background()
                .unwrap_or(DEFAULT_HERO_IMAGE)
                .to_string(),
            button_label: content.title("discussButton"),
            button_href: "#contact",
        };

        let services_text = content.block("services");
        let items = if services.is_empty() {
            DEFAULT_SERVICES
                .iter()
                .map(|&(block, icon, title, description)| {
                    let text = content.block(block);
                    ServiceCard::new(
                        None,
                        if text.title.is_empty() { title.to_string() } else { text.title },
                        if text.description.is_empty() {
                            description.to_string()
                        } else {
                            text.description
                        },
                        icon.name(),
                    )
                })
                .collect()
        } else {
            services.iter().map(ServiceCard::from).collect()
        };

        let process_text = content.block("process");
        let steps = (1..=4)
            .map(|n| {
                let text = content.block(&format!("process_step{}", n));
                ProcessStep {
                    step: format!("{:02}", n),
                    title: text.title,
                    description: text.description,
                }
            })
            .collect();

        let portfolio_text = content.block("portfolio");
        let portfolio = PortfolioPreview {
            title: portfolio_text.title,
            description: portfolio_text.description,
            cases: cases.iter().take(PORTFOLIO_PREVIEW).map(CaseCard::from).collect(),
            details_label: content.title("details"),
            more_label: content.title("more_button"),
            more_href: "/portfolio",
        };

        Self {
            header: Header::build(content, true),
            hero,
            services: ServicesSection {
                title: services_text.title,
                description: services_text.description,
                items,
            },
            process: ProcessSection {
                title: process_text.title,
                description: process_text.description,
                steps,
            },
            portfolio,
        }
    }
}
