//! Sample content for running the site against the in-memory gateway.

use serde_json::{json, Value};

use super::{tables, MemoryGateway};

pub const DEMO_ADMIN_EMAIL: &str = "admin@restoro.local";
pub const DEMO_ADMIN_PASSWORD: &str = "restoro";

fn block(name: &str, title: &str, description: &str) -> Value {
    json!({ "name": name, "title": title, "description": description })
}

/// Seed every table the site reads and one admin account.
pub fn seed_demo(gw: &MemoryGateway, admin_email: &str, admin_password: &str) {
    gw.seed(
        tables::CONTENT_BLOCKS,
        vec![
            block("header", "Restoro", ""),
            block("menu1", "Home", ""),
            block("menu2", "Services", ""),
            block("menu3", "Process", ""),
            block("menu4", "Portfolio", ""),
            block("menu5", "Contact", ""),
            block("hero", "A second life for your furniture", "Careful restoration of antique and vintage pieces"),
            block("discussButton", "Discuss a project", ""),
            block("services", "Our services", "From structural repair to the final coat"),
            block("process", "How we work", "Four steps from assessment to delivery"),
            block("process_step1", "Assessment", "We inspect the piece and agree on the scope"),
            block("process_step2", "Preparation", "Old finishes are removed and damage repaired"),
            block("process_step3", "Restoration", "Joinery, veneer and surface work"),
            block("process_step4", "Finishing", "Protective coats and delivery"),
            block("portfolio", "Our work", "Before and after"),
            block("details", "Details", ""),
            block("more_button", "All projects", ""),
        ],
    );
    gw.seed(
        tables::SERVICES,
        vec![
            json!({"title": "Hand restoration", "description": "Traditional techniques and materials", "icon": "hand-metal"}),
            json!({"title": "Decorative painting", "description": "Painted details and ornament", "icon": "palette"}),
            json!({"title": "Signature finishing", "description": "Oils, waxes and lacquers", "icon": "brush"}),
        ],
    );
    gw.seed(
        tables::CASES,
        vec![json!({
            "title": "Oak chest of drawers",
            "description": "Veneer repair and a hand-rubbed oil finish",
            "process": ["Assessment", "Stripping", "Veneer repair", "Oil finish"],
            "duration": "3 weeks",
            "category": "Cabinetry"
        })],
    );
    gw.seed(
        tables::CONTACT_INFO,
        vec![json!({
            "id": 1,
            "phone": "+1 555 0100",
            "email": "studio@restoro.local",
            "heading": "Get in touch",
            "description": "Tell us about your piece",
            "formTitle": "Request a quote",
            "namePlaceholder": "Name",
            "phonePlaceholder": "Phone",
            "emailPlaceholder": "Email",
            "messagePlaceholder": "What needs restoring?"
        })],
    );
    gw.add_user(admin_email, admin_password);
}
