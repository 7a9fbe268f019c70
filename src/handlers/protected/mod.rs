// Admin handlers. Every route here sits behind the session guard, which
// attaches an `AdminSession` carrying the admin's workspace.
pub mod cases;
pub mod content;
pub mod dashboard;
pub mod services;
pub mod submissions;
pub mod tools;

use serde::Deserialize;

/// `?confirm=true` on every DELETE
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    pub confirm: Option<bool>,
}

impl DeleteQuery {
    pub fn confirmed(&self) -> bool {
        self.confirm.unwrap_or(false)
    }
}
