use super::SiteService;
use crate::gateway::tables;
use crate::models::ContactForm;
use crate::views::SubmitOutcome;

pub const SEND_FAILED: &str = "An error occurred while sending. Please try again later.";

impl SiteService {
    /// Store a contact-form submission, then announce it on the chat webhook.
    ///
    /// The announcement is best effort: its failure is logged and the stored
    /// row stays.
    pub async fn submit_contact(&self, form: &ContactForm) -> SubmitOutcome {
        if let Err(e) = form.validate() {
            return SubmitOutcome::Blocked { message: e.message };
        }

        if let Err(e) = self.gateway.insert(tables::CONTACT_FORMS, form.to_row()).await {
            tracing::error!("Contact form insert failed: {}", e);
            return SubmitOutcome::Failed {
                message: SEND_FAILED.to_string(),
            };
        }

        if let Some(notifier) = &self.notifier {
            match notifier.send(&form.notification_text()).await {
                Ok(()) => tracing::info!("Contact form notification delivered"),
                Err(e) => tracing::warn!("Contact form notification failed: {}", e),
            }
        }
        SubmitOutcome::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ContentCache;
    use crate::gateway::MemoryGateway;
    use crate::site::Notifier;
    use crate::types::Operation;
    use std::sync::Arc;

    fn site(gw: &MemoryGateway) -> SiteService {
        SiteService::new(Arc::new(gw.clone()), Arc::new(ContentCache::in_memory()))
    }

    #[tokio::test]
    async fn blocked_without_phone_or_email() {
        let gw = MemoryGateway::new();
        let form = ContactForm {
            name: "Anna".into(),
            message: "Chair".into(),
            ..Default::default()
        };
        let outcome = site(&gw).submit_contact(&form).await;
        assert!(matches!(outcome, SubmitOutcome::Blocked { .. }));
        assert_eq!(gw.count(Operation::Insert, tables::CONTACT_FORMS), 0);
    }

    #[tokio::test]
    async fn webhook_failure_keeps_the_row() {
        let gw = MemoryGateway::new();
        let site = site(&gw).with_notifier(Some(Notifier::new("http://127.0.0.1:9", "t", "1")));
        let form = ContactForm {
            email: "anna@example.com".into(),
            ..Default::default()
        };
        assert_eq!(site.submit_contact(&form).await, SubmitOutcome::Sent);
        let rows = gw.rows(tables::CONTACT_FORMS);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["status"], "new");
    }

    #[tokio::test]
    async fn insert_failure_is_reported() {
        let gw = MemoryGateway::new();
        gw.fail(Operation::Insert);
        let form = ContactForm {
            phone: "+7 900".into(),
            ..Default::default()
        };
        let outcome = site(&gw).submit_contact(&form).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: SEND_FAILED.to_string()
            }
        );
    }
}
