use serde::Serialize;

use super::patch;
use super::{AdminError, AdminResult, AdminWorkspace};
use crate::gateway::{decode_rows, tables, Query, SortDirection};
use crate::models::{Submission, SubmissionEdit, SubmissionStatus};
use crate::types::RowId;

const COLUMNS: [&str; 7] = ["id", "created_at", "name", "email", "phone", "message", "status"];

/// Submissions of one status, newest first
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionTab {
    pub status: SubmissionStatus,
    pub items: Vec<Submission>,
}

impl AdminWorkspace {
    /// Switch to the `status` tab and load it.
    pub async fn load_submissions(&mut self, status: SubmissionStatus) -> AdminResult<&SubmissionTab> {
        let query = Query::new()
            .select(&COLUMNS)
            .eq("status", status.as_str())
            .order_by("created_at", SortDirection::Desc);
        let rows = self
            .gateway
            .select(tables::CONTACT_FORMS, &query)
            .await
            .map_err(AdminError::remote("Failed to load requests"))?;
        let items = decode_rows(rows).map_err(AdminError::remote("Failed to load requests"))?;
        self.submissions = SubmissionTab { status, items };
        Ok(&self.submissions)
    }

    pub async fn update_submission(&mut self, id: &RowId, edit: SubmissionEdit) -> AdminResult<Submission> {
        let updated = self
            .submissions
            .items
            .iter()
            .find(|s| &s.id == id)
            .map(|current| edit.applied_to(current))
            .ok_or_else(|| AdminError::Missing(id.clone()))?;
        self.gateway
            .update(tables::CONTACT_FORMS, &Query::new().id(id), edit.to_row())
            .await
            .map_err(AdminError::remote("Failed to save request"))?;
        patch::replace_by_id(&mut self.submissions.items, updated.clone());
        Ok(updated)
    }

    /// Write a new status. The row leaves the current tab when it no longer
    /// matches it.
    pub async fn set_submission_status(&mut self, id: &RowId, status: SubmissionStatus) -> AdminResult<()> {
        self.gateway
            .update(
                tables::CONTACT_FORMS,
                &Query::new().id(id),
                serde_json::json!({ "status": status.as_str() }),
            )
            .await
            .map_err(AdminError::remote("Failed to change status"))?;
        let tab = self.submissions.status;
        patch::apply_status_change(&mut self.submissions.items, id, status, Some(tab));
        Ok(())
    }

    /// Flip new/processed for a row on the current tab.
    pub async fn toggle_submission(&mut self, id: &RowId) -> AdminResult<SubmissionStatus> {
        let current = self
            .submissions
            .items
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.status)
            .ok_or_else(|| AdminError::Missing(id.clone()))?;
        let next = current.toggled();
        self.set_submission_status(id, next).await?;
        Ok(next)
    }

    pub async fn delete_submission(&mut self, id: &RowId, confirmed: bool) -> AdminResult<()> {
        if !confirmed {
            return Err(AdminError::Unconfirmed);
        }
        self.gateway
            .delete(tables::CONTACT_FORMS, &Query::new().id(id))
            .await
            .map_err(AdminError::remote("Failed to delete request"))?;
        patch::remove_by_id(&mut self.submissions.items, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::test_support::workspace;
    use crate::gateway::MemoryGateway;
    use crate::types::Operation;
    use serde_json::json;

    fn seed(gw: &MemoryGateway) {
        gw.seed(
            tables::CONTACT_FORMS,
            vec![
                json!({"id": "s1", "name": "Anna", "phone": "1"}),
                json!({"id": "s2", "name": "Boris", "email": "b@x.y"}),
                json!({"id": "s3", "name": "Vera", "phone": "3", "status": "processed"}),
            ],
        );
    }

    #[tokio::test]
    async fn tabs_filter_by_status_newest_first() {
        let (mut ws, gw) = workspace();
        seed(&gw);
        let tab = ws.load_submissions(SubmissionStatus::New).await.unwrap();
        let names: Vec<_> = tab.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Boris", "Anna"]);

        let tab = ws.load_submissions(SubmissionStatus::Processed).await.unwrap();
        assert_eq!(tab.items.len(), 1);
    }

    #[tokio::test]
    async fn toggle_round_trips_and_leaves_tab() {
        let (mut ws, gw) = workspace();
        seed(&gw);
        let id = RowId::from("s1");

        ws.load_submissions(SubmissionStatus::New).await.unwrap();
        assert_eq!(ws.toggle_submission(&id).await.unwrap(), SubmissionStatus::Processed);
        assert!(ws.submissions.items.iter().all(|s| s.id != id));

        ws.load_submissions(SubmissionStatus::Processed).await.unwrap();
        assert!(ws.submissions.items.iter().any(|s| s.id == id));
        assert_eq!(ws.toggle_submission(&id).await.unwrap(), SubmissionStatus::New);
        assert!(ws.submissions.items.iter().all(|s| s.id != id));

        let row = gw
            .rows(tables::CONTACT_FORMS)
            .into_iter()
            .find(|r| r["id"] == "s1")
            .unwrap();
        assert_eq!(row["status"], "new");
    }

    #[tokio::test]
    async fn edit_and_delete() {
        let (mut ws, gw) = workspace();
        seed(&gw);
        ws.load_submissions(SubmissionStatus::New).await.unwrap();

        let edit = SubmissionEdit {
            name: "Anna K.".into(),
            phone: "1".into(),
            ..Default::default()
        };
        let updated = ws.update_submission(&RowId::from("s1"), edit).await.unwrap();
        assert_eq!(updated.name, "Anna K.");
        assert_eq!(updated.status, SubmissionStatus::New);

        ws.delete_submission(&RowId::from("s2"), true).await.unwrap();
        assert_eq!(ws.submissions.items.len(), 1);
        assert_eq!(gw.count(Operation::Delete, tables::CONTACT_FORMS), 1);
    }

    #[tokio::test]
    async fn failed_status_change_keeps_tab() {
        let (mut ws, gw) = workspace();
        seed(&gw);
        ws.load_submissions(SubmissionStatus::New).await.unwrap();
        gw.fail(Operation::Update);
        assert!(ws.toggle_submission(&RowId::from("s1")).await.is_err());
        assert_eq!(ws.submissions.items.len(), 2);
    }
}
