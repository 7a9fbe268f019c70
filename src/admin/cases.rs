use super::images::{upload_or_keep, ImageSlot, ImageUpload};
use super::patch;
use super::{AdminError, AdminResult, AdminWorkspace};
use crate::gateway::{decode_rows, tables, GatewayError, Query, SortDirection};
use crate::models::{Case, CaseDraft};
use crate::types::RowId;

/// Files picked for a case, uploaded only when it is saved
#[derive(Debug, Clone, Default)]
pub struct CaseImages {
    pub before: Option<ImageUpload>,
    pub after: Option<ImageUpload>,
}

impl AdminWorkspace {
    pub async fn load_cases(&mut self) -> AdminResult<&[Case]> {
        let query = Query::new().order_by("created_at", SortDirection::Desc);
        let rows = self
            .gateway
            .select(tables::CASES, &query)
            .await
            .map_err(AdminError::remote("Failed to load cases"))?;
        self.cases = decode_rows(rows).map_err(AdminError::remote("Failed to load cases"))?;
        Ok(&self.cases)
    }

    /// Create (`id` absent) or update a case.
    ///
    /// Images are uploaded first, each on its own; a failed upload leaves the
    /// row with the URL it already had. New cases go to the top of the list.
    pub async fn save_case(&mut self, id: Option<RowId>, mut draft: CaseDraft, images: CaseImages) -> AdminResult<Case> {
        draft.validate()?;

        // An update that leaves an image out keeps the one already stored.
        if let Some(loaded) = id.as_ref().and_then(|id| self.cases.iter().find(|c| &c.id == id)) {
            if draft.before_image.is_none() {
                draft.before_image = loaded.before_image.clone();
            }
            if draft.after_image.is_none() {
                draft.after_image = loaded.after_image.clone();
            }
        }

        let gateway = self.gateway.as_ref();
        draft.before_image = upload_or_keep(
            gateway,
            &self.bucket,
            ImageSlot::Before,
            images.before.as_ref(),
            draft.before_image.take(),
        )
        .await;
        draft.after_image = upload_or_keep(
            gateway,
            &self.bucket,
            ImageSlot::After,
            images.after.as_ref(),
            draft.after_image.take(),
        )
        .await;

        match id {
            None => {
                let row = self
                    .gateway
                    .insert(tables::CASES, draft.to_row())
                    .await
                    .map_err(AdminError::remote("Failed to create case"))?;
                let case: Case = serde_json::from_value(row)
                    .map_err(GatewayError::from)
                    .map_err(AdminError::remote("Failed to create case"))?;
                patch::prepend(&mut self.cases, case.clone());
                Ok(case)
            }
            Some(id) => {
                let rows = self
                    .gateway
                    .update(tables::CASES, &Query::new().id(&id), draft.to_row())
                    .await
                    .map_err(AdminError::remote("Failed to update case"))?;
                let created_at = self
                    .cases
                    .iter()
                    .find(|c| c.id == id)
                    .and_then(|c| c.created_at.clone());
                let case = match rows.into_iter().next().map(serde_json::from_value::<Case>) {
                    Some(Ok(case)) => case,
                    _ => draft.applied_to(id, created_at),
                };
                patch::replace_by_id(&mut self.cases, case.clone());
                Ok(case)
            }
        }
    }

    /// Delete one case. Nothing is sent without `confirmed`.
    pub async fn delete_case(&mut self, id: &RowId, confirmed: bool) -> AdminResult<()> {
        if !confirmed {
            return Err(AdminError::Unconfirmed);
        }
        self.gateway
            .delete(tables::CASES, &Query::new().id(id))
            .await
            .map_err(AdminError::remote("Failed to delete case"))?;
        patch::remove_by_id(&mut self.cases, id);
        Ok(())
    }
}
