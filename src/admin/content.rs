use super::patch;
use super::{AdminError, AdminResult, AdminWorkspace};
use crate::gateway::{decode_rows, tables, GatewayError, Query};
use crate::models::{BlockEdit, ContactInfo, ContentBlock};
use crate::types::RowId;

/// Id written when no contact-info row exists yet
const CONTACT_INFO_ID: i64 = 1;

impl AdminWorkspace {
    pub async fn load_blocks(&mut self) -> AdminResult<&[ContentBlock]> {
        let rows = self
            .gateway
            .select(tables::CONTENT_BLOCKS, &Query::new())
            .await
            .map_err(AdminError::remote("Failed to load content blocks"))?;
        self.blocks = decode_rows(rows).map_err(AdminError::remote("Failed to load content blocks"))?;
        Ok(&self.blocks)
    }

    /// Rewrite a block's title and description. Blocks are never created or
    /// deleted from here.
    pub async fn save_block(&mut self, id: &RowId, edit: BlockEdit) -> AdminResult<ContentBlock> {
        let rows = self
            .gateway
            .update(tables::CONTENT_BLOCKS, &Query::new().id(id), edit.to_row())
            .await
            .map_err(AdminError::remote("Error saving block"))?;

        let block = match self.blocks.iter().find(|b| &b.id == id) {
            Some(current) => edit.applied_to(current),
            None => {
                let row = rows.into_iter().next().ok_or_else(|| AdminError::Missing(id.clone()))?;
                serde_json::from_value(row)
                    .map_err(GatewayError::from)
                    .map_err(AdminError::remote("Error saving block"))?
            }
        };
        patch::replace_by_id(&mut self.blocks, block.clone());
        Ok(block)
    }

    pub async fn load_contact_info(&mut self) -> AdminResult<&ContactInfo> {
        let row = self
            .gateway
            .select_single(tables::CONTACT_INFO, &Query::new())
            .await
            .map_err(AdminError::remote("Failed to load contact details"))?;
        let info: ContactInfo = serde_json::from_value(row)
            .map_err(GatewayError::from)
            .map_err(AdminError::remote("Failed to load contact details"))?;
        Ok(self.contact.insert(info))
    }

    /// Upsert the singleton row over the loaded id, stamping `updated_at`.
    pub async fn save_contact_info(&mut self, info: ContactInfo) -> AdminResult<ContactInfo> {
        let unset = RowId::default();
        let id = match &self.contact {
            Some(loaded) if loaded.id != unset => loaded.id.clone(),
            _ if info.id != unset => info.id.clone(),
            _ => RowId::Int(CONTACT_INFO_ID),
        };

        let row = self
            .gateway
            .upsert(tables::CONTACT_INFO, info.to_upsert_row(&id, chrono::Utc::now()))
            .await
            .map_err(AdminError::remote("Error updating contact details"))?;
        let saved: ContactInfo = serde_json::from_value(row)
            .map_err(GatewayError::from)
            .map_err(AdminError::remote("Error updating contact details"))?;
        self.contact = Some(saved.clone());
        Ok(saved)
    }
}
