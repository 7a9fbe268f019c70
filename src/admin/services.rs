use super::patch;
use super::{AdminError, AdminResult, AdminWorkspace};
use crate::gateway::{decode_rows, tables, GatewayError, Query};
use crate::models::{Service, ServiceDraft};
use crate::types::RowId;

impl AdminWorkspace {
    pub async fn load_services(&mut self) -> AdminResult<&[Service]> {
        let rows = self
            .gateway
            .select(tables::SERVICES, &Query::new())
            .await
            .map_err(AdminError::remote("Failed to load services"))?;
        self.services = decode_rows(rows).map_err(AdminError::remote("Failed to load services"))?;
        Ok(&self.services)
    }

    /// Create (`id` absent) or update a service. New services are appended.
    pub async fn save_service(&mut self, id: Option<RowId>, draft: ServiceDraft) -> AdminResult<Service> {
        draft.validate()?;

        let service = match id {
            None => {
                let row = self
                    .gateway
                    .insert(tables::SERVICES, draft.to_row())
                    .await
                    .map_err(AdminError::remote("Failed to add service"))?;
                let service: Service = serde_json::from_value(row)
                    .map_err(GatewayError::from)
                    .map_err(AdminError::remote("Failed to add service"))?;
                patch::append(&mut self.services, service.clone());
                service
            }
            Some(id) => {
                self.gateway
                    .update(tables::SERVICES, &Query::new().id(&id), draft.to_row())
                    .await
                    .map_err(AdminError::remote("Failed to update service"))?;
                let service = draft.applied_to(id);
                patch::replace_by_id(&mut self.services, service.clone());
                service
            }
        };
        Ok(service)
    }

    pub async fn delete_service(&mut self, id: &RowId, confirmed: bool) -> AdminResult<()> {
        if !confirmed {
            return Err(AdminError::Unconfirmed);
        }
        self.gateway
            .delete(tables::SERVICES, &Query::new().id(id))
            .await
            .map_err(AdminError::remote("Failed to delete service"))?;
        patch::remove_by_id(&mut self.services, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::test_support::workspace;
    use crate::types::Operation;

    fn draft(title: &str, icon: &str) -> ServiceDraft {
        ServiceDraft {
            title: title.to_string(),
            description: "By hand".to_string(),
            icon: icon.to_string(),
        }
    }

    #[tokio::test]
    async fn new_services_are_appended() {
        let (mut ws, _gw) = workspace();
        ws.save_service(None, draft("Polish", "brush")).await.unwrap();
        ws.save_service(None, draft("Paint", "palette")).await.unwrap();
        let titles: Vec<_> = ws.services.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Polish", "Paint"]);
        assert_eq!(ws.services[0].id, RowId::Int(1));
    }

    #[tokio::test]
    async fn unknown_icon_is_rejected() {
        let (mut ws, gw) = workspace();
        let err = ws.save_service(None, draft("Polish", "dragon")).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(gw.count(Operation::Insert, tables::SERVICES), 0);
    }

    #[tokio::test]
    async fn update_and_delete_by_id() {
        let (mut ws, gw) = workspace();
        let first = ws.save_service(None, draft("Polish", "brush")).await.unwrap();
        ws.save_service(None, draft("Paint", "palette")).await.unwrap();

        ws.save_service(Some(first.id.clone()), draft("Polishing", "sparkles"))
            .await
            .unwrap();
        assert_eq!(ws.services[0].title, "Polishing");
        assert_eq!(gw.rows(tables::SERVICES)[0]["icon"], "sparkles");

        ws.delete_service(&first.id, true).await.unwrap();
        assert_eq!(ws.services.len(), 1);
        assert_eq!(ws.services[0].title, "Paint");
    }
}
