use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::names::{AddNameCommand, AddNameResult};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::{normalize_name, NameKind, SavedName};
use crate::storage::traits::NameStorage;

/// Service for the worker and auditor picker lists
#[derive(Clone)]
pub struct NameService {
    storage: Arc<dyn NameStorage>,
}

impl NameService {
    pub fn new(storage: Arc<dyn NameStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_active(&self, kind: NameKind) -> ServiceResult<Vec<SavedName>> {
        info!("Listing active {} names", kind.as_str());
        Ok(self.storage.list_active_names(kind).await?)
    }

    /// Add a name to a picker list.
    ///
    /// A name that was removed earlier is reactivated instead of duplicated.
    pub async fn add_name(&self, command: AddNameCommand) -> ServiceResult<AddNameResult> {
        let name = normalize_name(&command.name)?;
        info!("Adding {} name '{}'", command.kind.as_str(), name);

        match self.storage.find_name(command.kind, &name).await? {
            Some(existing) if existing.is_active => {
                warn!("Name '{}' already exists", name);
                Err(ServiceError::Conflict(format!(
                    "{} name '{}' already exists",
                    command.kind.as_str(),
                    name
                )))
            }
            Some(existing) => {
                self.storage.set_name_active(existing.id, true).await?;
                info!("Reactivated name {} ('{}')", existing.id, name);
                Ok(AddNameResult {
                    name: SavedName {
                        is_active: true,
                        ..existing
                    },
                    reactivated: true,
                })
            }
            None => {
                let saved = self.storage.insert_name(command.kind, &name).await?;
                info!("Created name {} ('{}')", saved.id, saved.name);
                Ok(AddNameResult {
                    name: saved,
                    reactivated: false,
                })
            }
        }
    }

    /// Remove a name from its picker list; stored sessions keep the text
    pub async fn deactivate(&self, name_id: i64) -> ServiceResult<()> {
        info!("Deactivating name {}", name_id);

        let name = match self.storage.get_name(name_id).await? {
            Some(name) => name,
            None => {
                warn!("Name not found: {}", name_id);
                return Err(ServiceError::not_found("Name", name_id));
            }
        };
        if !name.is_active {
            info!("Name {} is already inactive", name_id);
            return Ok(());
        }

        if !self.storage.set_name_active(name_id, false).await? {
            return Err(ServiceError::not_found("Name", name_id));
        }
        Ok(())
    }
}
