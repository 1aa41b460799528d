//! backend/src/io/rest/mappers/name_mapper.rs

use shared::{CreateNameRequest, NameListResponse, NameType, SavedNameDto};

use crate::domain::commands::names::AddNameCommand;
use crate::domain::models::{NameKind, SavedName};

/// Mapper between picker name DTOs and domain names.
pub struct NameMapper;

impl NameMapper {
    pub fn to_kind(name_type: NameType) -> NameKind {
        match name_type {
            NameType::Worker => NameKind::Worker,
            NameType::Auditor => NameKind::Auditor,
        }
    }

    pub fn to_name_type(kind: NameKind) -> NameType {
        match kind {
            NameKind::Worker => NameType::Worker,
            NameKind::Auditor => NameType::Auditor,
        }
    }

    pub fn to_command(request: CreateNameRequest) -> AddNameCommand {
        AddNameCommand {
            name: request.name,
            kind: Self::to_kind(request.name_type),
        }
    }

    pub fn to_dto(name: &SavedName) -> SavedNameDto {
        SavedNameDto {
            id: name.id,
            name: name.name.clone(),
            name_type: Self::to_name_type(name.kind),
            is_active: name.is_active,
            created_at: name.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_dto(names: &[SavedName]) -> NameListResponse {
        NameListResponse {
            names: names.iter().map(Self::to_dto).collect(),
        }
    }
}
