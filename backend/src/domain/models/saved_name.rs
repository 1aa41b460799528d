use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Longest name accepted for the picker lists
pub const MAX_NAME_LENGTH: usize = 100;

/// Which picker list a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Worker,
    Auditor,
}

impl NameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Worker => "worker",
            NameKind::Auditor => "auditor",
        }
    }
}

impl FromStr for NameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "worker" => Ok(NameKind::Worker),
            "auditor" => Ok(NameKind::Auditor),
            other => Err(format!("Unknown name type '{}'", other)),
        }
    }
}

/// A worker or auditor name offered by the pickers.
///
/// Names are deactivated rather than deleted so that old sessions and reports
/// keep their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedName {
    pub id: i64,
    pub name: String,
    pub kind: NameKind,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameValidationError {
    #[error("Name cannot be empty")]
    Empty,
    #[error("Name is too long ({0} characters, max 100)")]
    TooLong(usize),
}

/// Trim and check a name before it is stored
pub fn normalize_name(name: &str) -> Result<String, NameValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::Empty);
    }
    let length = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(NameValidationError::TooLong(length));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  José Pérez "), Ok("José Pérez".to_string()));
        assert_eq!(normalize_name("   "), Err(NameValidationError::Empty));
        let long = "a".repeat(101);
        assert_eq!(normalize_name(&long), Err(NameValidationError::TooLong(101)));
        assert!(normalize_name(&"ñ".repeat(100)).is_ok());
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [NameKind::Worker, NameKind::Auditor] {
            assert_eq!(kind.as_str().parse::<NameKind>().unwrap(), kind);
        }
        assert!("manager".parse::<NameKind>().is_err());
    }
}
