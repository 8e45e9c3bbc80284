// src/domain/case/entity.rs
use crate::domain::audit::diff::AuditedField;
use crate::domain::case::code::CaseCode;
use crate::domain::case::value_objects::{ArchiveLocation, CaseId, PropertyName, Requester};
use crate::domain::checklist::ChecklistState;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Case fields as submitted by a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawCaseFields {
    pub code: String,
    pub property_name: String,
    pub legal_representative: Option<String>,
    pub agents: Option<String>,
    pub inspection_address: Option<String>,
    pub phone: Option<String>,
    pub requested_by: String,
    pub archive_location: Option<String>,
}

/// The user-editable part of a case, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFields {
    pub code: CaseCode,
    pub property_name: PropertyName,
    pub legal_representative: Option<String>,
    pub agents: Option<String>,
    pub inspection_address: Option<String>,
    pub phone: Option<String>,
    pub requested_by: Requester,
    pub archive_location: Option<ArchiveLocation>,
}

impl CaseFields {
    pub fn parse(raw: RawCaseFields) -> DomainResult<Self> {
        let RawCaseFields {
            code,
            property_name,
            legal_representative,
            agents,
            inspection_address,
            phone,
            requested_by,
            archive_location,
        } = raw;

        if code.trim().is_empty() {
            return Err(DomainError::Validation("case code is required".into()));
        }
        let property_name = PropertyName::new(property_name)?;
        let requested_by: Requester = requested_by.parse()?;
        let code = CaseCode::parse(&code)?;

        Ok(Self {
            code,
            property_name,
            legal_representative: optional_text(legal_representative),
            agents: optional_text(agents),
            inspection_address: optional_text(inspection_address),
            phone: optional_text(phone),
            requested_by,
            archive_location: ArchiveLocation::parse_lenient(archive_location.as_deref()),
        })
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Mutable case fields, in the order changes are written to the audit log.
pub const CASE_AUDITED_FIELDS: &[AuditedField<CaseFields>] = &[
    AuditedField {
        name: "code",
        read: |f: &CaseFields| Some(f.code.to_string()),
    },
    AuditedField {
        name: "property_name",
        read: |f: &CaseFields| Some(f.property_name.to_string()),
    },
    AuditedField {
        name: "legal_representative",
        read: |f: &CaseFields| f.legal_representative.clone(),
    },
    AuditedField {
        name: "agents",
        read: |f: &CaseFields| f.agents.clone(),
    },
    AuditedField {
        name: "inspection_address",
        read: |f: &CaseFields| f.inspection_address.clone(),
    },
    AuditedField {
        name: "phone",
        read: |f: &CaseFields| f.phone.clone(),
    },
    AuditedField {
        name: "requested_by",
        read: |f: &CaseFields| Some(f.requested_by.to_string()),
    },
    AuditedField {
        name: "archive_location",
        read: |f: &CaseFields| f.archive_location.map(|a| a.to_string()),
    },
];

pub const VISIT_COUNT_FIELD: &str = "visit_count";

#[derive(Debug, Clone)]
pub struct Case {
    pub id: CaseId,
    pub fields: CaseFields,
    pub visit_count: u32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
}

impl Case {
    pub fn code(&self) -> &CaseCode {
        &self.fields.code
    }

    /// Human-readable tag recorded when the case is deleted.
    pub fn snapshot_tag(&self) -> String {
        format!("EXP:{}", self.fields.code)
    }

    pub fn created_year(&self) -> String {
        self.created_at.format("%Y").to_string()
    }

    pub fn visits_after_increment(&self) -> u32 {
        self.visit_count.saturating_add(1)
    }

    pub fn visits_after_decrement(&self) -> u32 {
        self.visit_count.saturating_sub(1)
    }
}

#[derive(Debug, Clone)]
pub struct NewCase {
    pub fields: CaseFields,
    pub checklist: ChecklistState,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct CaseUpdate {
    pub id: CaseId,
    pub fields: CaseFields,
    pub checklist: ChecklistState,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
}

#[derive(Debug, Clone, Copy)]
pub struct VisitCountChange {
    pub id: CaseId,
    pub visit_count: u32,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawCaseFields {
        RawCaseFields {
            code: "12/0126".into(),
            property_name: "Plaza Central".into(),
            legal_representative: Some("  ".into()),
            agents: Some(" Juan Pérez ".into()),
            inspection_address: None,
            phone: Some("449 000 0000".into()),
            requested_by: "Apoderado".into(),
            archive_location: Some("Archivo 7".into()),
        }
    }

    #[test]
    fn parse_normalizes_code_and_blank_fields() {
        let fields = CaseFields::parse(raw()).unwrap();
        assert_eq!(fields.code.as_str(), "0012/0126/DPCJM");
        assert_eq!(fields.legal_representative, None);
        assert_eq!(fields.agents.as_deref(), Some("Juan Pérez"));
        assert_eq!(fields.requested_by, Requester::Agent);
        assert_eq!(fields.archive_location, None);
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let mut missing_code = raw();
        missing_code.code = "  ".into();
        assert!(matches!(
            CaseFields::parse(missing_code),
            Err(DomainError::Validation(_))
        ));

        let mut missing_name = raw();
        missing_name.property_name = String::new();
        assert!(matches!(
            CaseFields::parse(missing_name),
            Err(DomainError::Validation(_))
        ));

        let mut bad_requester = raw();
        bad_requester.requested_by = "Vecino".into();
        assert!(matches!(
            CaseFields::parse(bad_requester),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn bad_code_surfaces_the_code_error() {
        let mut bad = raw();
        bad.code = "AB/0126".into();
        assert!(matches!(
            CaseFields::parse(bad),
            Err(DomainError::InvalidCode(
                crate::domain::case::CaseCodeError::NonNumericSequence
            ))
        ));
    }
}
