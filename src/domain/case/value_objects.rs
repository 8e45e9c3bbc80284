// src/domain/case/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseId(pub i64);

impl CaseId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("case id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CaseId> for i64 {
    fn from(value: CaseId) -> Self {
        value.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyName(String);

impl PropertyName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "property name cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PropertyName> for String {
    fn from(value: PropertyName) -> Self {
        value.0
    }
}

/// Who filed the request that opened the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requester {
    Owner,
    Agent,
    Operator,
}

impl Requester {
    pub const ALL: [Requester; 3] = [Requester::Owner, Requester::Agent, Requester::Operator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Requester::Owner => "Propietario",
            Requester::Agent => "Apoderado",
            Requester::Operator => "Operador",
        }
    }
}

impl fmt::Display for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Requester {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown requester '{s}'")))
    }
}

/// Physical cabinet the paper file is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveLocation {
    Cabinet1,
    Cabinet2,
    Cabinet3,
    Cabinet4,
}

impl ArchiveLocation {
    pub const ALL: [ArchiveLocation; 4] = [
        ArchiveLocation::Cabinet1,
        ArchiveLocation::Cabinet2,
        ArchiveLocation::Cabinet3,
        ArchiveLocation::Cabinet4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveLocation::Cabinet1 => "Archivo 1",
            ArchiveLocation::Cabinet2 => "Archivo 2",
            ArchiveLocation::Cabinet3 => "Archivo 3",
            ArchiveLocation::Cabinet4 => "Archivo 4",
        }
    }

    /// Unknown or blank values are dropped instead of rejected.
    pub fn parse_lenient(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == raw)
    }
}

impl fmt::Display for ArchiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requester_accepts_only_known_values() {
        assert_eq!("Propietario".parse::<Requester>().unwrap(), Requester::Owner);
        assert_eq!(" Operador ".parse::<Requester>().unwrap(), Requester::Operator);
        assert!("propietario".parse::<Requester>().is_err());
        assert!("".parse::<Requester>().is_err());
    }

    #[test]
    fn archive_location_outside_options_is_cleared() {
        assert_eq!(
            ArchiveLocation::parse_lenient(Some("Archivo 3")),
            Some(ArchiveLocation::Cabinet3)
        );
        assert_eq!(ArchiveLocation::parse_lenient(Some("Archivo 9")), None);
        assert_eq!(ArchiveLocation::parse_lenient(Some("")), None);
        assert_eq!(ArchiveLocation::parse_lenient(None), None);
    }

    #[test]
    fn property_name_is_trimmed_and_required() {
        assert_eq!(PropertyName::new("  Bodega  ").unwrap().as_str(), "Bodega");
        assert!(PropertyName::new("   ").is_err());
    }
}
