// src/domain/case/mod.rs
pub mod code;
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use code::{CODE_SUFFIX, CaseCode, CaseCodeError, normalize};
pub use entity::{
    CASE_AUDITED_FIELDS, Case, CaseFields, CaseUpdate, NewCase, RawCaseFields, VISIT_COUNT_FIELD,
    VisitCountChange,
};
pub use repository::{CaseListFilter, CaseReadRepository, CaseWriteRepository, SortDirection};
pub use value_objects::{ArchiveLocation, CaseId, PropertyName, Requester};
