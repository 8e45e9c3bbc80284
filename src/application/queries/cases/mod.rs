mod catalog;
mod common;
mod export;
mod get;
mod list;
mod service;

pub use export::{ARCHIVE_FILE_NAME, ExportCaseQuery, ExportCasesQuery};
pub use get::GetCaseQuery;
pub use list::ListCasesQuery;
pub use service::CaseQueryService;
