pub mod audit;
pub mod auth;
pub mod cases;
pub mod export;
pub mod serde_time;
pub mod users;

pub use audit::AuditLogDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use cases::{CaseDetailDto, CaseDto, CaseListDto, ChecklistEntryDto, ChecklistItemDto};
pub use export::ExportedFile;
pub use users::{CapabilityView, UserDto, UserProfileDto};
