// src/infrastructure/export/mod.rs
mod archive;
mod layout;
mod metrics;
mod pdf;

pub use archive::ZipArchiver;
pub use pdf::PrintPdfRenderer;
