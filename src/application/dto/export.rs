/// A rendered download ready to be sent to a client.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub const PDF: &'static str = "application/pdf";
    pub const ZIP: &'static str = "application/zip";

    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: Self::PDF,
            bytes,
        }
    }

    pub fn zip(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: Self::ZIP,
            bytes,
        }
    }
}
