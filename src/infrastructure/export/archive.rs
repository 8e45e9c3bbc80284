// src/infrastructure/export/archive.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::export::{CaseDocument, DocumentArchiver},
};
use std::io::{Cursor, Write};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Deflate-compressed ZIP, one entry per document.
#[derive(Debug, Default, Clone)]
pub struct ZipArchiver;

fn zip_error(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::infrastructure(format!("archive creation failed: {err}"))
}

impl DocumentArchiver for ZipArchiver {
    fn archive(&self, documents: &[CaseDocument]) -> ApplicationResult<Vec<u8>> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for document in documents {
            writer
                .start_file(document.file_name.as_str(), options)
                .map_err(zip_error)?;
            writer.write_all(&document.bytes).map_err(zip_error)?;
        }

        let cursor = writer.finish().map_err(zip_error)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn every_document_becomes_one_entry() {
        let documents = vec![
            CaseDocument {
                file_name: "0001-0126-DPCJM.pdf".into(),
                bytes: b"%PDF-uno".to_vec(),
            },
            CaseDocument {
                file_name: "0002-0126-DPCJM.pdf".into(),
                bytes: b"%PDF-dos".to_vec(),
            },
        ];

        let bytes = ZipArchiver.archive(&documents).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut entry = archive.by_name("0002-0126-DPCJM.pdf").unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"%PDF-dos");
    }

    #[test]
    fn empty_input_is_still_a_valid_archive() {
        let bytes = ZipArchiver.archive(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
