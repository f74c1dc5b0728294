use crate::error::TransferError;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// The user's chosen input. Only the path is held; bytes are read when a
/// transfer starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: Option<u64>,
    pub media_type: String,
}

impl SelectedFile {
    /// Returns `None` for paths without a final component (e.g. `/`).
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_string_lossy().into_owned();
        let size = std::fs::metadata(&path).ok().map(|m| m.len());
        let media_type = media_type_for(&path).to_string();
        Some(Self {
            path,
            name,
            size,
            media_type,
        })
    }
}

fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// How the transport must hand back the response body. The controller always
/// asks for `Binary`; `Text` is the other half of that choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Opaque bytes, untouched.
    Binary,
    /// Decoded as text using the response charset, then re-encoded as UTF-8.
    Text,
}

/// A converted document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedArtifact {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Messages from the transfer worker to the controller.
#[derive(Debug)]
pub enum TransferEvent {
    Progress(u8),
    Finished(Result<Bytes, TransferError>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn selected_file_reads_name_and_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.pdf");
        std::fs::write(&path, b"%PDF-1.7 body").unwrap();

        let file = SelectedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "book.pdf");
        assert_eq!(file.size, Some(13));
        assert_eq!(file.media_type, "application/pdf");
    }

    #[test]
    fn missing_file_still_selectable() {
        let file = SelectedFile::from_path("/nowhere/Scan.PDF").unwrap();
        assert_eq!(file.name, "Scan.PDF");
        assert_eq!(file.size, None);
        assert_eq!(file.media_type, "application/pdf");
    }

    #[test]
    fn other_extensions_are_octet_stream() {
        let file = SelectedFile::from_path("notes.txt").unwrap();
        assert_eq!(file.media_type, "application/octet-stream");
    }

    #[test]
    fn root_has_no_name() {
        assert!(SelectedFile::from_path("/").is_none());
    }
}
