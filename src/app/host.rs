use crate::error::SaveError;
use crate::upload::ConvertedArtifact;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub trait ArtifactSink: Send {
    /// Returns the saved path, or `None` when the user declined to save.
    fn deliver(&self, artifact: ConvertedArtifact) -> Result<Option<PathBuf>, SaveError>;
}

pub trait Notifier: Send {
    fn alert(&self, message: &str);
}

pub struct SaveDialogSink {
    directory: Option<PathBuf>,
    extension: String,
    reveal: bool,
}

impl SaveDialogSink {
    pub fn new(directory: Option<PathBuf>, extension: impl Into<String>, reveal: bool) -> Self {
        Self {
            directory,
            extension: extension.into(),
            reveal,
        }
    }
}

impl ArtifactSink for SaveDialogSink {
    fn deliver(&self, artifact: ConvertedArtifact) -> Result<Option<PathBuf>, SaveError> {
        let filter_name = self.extension.to_uppercase();
        let mut dialog = FileDialog::new()
            .set_title("Save converted document")
            .set_file_name(artifact.file_name.as_str())
            .add_filter(&filter_name, &[self.extension.as_str()]);
        if let Some(directory) = &self.directory {
            dialog = dialog.set_directory(directory);
        }

        let Some(target) = dialog.save_file() else {
            info!(file = %artifact.file_name, "Save cancelled");
            return Ok(None);
        };

        let saved = save_artifact(&target, &artifact)?;
        if self.reveal {
            if let Some(folder) = saved.parent() {
                if let Err(e) = open::that(folder) {
                    warn!(error = %e, folder = %folder.display(), "Failed to open folder");
                }
            }
        }
        Ok(Some(saved))
    }
}

pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn alert(&self, message: &str) {
        let _ = MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Reflowable")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Writes through a temp file in the target directory, then renames it into place.
pub fn save_artifact(target: &Path, artifact: &ConvertedArtifact) -> Result<PathBuf, SaveError> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(SaveError::NoParent {
                path: target.to_path_buf(),
            })
        }
    };
    let write_err = |source| SaveError::Write {
        path: target.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(&artifact.bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;

    info!(path = %target.display(), bytes = artifact.bytes.len(), "Saved converted document");
    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::TempDir;

    fn artifact() -> ConvertedArtifact {
        ConvertedArtifact {
            file_name: "book.epub".to_string(),
            bytes: Bytes::from_static(&[0x50, 0x4b, 0x03, 0x04, 0xff, 0x00]),
        }
    }

    #[test]
    fn writes_exact_bytes() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("book.epub");

        let saved = save_artifact(&target, &artifact()).unwrap();
        assert_eq!(saved, target);
        assert_eq!(std::fs::read(&target).unwrap(), artifact().bytes.to_vec());
    }

    #[test]
    fn replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("book.epub");
        std::fs::write(&target, b"stale content that is longer").unwrap();

        save_artifact(&target, &artifact()).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), artifact().bytes.to_vec());
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        save_artifact(&dir.path().join("book.epub"), &artifact()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("book.epub");

        let err = save_artifact(&target, &artifact()).unwrap_err();
        assert!(matches!(err, SaveError::Write { .. }), "got: {err}");
        assert!(!target.exists());
    }
}
