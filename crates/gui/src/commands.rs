//! File commands and the native collaborator implementations
//!
//! Menus and shortcuts only queue a [`FileCommand`]; the app executes
//! at most one per frame, after the UI pass. The core's dialog and
//! disk boundaries are implemented here with rfd and std::fs.

use std::path::{Path, PathBuf};

use shaper_core::document::{self, SaveResult, FILE_EXTENSION};
use shaper_core::{EditorError, FilePicker, FileStore, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCommand {
    New,
    Open,
    Save,
    SaveAs,
}

/// rfd-backed file dialogs.
pub struct NativePicker;

impl FilePicker for NativePicker {
    fn open_file(&mut self) -> Result<Option<PathBuf>, EditorError> {
        Ok(rfd::FileDialog::new()
            .set_title("Open polygon")
            .add_filter("Polygon JSON", &[FILE_EXTENSION])
            .pick_file())
    }

    fn save_file(&mut self) -> Result<Option<PathBuf>, EditorError> {
        Ok(rfd::FileDialog::new()
            .set_title("Save polygon")
            .add_filter("Polygon JSON", &[FILE_EXTENSION])
            .set_file_name("shape.json")
            .save_file())
    }
}

/// Whole-file disk I/O.
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, EditorError> {
        std::fs::read(path).map_err(|e| EditorError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), EditorError> {
        std::fs::write(path, bytes).map_err(|e| EditorError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Run one file command against the session.
pub fn execute(command: FileCommand, session: &mut Session) -> Result<(), EditorError> {
    let mut picker = NativePicker;
    let store = DiskStore;

    match command {
        FileCommand::New => {
            session.new_document();
            tracing::info!("new document");
        }
        FileCommand::Open => {
            if let Some((shape, path)) = document::open(&mut picker, &store)? {
                session.open_shape(shape, path);
            }
        }
        FileCommand::Save => {
            let result = document::save(
                &mut session.document,
                session.history.current_shape(),
                session.history.current_version(),
                &mut picker,
                &store,
            )?;
            if result == SaveResult::Cancelled {
                tracing::debug!("save cancelled");
            }
        }
        FileCommand::SaveAs => {
            let result = document::save_as(
                &mut session.document,
                session.history.current_shape(),
                session.history.current_version(),
                &mut picker,
                &store,
            )?;
            if result == SaveResult::Cancelled {
                tracing::debug!("save-as cancelled");
            }
        }
    }
    Ok(())
}
