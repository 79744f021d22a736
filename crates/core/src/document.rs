//! Document binding: file path, saved-version marker, disk format
//!
//! The core decides *what* document to emit or consume; the actual
//! dialog and disk work happen behind the [`FilePicker`] and
//! [`FileStore`] collaborator traits, implemented by the gui crate
//! (and by in-memory fakes in tests).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::shape::Shape;

pub const FILE_EXTENSION: &str = "json";

/// Native file dialog boundary. `Ok(None)` is user cancellation and
/// silently aborts the command in progress.
pub trait FilePicker {
    fn open_file(&mut self) -> Result<Option<PathBuf>, EditorError>;
    fn save_file(&mut self) -> Result<Option<PathBuf>, EditorError>;
}

/// Whole-file disk I/O boundary.
pub trait FileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, EditorError>;
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), EditorError>;
}

/// Binds the edit history to a filesystem path. The document is dirty
/// whenever the current shape version differs from the version last
/// written to disk.
#[derive(Debug, Clone, Default)]
pub struct Document {
    path: Option<PathBuf>,
    saved_version: u64,
}

impl Document {
    /// Untitled document, never saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document freshly loaded from `path`; the loaded state counts as
    /// saved.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            saved_version: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn saved_version(&self) -> u64 {
        self.saved_version
    }

    pub fn is_dirty(&self, current_version: u64) -> bool {
        self.saved_version != current_version
    }

    pub fn mark_saved(&mut self, version: u64) {
        self.saved_version = version;
    }

    /// Replace the bound path (Save As, or first Save of an untitled
    /// document).
    pub fn bind_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// Filename for display, or "untitled".
    pub fn file_label(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_owned())
    }
}

/// Append the expected extension when the chosen path lacks it.
pub fn ensure_extension(path: PathBuf) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case(FILE_EXTENSION) => path,
        _ => {
            let mut raw = path.into_os_string();
            raw.push(".");
            raw.push(FILE_EXTENSION);
            PathBuf::from(raw)
        }
    }
}

/// On-disk document: `{"type": "polygon", "vertices": [[x, y], ...]}`.
/// Vertex order is preserved exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PolygonFile {
    Polygon { vertices: Vec<[f32; 2]> },
}

impl PolygonFile {
    pub fn from_shape(shape: &Shape) -> Self {
        Self::Polygon {
            vertices: shape.points().iter().map(|v| [v.x, v.y]).collect(),
        }
    }

    pub fn into_shape(self) -> Result<Shape, EditorError> {
        let Self::Polygon { vertices } = self;
        Shape::from_points(vertices.into_iter().map(|[x, y]| glam::vec2(x, y)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    Saved,
    Cancelled,
}

/// Save to the bound path, asking for one first if the document is
/// untitled. Marks the document clean at `version` on success.
pub fn save(
    doc: &mut Document,
    shape: &Shape,
    version: u64,
    picker: &mut dyn FilePicker,
    store: &dyn FileStore,
) -> Result<SaveResult, EditorError> {
    let path = match doc.path() {
        Some(path) => path.to_path_buf(),
        None => match picker.save_file()? {
            Some(chosen) => ensure_extension(chosen),
            None => return Ok(SaveResult::Cancelled),
        },
    };
    write_shape(&path, shape, store)?;
    tracing::info!("saved {} vertices to {}", shape.len(), path.display());
    doc.bind_path(path);
    doc.mark_saved(version);
    Ok(SaveResult::Saved)
}

/// Always ask for a new target, then save there.
pub fn save_as(
    doc: &mut Document,
    shape: &Shape,
    version: u64,
    picker: &mut dyn FilePicker,
    store: &dyn FileStore,
) -> Result<SaveResult, EditorError> {
    let Some(chosen) = picker.save_file()? else {
        return Ok(SaveResult::Cancelled);
    };
    let path = ensure_extension(chosen);
    write_shape(&path, shape, store)?;
    tracing::info!("saved {} vertices to {}", shape.len(), path.display());
    doc.bind_path(path);
    doc.mark_saved(version);
    Ok(SaveResult::Saved)
}

/// Ask for a file and load it. `Ok(None)` when the dialog is cancelled.
pub fn open(
    picker: &mut dyn FilePicker,
    store: &dyn FileStore,
) -> Result<Option<(Shape, PathBuf)>, EditorError> {
    match picker.open_file()? {
        Some(path) => {
            let shape = load_from_path(&path, store)?;
            Ok(Some((shape, path)))
        }
        None => Ok(None),
    }
}

/// Read and parse a polygon document.
pub fn load_from_path(path: &Path, store: &dyn FileStore) -> Result<Shape, EditorError> {
    let bytes = store.read(path)?;
    let file: PolygonFile =
        serde_json::from_slice(&bytes).map_err(|e| EditorError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let shape = file.into_shape().map_err(|e| EditorError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!("loaded {} vertices from {}", shape.len(), path.display());
    Ok(shape)
}

fn write_shape(path: &Path, shape: &Shape, store: &dyn FileStore) -> Result<(), EditorError> {
    let json = serde_json::to_string_pretty(&PolygonFile::from_shape(shape)).map_err(|e| {
        EditorError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    store.write(path, json.as_bytes())
}

/// Window title, recomputed only when the observed shape version,
/// saved version or bound path changes.
#[derive(Debug, Default)]
pub struct WindowTitle {
    text: String,
    seen: Option<(u64, u64, Option<PathBuf>)>,
}

impl WindowTitle {
    /// Returns the new title only on change, so the caller can skip
    /// redundant platform calls.
    pub fn refresh(&mut self, doc: &Document, version: u64) -> Option<&str> {
        let key = (
            version,
            doc.saved_version(),
            doc.path().map(Path::to_path_buf),
        );
        if self.seen.as_ref() == Some(&key) {
            return None;
        }
        let marker = if doc.is_dirty(version) { " *" } else { "" };
        self.text = format!("{}{marker} - shaper", doc.file_label());
        self.seen = Some(key);
        Some(&self.text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
