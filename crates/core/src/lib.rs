//! Headless core of the shaper editor.
//!
//! Everything that has invariants lives here: the fixed-capacity shape
//! model, the circular versioned history log, the per-frame interaction
//! state machine and the document binding. The gui crate only samples
//! input, paints, and implements the collaborator traits for file
//! dialogs and disk I/O.

pub mod document;
pub mod error;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod shape;
pub mod view;

pub use document::{Document, FilePicker, FileStore, PolygonFile, SaveResult, WindowTitle};
pub use error::EditorError;
pub use history::{HistoryLog, HISTORY_CAPACITY};
pub use interaction::{
    ButtonState, DragSession, DragTarget, FrameInput, FrameStatus, Interaction, MouseButton,
    Session, VERTEX_RADIUS,
};
pub use shape::{Shape, MAX_VERTICES};
pub use view::ViewTransform;
