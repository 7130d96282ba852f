//! Undoable page editing.

pub mod session;

pub use session::EditorSession;
