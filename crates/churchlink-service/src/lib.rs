//! # churchlink-service
//!
//! Use cases of the ChurchLink web builder: the undoable editor session,
//! the localization backfill, page and navigation services, the
//! latest-response guard for searches, and an in-memory store.
//!
//! Services take their collaborators as `Arc<dyn Trait>` at construction
//! time, so the same code runs against the REST client and the memory store.

pub mod editor;
pub mod localization;
pub mod navigation;
pub mod page;
pub mod sequence;
pub mod store;

pub use editor::EditorSession;
pub use localization::{BackfillReport, LocalizationService};
pub use navigation::NavigationService;
pub use page::PageService;
pub use sequence::{LatestOnly, Ticket};
pub use store::{MemoryPageStore, Snapshot};
