//! Editor session with undo/redo history.
//!
//! The session holds the current page as an `Arc<Page>` snapshot. Tree
//! operations return new pages that share untouched subtrees, so keeping
//! every previous snapshot in the history costs little.

use std::collections::VecDeque;
use std::sync::Arc;

use churchlink_core::error::AppError;
use churchlink_core::result::AppResult;
use churchlink_entity::TreeError;
use churchlink_entity::page::{
    Node, NodeId, NodePatch, Page, ParentId, SaveReceipt, SectionId, SectionV2,
};
use tracing::debug;

/// One page being edited.
#[derive(Debug, Clone)]
pub struct EditorSession {
    current: Arc<Page>,
    /// Snapshot last loaded from or stored to the backend.
    saved: Arc<Page>,
    /// Revision the next save is based on.
    base_revision: u64,
    undo_stack: VecDeque<Arc<Page>>,
    redo_stack: Vec<Arc<Page>>,
    max_undo_steps: usize,
}

impl EditorSession {
    /// Start editing a page as loaded from the store.
    pub fn new(page: Page, max_undo_steps: usize) -> Self {
        let base_revision = page.revision;
        let page = Arc::new(page);
        Self {
            current: page.clone(),
            saved: page,
            base_revision,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo_steps: max_undo_steps.max(1),
        }
    }

    /// The current page.
    pub fn page(&self) -> &Arc<Page> {
        &self.current
    }

    /// Slug of the page being edited.
    pub fn slug(&self) -> &str {
        &self.current.slug
    }

    /// Revision the next save is based on.
    pub fn base_revision(&self) -> u64 {
        self.base_revision
    }

    /// Whether the current page differs from the last saved snapshot.
    pub fn is_dirty(&self) -> bool {
        !Arc::ptr_eq(&self.current, &self.saved)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of snapshots available to undo.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Apply an edit. On success the previous page is pushed to the undo
    /// history and the redo history is dropped; on failure nothing changes.
    pub fn apply<F>(&mut self, edit: F) -> AppResult<()>
    where
        F: FnOnce(&Page) -> Result<Page, TreeError>,
    {
        let next = edit(&self.current)?;
        self.replace(next);
        Ok(())
    }

    /// Make `page` the current page, recording history.
    pub fn replace(&mut self, page: Page) {
        let previous = std::mem::replace(&mut self.current, Arc::new(page));
        self.push_history(previous);
    }

    pub fn insert(&mut self, parent: &ParentId, index: usize, node: Node) -> AppResult<()> {
        self.apply(|page| page.insert(parent, index, node))
    }

    pub fn update(&mut self, id: &NodeId, patch: NodePatch) -> AppResult<()> {
        self.apply(|page| page.update(id, patch))
    }

    /// Remove a node and return the detached subtree.
    pub fn remove(&mut self, id: &NodeId) -> AppResult<Arc<Node>> {
        let (next, removed) = self.current.remove(id)?;
        self.replace(next);
        Ok(removed)
    }

    pub fn reorder(&mut self, parent: &ParentId, from: usize, to: usize) -> AppResult<()> {
        self.apply(|page| page.reorder(parent, from, to))
    }

    pub fn move_node(&mut self, id: &NodeId, parent: &ParentId, index: usize) -> AppResult<()> {
        self.apply(|page| page.move_node(id, parent, index))
    }

    pub fn insert_section(&mut self, index: usize, section: SectionV2) -> AppResult<()> {
        self.apply(|page| page.insert_section(index, section))
    }

    pub fn remove_section(&mut self, id: &SectionId) -> AppResult<Arc<SectionV2>> {
        let (next, removed) = self.current.remove_section(id)?;
        self.replace(next);
        Ok(removed)
    }

    pub fn reorder_sections(&mut self, from: usize, to: usize) -> AppResult<()> {
        self.apply(|page| page.reorder_sections(from, to))
    }

    /// Step back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(current);
        true
    }

    /// Re-apply an undone edit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(current);
        true
    }

    /// Adopt the revision the backend stored. History is kept.
    pub fn mark_saved(&mut self, receipt: &SaveReceipt) {
        let mut page = Page::clone(&self.current);
        page.revision = receipt.revision;
        page.updated_at = receipt.updated_at;
        self.current = Arc::new(page);
        self.saved = self.current.clone();
        self.base_revision = receipt.revision;
        debug!(slug = %self.current.slug, revision = receipt.revision, "Session saved");
    }

    /// Ensure the session has something worth saving.
    pub fn require_dirty(&self) -> AppResult<()> {
        if self.is_dirty() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Page '{}' has no unsaved changes",
                self.current.slug
            )))
        }
    }

    fn push_history(&mut self, previous: Arc<Page>) {
        self.redo_stack.clear();
        self.undo_stack.push_back(previous);
        if self.undo_stack.len() > self.max_undo_steps {
            self.undo_stack.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use churchlink_core::error::ErrorKind;
    use churchlink_entity::page::NodeContent;

    fn section_id() -> SectionId {
        SectionId::new("hero").unwrap()
    }

    fn session(max: usize) -> EditorSession {
        let mut page = Page::new("Home", "home")
            .with_sections(vec![SectionV2::new(section_id(), "Hero")]);
        page.revision = 4;
        EditorSession::new(page, max)
    }

    fn text(id: &str) -> Node {
        Node::new(NodeId::new(id).unwrap(), NodeContent::text(id))
    }

    #[test]
    fn test_edit_marks_dirty_and_undo_restores() {
        let mut s = session(10);
        assert!(!s.is_dirty());

        s.insert(&section_id().into(), 0, text("a")).unwrap();
        assert!(s.is_dirty());
        assert_eq!(s.page().node_count(), 1);

        assert!(s.undo());
        assert_eq!(s.page().node_count(), 0);
        assert!(!s.is_dirty());

        assert!(s.redo());
        assert_eq!(s.page().node_count(), 1);
        assert!(!s.redo());
    }

    #[test]
    fn test_failed_edit_changes_nothing() {
        let mut s = session(10);
        let err = s
            .insert(&section_id().into(), 5, text("a"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!s.can_undo());
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_new_edit_drops_redo() {
        let mut s = session(10);
        s.insert(&section_id().into(), 0, text("a")).unwrap();
        s.undo();
        s.insert(&section_id().into(), 0, text("b")).unwrap();
        assert!(!s.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut s = session(2);
        for id in ["a", "b", "c", "d"] {
            s.insert(&section_id().into(), 0, text(id)).unwrap();
        }
        assert_eq!(s.undo_depth(), 2);
        assert!(s.undo());
        assert!(s.undo());
        assert!(!s.undo());
        assert_eq!(s.page().node_count(), 2);
    }

    #[test]
    fn test_mark_saved_adopts_revision() {
        let mut s = session(10);
        s.insert(&section_id().into(), 0, text("a")).unwrap();
        assert_eq!(s.base_revision(), 4);

        s.mark_saved(&SaveReceipt {
            revision: 5,
            updated_at: None,
        });
        assert!(!s.is_dirty());
        assert_eq!(s.base_revision(), 5);
        assert_eq!(s.page().revision, 5);
        assert!(s.require_dirty().is_err());
    }

    #[test]
    fn test_remove_returns_subtree() {
        let mut s = session(10);
        s.insert(&section_id().into(), 0, text("a")).unwrap();
        let removed = s.remove(&NodeId::new("a").unwrap()).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(s.undo_depth(), 2);
    }
}
