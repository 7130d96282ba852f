//! Copy-on-write editing of page trees.
//!
//! Every operation borrows the current page and returns a new one. Nodes
//! are held in `Arc`s, and only the spine from the page root down to the
//! edited list is cloned (`Arc::make_mut` on a freshly cloned page always
//! finds the spine shared with the original). Untouched sections and
//! subtrees stay pointer-equal between the old and the new page, which keeps
//! undo snapshots cheap.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use churchlink_core::types::LocaleCode;
use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::page::i18n::Localized;
use crate::page::id::{NodeId, ParentId, SectionId};
use crate::page::model::{Page, PageVersion};
use crate::page::node::{Node, NodeContent};
use crate::page::section::SectionV2;

/// Location of a node: a section index plus child indices from the
/// section's root list. `indices` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    /// Index into `Page::sections`.
    pub section: usize,
    /// Child indices from the section root down to the node.
    pub indices: Vec<usize>,
}

impl NodePath {
    /// The path of the list this node sits in.
    fn parent_indices(&self) -> &[usize] {
        &self.indices[..self.indices.len() - 1]
    }

    /// Position of the node within its sibling list.
    fn position(&self) -> usize {
        self.indices[self.indices.len() - 1]
    }
}

/// A shallow change to one node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePatch {
    /// Merge keys into the base-locale `props`. A `null` value removes the
    /// key. The merged props must still satisfy the node's variant.
    Base(Map<String, Value>),
    /// Set or clear per-locale overrides of translatable keys.
    Locale {
        /// Locale being edited.
        locale: LocaleCode,
        /// New state per key.
        values: BTreeMap<String, Localized>,
    },
}

impl Page {
    /// Find a node anywhere in the page.
    pub fn find(&self, id: &NodeId) -> Option<&Arc<Node>> {
        let path = self.locate(id)?;
        self.node_at(&path)
    }

    /// Find a section by id.
    pub fn section(&self, id: &SectionId) -> Option<&Arc<SectionV2>> {
        self.sections.iter().find(|section| section.id == *id)
    }

    /// Resolve a raw id typed by a user into a section or node parent.
    pub fn parent_ref(&self, raw: &str) -> Option<ParentId> {
        if let Some(section) = self.sections.iter().find(|s| s.id.as_str() == raw) {
            return Some(ParentId::Section(section.id.clone()));
        }
        self.walk()
            .find(|node| node.id.as_str() == raw)
            .map(|node| ParentId::Node(node.id.clone()))
    }

    /// The path of a node, if present.
    pub fn locate(&self, id: &NodeId) -> Option<NodePath> {
        fn search(children: &[Arc<Node>], id: &NodeId, trail: &mut Vec<usize>) -> bool {
            for (i, child) in children.iter().enumerate() {
                trail.push(i);
                if child.id == *id || search(&child.children, id, trail) {
                    return true;
                }
                trail.pop();
            }
            false
        }

        self.sections.iter().enumerate().find_map(|(s, section)| {
            let mut trail = Vec::new();
            search(&section.children, id, &mut trail).then(|| NodePath {
                section: s,
                indices: trail,
            })
        })
    }

    /// Preorder iterator over every node of every section.
    pub fn walk(&self) -> NodeIter<'_> {
        let mut stack: Vec<&Arc<Node>> = Vec::new();
        for section in self.sections.iter().rev() {
            stack.extend(section.children.iter().rev());
        }
        NodeIter { stack }
    }

    /// Number of nodes in the page.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Insert `node` (with its subtree) as child `index` of `parent`.
    pub fn insert(&self, parent: &ParentId, index: usize, node: Node) -> Result<Page, TreeError> {
        self.ensure_editable()?;
        validate_subtree(&node)?;
        self.ensure_ids_free(node.subtree_ids().into_iter().map(NodeId::as_str))?;

        let (section, indices) = self.locate_parent(parent)?;
        let mut page = self.clone();
        let children = page.children_mut(section, &indices)?;
        if index > children.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: children.len(),
            });
        }
        children.insert(index, Arc::new(node));
        Ok(page)
    }

    /// Apply a shallow patch to one node, keeping its id, siblings and
    /// children.
    pub fn update(&self, id: &NodeId, patch: NodePatch) -> Result<Page, TreeError> {
        self.ensure_editable()?;
        let path = self.locate(id).ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;

        let current = self
            .node_at(&path)
            .ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;
        let updated = apply_patch(current, patch)?;

        let mut page = self.clone();
        let siblings = page.children_mut(path.section, path.parent_indices())?;
        siblings[path.position()] = Arc::new(updated);
        Ok(page)
    }

    /// Detach a node and its whole subtree. Returns the new page and the
    /// removed subtree.
    pub fn remove(&self, id: &NodeId) -> Result<(Page, Arc<Node>), TreeError> {
        self.ensure_editable()?;
        let path = self.locate(id).ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;

        let mut page = self.clone();
        let siblings = page.children_mut(path.section, path.parent_indices())?;
        let removed = siblings.remove(path.position());
        Ok((page, removed))
    }

    /// Move child `from` of `parent` so that it ends up at position `to`.
    pub fn reorder(&self, parent: &ParentId, from: usize, to: usize) -> Result<Page, TreeError> {
        self.ensure_editable()?;
        let (section, indices) = self.locate_parent(parent)?;

        let mut page = self.clone();
        let children = page.children_mut(section, &indices)?;
        move_within(children, from, to)?;
        Ok(page)
    }

    /// Move a node (with its subtree) under another parent.
    ///
    /// `index` is interpreted after the node has been detached.
    pub fn move_node(
        &self,
        id: &NodeId,
        new_parent: &ParentId,
        index: usize,
    ) -> Result<Page, TreeError> {
        if let ParentId::Node(parent_id) = new_parent {
            let node = self.find(id).ok_or_else(|| TreeError::NodeNotFound(id.clone()))?;
            if node.contains(parent_id) {
                return Err(TreeError::MoveIntoSelf(id.clone()));
            }
        }

        let (detached, node) = self.remove(id)?;
        detached.insert(new_parent, index, Node::clone(&node))
    }

    /// Insert a section at `index`.
    pub fn insert_section(&self, index: usize, section: SectionV2) -> Result<Page, TreeError> {
        self.ensure_editable()?;
        let mut ids = vec![section.id.as_str()];
        for child in &section.children {
            validate_subtree(child)?;
            ids.extend(child.subtree_ids().into_iter().map(NodeId::as_str));
        }
        self.ensure_ids_free(ids.into_iter())?;

        if index > self.sections.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        let mut page = self.clone();
        page.sections.insert(index, Arc::new(section));
        Ok(page)
    }

    /// Remove a section with all of its nodes.
    pub fn remove_section(&self, id: &SectionId) -> Result<(Page, Arc<SectionV2>), TreeError> {
        self.ensure_editable()?;
        let index = self
            .sections
            .iter()
            .position(|section| section.id == *id)
            .ok_or_else(|| TreeError::SectionNotFound(id.clone()))?;

        let mut page = self.clone();
        let removed = page.sections.remove(index);
        Ok((page, removed))
    }

    /// Move section `from` to position `to`.
    pub fn reorder_sections(&self, from: usize, to: usize) -> Result<Page, TreeError> {
        self.ensure_editable()?;
        let mut page = self.clone();
        move_within(&mut page.sections, from, to)?;
        Ok(page)
    }

    /// Rebuild the page, replacing every node for which `f` returns a new
    /// value. Only the paths leading to replaced nodes are copied.
    ///
    /// `f` sees each node once, preorder; descendants of a replaced node
    /// are visited through the replacement.
    pub fn rewrite_nodes<F>(&self, mut f: F) -> Page
    where
        F: FnMut(&Node) -> Option<Node>,
    {
        let mut page = self.clone();
        for section in &mut page.sections {
            if let Some(children) = rewrite_children(&section.children, &mut f) {
                Arc::make_mut(section).children = children;
            }
        }
        page
    }

    fn ensure_editable(&self) -> Result<(), TreeError> {
        match self.version {
            PageVersion::V2 => Ok(()),
            PageVersion::Legacy => Err(TreeError::LegacyPage(self.slug.clone())),
        }
    }

    fn ensure_ids_free<'a>(&self, ids: impl Iterator<Item = &'a str>) -> Result<(), TreeError> {
        let mut taken: HashSet<&str> = self.sections.iter().map(|s| s.id.as_str()).collect();
        taken.extend(self.walk().map(|node| node.id.as_str()));
        for id in ids {
            if !taken.insert(id) {
                return Err(TreeError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    fn locate_parent(&self, parent: &ParentId) -> Result<(usize, Vec<usize>), TreeError> {
        match parent {
            ParentId::Section(id) => self
                .sections
                .iter()
                .position(|section| section.id == *id)
                .map(|index| (index, Vec::new()))
                .ok_or_else(|| TreeError::ParentNotFound(id.to_string())),
            ParentId::Node(id) => {
                let path = self
                    .locate(id)
                    .ok_or_else(|| TreeError::ParentNotFound(id.to_string()))?;
                let node = self
                    .node_at(&path)
                    .ok_or_else(|| TreeError::ParentNotFound(id.to_string()))?;
                if !node.is_container() {
                    return Err(TreeError::NotAContainer(id.clone()));
                }
                Ok((path.section, path.indices))
            }
        }
    }

    fn node_at(&self, path: &NodePath) -> Option<&Arc<Node>> {
        let mut children = &self.sections.get(path.section)?.children;
        let (last, spine) = path.indices.split_last()?;
        for &index in spine {
            children = &children.get(index)?.children;
        }
        children.get(*last)
    }

    /// Mutable access to a child list, copying the shared spine on the way.
    fn children_mut(
        &mut self,
        section: usize,
        indices: &[usize],
    ) -> Result<&mut Vec<Arc<Node>>, TreeError> {
        let stale = || TreeError::ParentNotFound(format!("section #{section} path {indices:?}"));
        let section = self.sections.get_mut(section).ok_or_else(stale)?;
        let mut children = &mut Arc::make_mut(section).children;
        for &index in indices {
            let node = children.get_mut(index).ok_or_else(stale)?;
            children = &mut Arc::make_mut(node).children;
        }
        Ok(children)
    }
}

/// Preorder iterator over the nodes of a page.
#[derive(Debug)]
pub struct NodeIter<'a> {
    stack: Vec<&'a Arc<Node>>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node.as_ref())
    }
}

fn validate_subtree(node: &Node) -> Result<(), TreeError> {
    node.validate()
        .map_err(|e| TreeError::InvalidProps(e.to_string()))?;
    node.children.iter().try_for_each(|child| validate_subtree(child))
}

fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), TreeError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

fn apply_patch(node: &Node, patch: NodePatch) -> Result<Node, TreeError> {
    let mut updated = node.clone();
    match patch {
        NodePatch::Base(changes) => {
            let mut props = node.content.to_props();
            for (key, value) in changes {
                if value.is_null() {
                    props.remove(&key);
                } else {
                    props.insert(key, value);
                }
            }
            updated.content = NodeContent::from_props(node.node_type(), props)
                .map_err(|e| TreeError::InvalidProps(e.to_string()))?;
        }
        NodePatch::Locale { locale, values } => {
            let node_type = node.node_type();
            for (key, value) in values {
                if !node_type.is_translatable(&key) {
                    return Err(TreeError::NotTranslatable {
                        node_type: node_type.to_string(),
                        key,
                    });
                }
                updated.i18n.set(&locale, &key, value);
            }
        }
    }
    updated
        .validate()
        .map_err(|e| TreeError::InvalidProps(e.to_string()))?;
    Ok(updated)
}

fn rewrite_children<F>(children: &[Arc<Node>], f: &mut F) -> Option<Vec<Arc<Node>>>
where
    F: FnMut(&Node) -> Option<Node>,
{
    let mut rewritten: Option<Vec<Arc<Node>>> = None;
    for (i, child) in children.iter().enumerate() {
        let mut replacement = f(child);
        let grandchildren = replacement
            .as_ref()
            .map_or(&child.children, |node| &node.children);
        if let Some(new_children) = rewrite_children(grandchildren, f) {
            replacement.get_or_insert_with(|| Node::clone(child)).children = new_children;
        }
        if let Some(node) = replacement {
            rewritten.get_or_insert_with(|| children.to_vec())[i] = Arc::new(node);
        }
    }
    rewritten
}
