//! The Filter Engine.
//!
//! A [`FilterEngine`] owns a [`FilterTree`] built from the `FilterProperty`
//! section of a view configuration and decides which records pass the
//! current selection.
//!
//! # Evaluation
//!
//! Selected nodes are grouped by parent. With nothing selected every record
//! passes. Otherwise a record must satisfy at least one selected node in each
//! group (OR within a group, AND across groups). A node without a rule always
//! satisfies its group.
//!
//! ```
//! use loadout::{FilterEngine, LoadPolicy, ViewConfig};
//! use loadout_seeker::{PropertyBag, PropertyId};
//!
//! let config = ViewConfig::from_json(r#"{ "FilterProperty": [
//!     { "id": "weapons", "displayName": "Weapons",
//!       "rule": { "property": "category", "operator": "Equals", "value": "weapon" } }
//! ] }"#, LoadPolicy::Required).unwrap();
//!
//! let mut filter = FilterEngine::load(&config, LoadPolicy::Required).unwrap();
//! let sword = PropertyBag::new("1").with(PropertyId::Category, "Weapon");
//! let apple = PropertyBag::new("2").with(PropertyId::Category, "Food");
//!
//! filter.activate_node("weapons", true).unwrap();
//! assert!(filter.should_show_item(&sword));
//! assert!(!filter.should_show_item(&apple));
//! ```

mod node;
mod tree;

use std::collections::HashSet;

use loadout_seeker::{Record, RecordKey};

use crate::config::{FilterNodeConfig, LoadPolicy, ViewConfig};
use crate::context::ViewContext;
use crate::error::{LoadoutError, Result};

pub use node::{Behavior, FilterNode, NodeId, NodeKind, ViewMode};
pub use tree::FilterTree;

/// Membership test over a configured filter tree.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    tree: FilterTree,
    recent: HashSet<RecordKey>,
    groups: Vec<Vec<NodeId>>,
}

impl FilterEngine {
    /// An engine with no nodes. Every record passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the engine from the `FilterProperty` section.
    ///
    /// A missing section or an invalid node is a configuration error under
    /// [`LoadPolicy::Required`] and an inert engine under
    /// [`LoadPolicy::AllowEmpty`].
    pub fn load(config: &ViewConfig, policy: LoadPolicy) -> Result<Self> {
        let nodes = config
            .filter
            .as_deref()
            .ok_or_else(|| LoadoutError::configuration("missing 'FilterProperty' array"));
        let tree = policy.degrade(
            "FilterProperty",
            nodes.and_then(FilterTree::from_config),
        )?;
        tracing::debug!(nodes = tree.len(), "filter tree loaded");
        Ok(FilterEngine::with_tree(tree))
    }

    /// Builds the engine directly from node configurations.
    pub fn from_nodes(nodes: &[FilterNodeConfig]) -> Result<Self> {
        Ok(FilterEngine::with_tree(FilterTree::from_config(nodes)?))
    }

    fn with_tree(tree: FilterTree) -> Self {
        FilterEngine {
            tree,
            recent: HashSet::new(),
            groups: Vec::new(),
        }
    }

    pub fn tree(&self) -> &FilterTree {
        &self.tree
    }

    /// Decides whether a record passes the current selection.
    pub fn should_show_item<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.groups.iter().all(|group| {
            group
                .iter()
                .filter_map(|id| self.tree.get(*id))
                .any(|node| self.node_passes(node, record))
        })
    }

    fn node_passes<R: Record + ?Sized>(&self, node: &FilterNode, record: &R) -> bool {
        match node.kind() {
            NodeKind::ViewToggle(ViewMode::All) => true,
            NodeKind::ViewToggle(ViewMode::Recent) => self.recent.contains(&record.key()),
            NodeKind::Rule => node.rule().map_or(true, |rule| rule.matches(record)),
        }
    }

    /// Selects or deselects a node by id.
    ///
    /// Activating the view toggle while it is already selected flips the
    /// view mode instead.
    pub fn activate_node(&mut self, id: &str, select: bool) -> Result<()> {
        let Some(node_id) = self.tree.find(id) else {
            tracing::debug!(node = id, "activation of unknown filter node");
            return Err(LoadoutError::UnknownNode(id.to_string()));
        };

        let already_selected = self.tree.get(node_id).is_some_and(FilterNode::is_selected);
        if select && already_selected && self.tree.toggle() == Some(node_id) {
            if let Some(mode) = self.tree.flip_view_mode() {
                tracing::debug!(mode = mode.node_id(), "view mode flipped");
            }
        } else if select {
            if !self.tree.select(node_id) {
                tracing::debug!(node = id, "node cannot be selected");
            }
        } else {
            self.tree.deselect(node_id);
        }
        self.regroup();
        Ok(())
    }

    /// Deselects every node. Every record passes afterwards.
    pub fn clear_all(&mut self) {
        self.tree.clear();
        self.regroup();
    }

    fn regroup(&mut self) {
        self.groups = self.tree.selected_groups();
    }

    /// Returns `true` if nothing is selected.
    pub fn is_pass_through(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every configured node, in configuration order.
    pub fn all_nodes(&self) -> Vec<&FilterNode> {
        self.tree.iter().collect()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&FilterNode> {
        self.tree.find(id).and_then(|node_id| self.tree.get(node_id))
    }

    /// Current view mode. `All` when no toggle node is configured.
    pub fn view_mode(&self) -> ViewMode {
        self.tree
            .toggle()
            .and_then(|id| self.tree.get(id))
            .and_then(FilterNode::view_mode)
            .unwrap_or(ViewMode::All)
    }

    /// Replaces the recently-used set consulted in `Recent` mode.
    pub fn set_recent<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = RecordKey>,
    {
        self.recent = keys.into_iter().collect();
    }

    pub fn recent(&self) -> &HashSet<RecordKey> {
        &self.recent
    }

    /// Display text for a node, resolved through the context's translator.
    pub fn display_name(&self, node: &FilterNode, ctx: &ViewContext) -> String {
        ctx.translate(node.display_name())
    }

    /// Serializes the tree back to configuration.
    pub fn to_config(&self) -> Vec<FilterNodeConfig> {
        self.tree.to_config()
    }
}
