//! Arena-backed filter tree and its selection rules.

use std::collections::HashMap;

use crate::config::{FilterNodeConfig, RuleConfig};
use crate::error::{LoadoutError, Result};

use super::node::{Behavior, FilterNode, NodeId, NodeKind, ViewMode};

/// The filter rule tree.
///
/// Nodes are stored in a flat arena. Index 0 is a synthetic root whose
/// children are the configured top-level nodes. The root's children are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTree {
    nodes: Vec<FilterNode>,
    by_id: HashMap<String, NodeId>,
    toggle: Option<NodeId>,
}

impl Default for FilterTree {
    fn default() -> Self {
        FilterTree::new()
    }
}

impl FilterTree {
    /// The synthetic root.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates a tree holding only the root.
    pub fn new() -> Self {
        FilterTree {
            nodes: vec![FilterNode::root()],
            by_id: HashMap::new(),
            toggle: None,
        }
    }

    /// Builds a tree from configured top-level nodes.
    ///
    /// A top-level node with id `all` or `recent` becomes the view toggle. If
    /// both are configured, the second supplies the toggle's alternate name
    /// and nothing else. Both ids are reserved for the toggle: nested nodes
    /// may not use them.
    pub fn from_config(nodes: &[FilterNodeConfig]) -> Result<Self> {
        let mut tree = FilterTree::new();
        for config in nodes {
            if let Some(mode) = ViewMode::from_node_id(&config.id) {
                if let Some(toggle) = tree.toggle {
                    let existing = &mut tree.nodes[toggle.0];
                    if existing.view_mode() == Some(mode) {
                        return Err(duplicate(&config.id));
                    }
                    existing.alternate_display_name = Some(config.display_name.clone());
                    if !config.children.is_empty()
                        || config.rule.is_some()
                        || config.color_tag.is_some()
                        || config.behavior.is_some()
                    {
                        tracing::warn!(
                            id = %config.id,
                            children = config.children.len(),
                            "second view toggle only supplies a display name; \
                             its other settings are ignored"
                        );
                    }
                    continue;
                }
            }
            tree.insert(FilterTree::ROOT, config)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, parent: NodeId, config: &FilterNodeConfig) -> Result<NodeId> {
        let id = config.id.trim();
        if id.is_empty() {
            return Err(LoadoutError::configuration("filter node without an id"));
        }
        if self.by_id.contains_key(id) {
            return Err(duplicate(id));
        }

        let kind = match ViewMode::from_node_id(id) {
            Some(mode) if parent == FilterTree::ROOT => NodeKind::ViewToggle(mode),
            Some(_) => {
                return Err(LoadoutError::configuration(format!(
                    "filter node id '{id}' is reserved for the top-level view toggle"
                )))
            }
            None => NodeKind::Rule,
        };
        let rule = config.rule.as_ref().map(RuleConfig::to_rule).transpose()?;

        let node_id = NodeId(self.nodes.len());
        self.nodes.push(FilterNode {
            id: id.to_string(),
            display_name: config.display_name.clone(),
            alternate_display_name: config.alternate_display_name.clone(),
            behavior: config.behavior.unwrap_or_default(),
            rule,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            selected: false,
            expanded: false,
            color_tag: config.color_tag,
        });
        self.by_id.insert(id.to_string(), node_id);
        self.nodes[parent.0].children.push(node_id);
        if matches!(kind, NodeKind::ViewToggle(_)) {
            self.toggle = Some(node_id);
        }

        for child in &config.children {
            self.insert(node_id, child)?;
        }
        Ok(node_id)
    }

    /// Serializes the tree back to configuration, in tree order.
    pub fn to_config(&self) -> Vec<FilterNodeConfig> {
        self.nodes[FilterTree::ROOT.0]
            .children
            .iter()
            .map(|id| self.node_config(*id))
            .collect()
    }

    fn node_config(&self, id: NodeId) -> FilterNodeConfig {
        let node = &self.nodes[id.0];
        FilterNodeConfig {
            id: node.id.clone(),
            display_name: node.display_name.clone(),
            behavior: Some(node.behavior),
            rule: node.rule.as_ref().map(RuleConfig::from),
            children: node.children.iter().map(|c| self.node_config(*c)).collect(),
            color_tag: node.color_tag,
            alternate_display_name: node.alternate_display_name.clone(),
        }
    }

    /// Returns `true` if no nodes are configured.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of configured nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn root(&self) -> &FilterNode {
        &self.nodes[FilterTree::ROOT.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&FilterNode> {
        self.nodes.get(id.0)
    }

    /// Looks up a node by its configured id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// The view toggle node, if configured.
    pub fn toggle(&self) -> Option<NodeId> {
        self.toggle
    }

    /// All configured nodes in configuration (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterNode> + '_ {
        self.preorder().into_iter().map(move |id| &self.nodes[id.0])
    }

    fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Ancestors of `id`, nearest first, excluding the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            if parent == FilterTree::ROOT {
                break;
            }
            chain.push(parent);
            current = self.nodes[parent.0].parent;
        }
        chain
    }

    /// Returns `true` if any node is selected.
    pub fn any_selected(&self) -> bool {
        self.nodes.iter().any(|n| n.selected)
    }

    /// Selects a node together with its ancestor chain.
    ///
    /// Along the chain, every node whose parent is `SingleSelect` clears and
    /// collapses its siblings' subtrees. Returns `false` for the root and for
    /// children of an `Automatic` node, which cannot be selected.
    pub fn select(&mut self, id: NodeId) -> bool {
        if id == FilterTree::ROOT || id.0 >= self.nodes.len() {
            return false;
        }
        if self.parent_behavior(id) == Behavior::Automatic {
            return false;
        }

        let mut chain = self.ancestors(id);
        chain.reverse();
        chain.push(id);
        for node in chain {
            if self.parent_behavior(node) == Behavior::SingleSelect {
                self.clear_siblings(node);
            }
            let entry = &mut self.nodes[node.0];
            entry.selected = true;
            entry.expanded = true;
        }
        true
    }

    /// Deselects a node and its entire subtree.
    pub fn deselect(&mut self, id: NodeId) {
        if id == FilterTree::ROOT || id.0 >= self.nodes.len() {
            return;
        }
        self.clear_subtree(id);
    }

    /// Deselects and collapses every node.
    pub fn clear(&mut self) {
        for node in self.nodes.iter_mut().skip(1) {
            node.selected = false;
            node.expanded = false;
        }
    }

    /// Flips the view toggle node between its two modes, rewriting its id
    /// and display name in place. Returns the new mode.
    pub fn flip_view_mode(&mut self) -> Option<ViewMode> {
        let toggle = self.toggle?;
        let node = &mut self.nodes[toggle.0];
        let mode = node.view_mode()?.flipped();

        let old_id = std::mem::replace(&mut node.id, mode.node_id().to_string());
        let next_name = node
            .alternate_display_name
            .take()
            .unwrap_or_else(|| mode.label_key().to_string());
        let previous_name = std::mem::replace(&mut node.display_name, next_name);
        node.alternate_display_name = Some(previous_name);
        node.kind = NodeKind::ViewToggle(mode);

        self.by_id.remove(&old_id);
        self.by_id.insert(mode.node_id().to_string(), toggle);
        Some(mode)
    }

    /// Selected nodes grouped by parent, in tree order.
    pub fn selected_groups(&self) -> Vec<Vec<NodeId>> {
        let mut groups: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
        for id in self.preorder() {
            let node = &self.nodes[id.0];
            if !node.selected {
                continue;
            }
            let Some(parent) = node.parent else { continue };
            match groups.iter_mut().find(|(p, _)| *p == parent) {
                Some((_, members)) => members.push(id),
                None => groups.push((parent, vec![id])),
            }
        }
        groups.into_iter().map(|(_, members)| members).collect()
    }

    fn parent_behavior(&self, id: NodeId) -> Behavior {
        match self.nodes[id.0].parent {
            Some(parent) => self.nodes[parent.0].behavior,
            None => Behavior::MultiSelect,
        }
    }

    fn clear_siblings(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        let siblings: Vec<NodeId> = self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .filter(|sibling| *sibling != id)
            .collect();
        for sibling in siblings {
            self.clear_subtree(sibling);
        }
    }

    fn clear_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            node.selected = false;
            node.expanded = false;
            stack.extend(node.children.iter().copied());
        }
    }
}

fn duplicate(id: &str) -> LoadoutError {
    LoadoutError::configuration(format!("duplicate filter node id '{id}'"))
}
