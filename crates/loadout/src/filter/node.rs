//! Filter tree nodes.

use loadout_seeker::Rule;
use serde::{Deserialize, Serialize};

/// How the children of a node may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Behavior {
    /// At most one child selected; selecting one clears its siblings.
    SingleSelect,
    /// Children are selected independently.
    #[default]
    MultiSelect,
    /// Children carry no selection state of their own.
    Automatic,
}

/// Index of a node in its [`FilterTree`](super::FilterTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The two states of the view toggle node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Show every record.
    All,
    /// Show only recently used records.
    Recent,
}

impl ViewMode {
    pub const ALL_ID: &'static str = "all";
    pub const RECENT_ID: &'static str = "recent";

    /// The node id used for this mode.
    pub fn node_id(self) -> &'static str {
        match self {
            ViewMode::All => Self::ALL_ID,
            ViewMode::Recent => Self::RECENT_ID,
        }
    }

    /// Recognizes the reserved top-level ids.
    pub fn from_node_id(id: &str) -> Option<ViewMode> {
        if id.eq_ignore_ascii_case(Self::ALL_ID) {
            Some(ViewMode::All)
        } else if id.eq_ignore_ascii_case(Self::RECENT_ID) {
            Some(ViewMode::Recent)
        } else {
            None
        }
    }

    pub fn flipped(self) -> ViewMode {
        match self {
            ViewMode::All => ViewMode::Recent,
            ViewMode::Recent => ViewMode::All,
        }
    }

    /// Translation key used when no display name is configured.
    pub fn label_key(self) -> &'static str {
        match self {
            ViewMode::All => "filter.all",
            ViewMode::Recent => "filter.recent",
        }
    }
}

/// What a node tests when it is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The node's rule (or the identity rule if it has none).
    Rule,
    /// The top-level view toggle.
    ViewToggle(ViewMode),
}

/// One node of the filter rule tree.
///
/// Nodes live in an arena; parent and children are arena indices.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterNode {
    pub(crate) id: String,
    pub(crate) display_name: String,
    pub(crate) alternate_display_name: Option<String>,
    pub(crate) behavior: Behavior,
    pub(crate) rule: Option<Rule>,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) selected: bool,
    pub(crate) expanded: bool,
    pub(crate) color_tag: Option<i64>,
}

impl FilterNode {
    pub(crate) fn root() -> Self {
        FilterNode {
            id: String::new(),
            display_name: String::new(),
            alternate_display_name: None,
            behavior: Behavior::SingleSelect,
            rule: None,
            kind: NodeKind::Rule,
            parent: None,
            children: Vec::new(),
            selected: false,
            expanded: true,
            color_tag: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn alternate_display_name(&self) -> Option<&str> {
        self.alternate_display_name.as_deref()
    }

    /// Selection behavior of this node's children.
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The view mode, if this is the view toggle node.
    pub fn view_mode(&self) -> Option<ViewMode> {
        match self.kind {
            NodeKind::ViewToggle(mode) => Some(mode),
            NodeKind::Rule => None,
        }
    }

    /// The parent node. `None` only for the synthetic root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn color_tag(&self) -> Option<i64> {
        self.color_tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_ids() {
        assert_eq!(ViewMode::from_node_id("ALL"), Some(ViewMode::All));
        assert_eq!(ViewMode::from_node_id("recent"), Some(ViewMode::Recent));
        assert_eq!(ViewMode::from_node_id("weapons"), None);
        assert_eq!(ViewMode::All.flipped().node_id(), "recent");
    }

    #[test]
    fn behavior_serde_names() {
        let parsed: Behavior = serde_json::from_str("\"SingleSelect\"").unwrap();
        assert_eq!(parsed, Behavior::SingleSelect);
        assert_eq!(
            serde_json::to_string(&Behavior::Automatic).unwrap(),
            "\"Automatic\""
        );
        assert_eq!(Behavior::default(), Behavior::MultiSelect);
    }
}
