//! Hierarchical column finder.
//!
//! The finder shows the column hierarchy as side-by-side levels: level 0
//! lists the root nodes, and each further level lists the children of the
//! group selected on the level before it. Every node bound to a live column
//! carries a visibility toggle; nodes whose column key cannot be resolved
//! are reported as unavailable.

use super::columns::ColumnId;
use super::layout::TableLayout;

/// Node of the column hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnNode {
    /// Expandable node with children.
    Group {
        /// Identifier, unique among its siblings.
        id: String,
        /// Display label.
        label: String,
        /// Column key the group's own toggle is bound to.
        column: Option<String>,
        /// Child nodes shown on the next level.
        children: Vec<ColumnNode>,
    },
    /// Terminal node.
    Leaf {
        /// Identifier, unique among its siblings.
        id: String,
        /// Display label.
        label: String,
        /// Column key the toggle is bound to.
        column: Option<String>,
        /// Whether the leaf offers a multi-select filter on its column.
        membership_filter: bool,
    },
}

impl ColumnNode {
    /// Builds a leaf bound to `column`.
    #[must_use]
    pub fn leaf(id: &str, label: &str, column: &str) -> Self {
        Self::Leaf {
            id: id.to_owned(),
            label: label.to_owned(),
            column: Some(column.to_owned()),
            membership_filter: false,
        }
    }

    /// Builds a group bound to `column`.
    #[must_use]
    pub fn group(id: &str, label: &str, column: &str, children: Vec<Self>) -> Self {
        Self::Group {
            id: id.to_owned(),
            label: label.to_owned(),
            column: Some(column.to_owned()),
            children,
        }
    }

    /// Marks a leaf as offering a multi-select filter.
    #[must_use]
    pub fn with_membership_filter(self) -> Self {
        match self {
            Self::Leaf {
                id, label, column, ..
            } => Self::Leaf {
                id,
                label,
                column,
                membership_filter: true,
            },
            group @ Self::Group { .. } => group,
        }
    }

    /// Node identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Group { id, .. } | Self::Leaf { id, .. } => id,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Group { label, .. } | Self::Leaf { label, .. } => label,
        }
    }

    /// Bound column key, if any.
    #[must_use]
    pub fn column_key(&self) -> Option<&str> {
        match self {
            Self::Group { column, .. } | Self::Leaf { column, .. } => column.as_deref(),
        }
    }

    /// Live column the node is bound to.
    #[must_use]
    pub fn column(&self) -> Option<ColumnId> {
        self.column_key().and_then(ColumnId::from_key)
    }

    /// Returns true for groups.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    /// Returns true for leaves offering a multi-select filter.
    #[must_use]
    pub const fn has_membership_filter(&self) -> bool {
        matches!(
            self,
            Self::Leaf {
                membership_filter: true,
                ..
            }
        )
    }

    fn children(&self) -> Option<&[Self]> {
        match self {
            Self::Group { children, .. } => Some(children),
            Self::Leaf { .. } => None,
        }
    }
}

/// How a node is presented against the live column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Bound to a live column; the toggle reflects its visibility.
    Available {
        /// Resolved column.
        column: ColumnId,
        /// Whether the column is currently drawn.
        visible: bool,
    },
    /// Unbound or bound to an unknown column; no toggle is offered.
    Unavailable,
}

/// Hierarchy used by the vocabulary table.
#[must_use]
pub fn default_hierarchy() -> Vec<ColumnNode> {
    vec![
        ColumnNode::leaf("col-english", "English", "english"),
        ColumnNode::leaf("col-furigana", "Furigana", "furigana"),
        ColumnNode::leaf("col-japanese", "Japanese", "japanese"),
        ColumnNode::leaf("col-word_category", "Category", "word_category"),
        ColumnNode::group(
            "col-book",
            "Book",
            "book",
            vec![ColumnNode::leaf("col-chapter", "Chapter", "chapter").with_membership_filter()],
        ),
        ColumnNode::leaf("col-chapter", "Chapter", "chapter"),
        ColumnNode::leaf("col-section", "Section", "section"),
        ColumnNode::leaf("col-times_seen", "Times Seen", "times_seen"),
        ColumnNode::leaf(
            "col-recently_missed_percent",
            "Missed %",
            "recently_missed_percent",
        ),
        ColumnNode::leaf("col-flag", "Flag", "flag"),
        ColumnNode::leaf("col-public_notes", "Public Notes", "public_notes"),
        ColumnNode::leaf("col-personal_notes", "Personal Notes", "personal_notes"),
    ]
}

/// Drill-down state over a column hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFinder {
    roots: Vec<ColumnNode>,
    path: Vec<String>,
}

impl Default for ColumnFinder {
    fn default() -> Self {
        Self::new(default_hierarchy())
    }
}

impl ColumnFinder {
    /// Creates a finder over `roots` with nothing selected.
    #[must_use]
    pub const fn new(roots: Vec<ColumnNode>) -> Self {
        Self {
            roots,
            path: Vec::new(),
        }
    }

    /// Selected node ids, one per level.
    #[must_use]
    pub fn selected_path(&self) -> &[String] {
        &self.path
    }

    /// Nodes shown on `level`, or `None` when that level is not displayed.
    #[must_use]
    pub fn nodes_at(&self, level: usize) -> Option<&[ColumnNode]> {
        let mut nodes: &[ColumnNode] = &self.roots;
        for selected in self.path.iter().take(level) {
            let parent = nodes.iter().find(|node| node.id() == selected)?;
            nodes = parent.children()?;
        }
        (level <= self.path.len()).then_some(nodes)
    }

    /// Every displayed level, starting with the roots.
    #[must_use]
    pub fn levels(&self) -> Vec<&[ColumnNode]> {
        (0..=self.path.len())
            .map_while(|level| self.nodes_at(level))
            .collect()
    }

    /// Selects `node_id` on `level`, discarding deeper selections.
    ///
    /// Returns false, leaving the path unchanged, when the level is not
    /// displayed or has no such node.
    pub fn select(&mut self, level: usize, node_id: &str) -> bool {
        let found = self
            .nodes_at(level)
            .is_some_and(|nodes| nodes.iter().any(|node| node.id() == node_id));
        if !found {
            return false;
        }
        self.path.truncate(level);
        self.path.push(node_id.to_owned());
        true
    }

    /// Replaces the path by selecting each id in turn.
    ///
    /// Stops at the first id that cannot be selected.
    pub fn select_path<S: AsRef<str>>(&mut self, path: &[S]) {
        self.path.clear();
        for (level, node_id) in path.iter().enumerate() {
            if !self.select(level, node_id.as_ref()) {
                break;
            }
        }
    }

    /// Clears every selection, leaving only the root level.
    pub fn reset(&mut self) {
        self.path.clear();
    }

    /// Presentation status of `node` against `layout`.
    #[must_use]
    pub fn status(node: &ColumnNode, layout: &TableLayout) -> NodeStatus {
        node.column().map_or(NodeStatus::Unavailable, |column| {
            NodeStatus::Available {
                column,
                visible: layout.is_visible(column),
            }
        })
    }

    /// Shows or hides the column bound to `node_id` on `level`.
    ///
    /// Returns false when the node does not exist or is unavailable.
    pub fn toggle_visibility(
        &self,
        layout: &mut TableLayout,
        level: usize,
        node_id: &str,
        visible: bool,
    ) -> bool {
        let Some(column) = self
            .nodes_at(level)
            .and_then(|nodes| nodes.iter().find(|node| node.id() == node_id))
            .and_then(ColumnNode::column)
        else {
            return false;
        };
        layout.set_visible(column, visible);
        true
    }
}
