//! Rendering logic for the vocabulary TUI application.
//!
//! These are pure query methods that read state without modification.

use super::{Overlay, VocabularyApp};
use crate::table::{ColumnFinder, ColumnPredicate, NodeStatus};
use crate::tui::components::{
    FlashcardComponent, FlashcardViewContext, VocabTableComponent, VocabTableViewContext,
};
use crate::tui::state::{FinderNav, MembershipPicker};

impl VocabularyApp {
    /// Renders the table view with its header, filter bar, and status bar.
    pub(super) fn render_table_view(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push_str(&self.render_filter_bar());

        let body = match &self.overlay {
            Overlay::Membership(picker) => self.render_membership_picker(picker),
            Overlay::ColumnFinder(nav) => self.render_column_finder(*nav),
            Overlay::None | Overlay::FilterInput(_) => {
                VocabTableComponent::view(&VocabTableViewContext {
                    view: &self.table,
                    selection: &self.selection,
                    focused_column: self.focused_column,
                    visible_height: self.table_height(),
                })
            }
        };
        output.push_str(&body);
        output.push_str(&self.render_status_bar());
        output
    }

    /// Renders the flashcard session.
    pub(super) fn render_study_view(&self) -> String {
        let Some(session) = &self.session else {
            return String::new();
        };
        let mut output = FlashcardComponent::view(&FlashcardViewContext {
            session,
            max_width: usize::from(self.width),
        });
        output.push('\n');
        if let Some(status) = &self.status {
            output.push_str(status);
            output.push('\n');
        }
        output.push_str("h/l:prev/next  space:flip  ,:remove  /:flag  Esc:back  q:quit\n");
        output
    }

    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let title = "Tangocho - Vocabulary";
        let loading_indicator = if self.loading { " [Loading...]" } else { "" };
        format!("{title}{loading_indicator}\n")
    }

    /// Renders the filter bar: active filters, selection size, row counts.
    pub(super) fn render_filter_bar(&self) -> String {
        let filters = self.table.filters();
        let mut parts = Vec::new();
        let columns = filters.active_column_count();
        if columns > 0 {
            parts.push(format!("{columns} column filter(s)"));
        }
        if let Some(query) = filters.global() {
            parts.push(format!("search \"{query}\""));
        }
        let label = if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        };
        format!(
            "Filters: {label}  Selected: {}  Rows: {}/{}\n",
            self.selection.len(),
            self.table.visible_len(),
            self.table.entries().len()
        )
    }

    fn render_membership_picker(&self, picker: &MembershipPicker) -> String {
        let column = picker.column();
        let accepted = match self.table.filters().predicate(column) {
            Some(ColumnPredicate::Membership(values)) => Some(values),
            _ => None,
        };
        let mut lines = vec![format!(
            "Filter {} (space:toggle  Esc:close)",
            column.header()
        )];
        if picker.options().is_empty() {
            lines.push("  No values available.".to_owned());
        }
        for (index, option) in picker.options().iter().enumerate() {
            let marker = if index == picker.cursor() { ">" } else { " " };
            let checkbox = if accepted.is_some_and(|values| values.contains(option)) {
                "[x]"
            } else {
                "[ ]"
            };
            lines.push(format!("{marker} {checkbox} {option}"));
        }
        join_lines(&lines)
    }

    /// Renders each displayed finder level as an indented list.
    fn render_column_finder(&self, nav: FinderNav) -> String {
        let finder = self.table.finder();
        let layout = self.table.layout();
        let path = finder.selected_path();
        let mut lines =
            vec!["Columns (space:show/hide  Enter:open  h:back  Esc:close)".to_owned()];
        for (level, nodes) in finder.levels().into_iter().enumerate() {
            let indent = "  ".repeat(level);
            let open = path.get(level);
            for (row, node) in nodes.iter().enumerate() {
                let highlighted = level == nav.level() && row == nav.row();
                let marker = if highlighted { ">" } else { " " };
                let toggle = match ColumnFinder::status(node, layout) {
                    NodeStatus::Available { visible: true, .. } => "[x]",
                    NodeStatus::Available { visible: false, .. } => "[ ]",
                    NodeStatus::Unavailable => "   ",
                };
                let suffix = match (node.is_group(), open) {
                    (true, Some(id)) if id == node.id() => " v",
                    (true, _) => " >",
                    (false, _) => "",
                };
                lines.push(format!("{marker}{indent} {toggle} {}{suffix}", node.label()));
            }
        }
        join_lines(&lines)
    }

    /// Renders the status bar: input prompt, status message, or hints.
    pub(super) fn render_status_bar(&self) -> String {
        if let Overlay::FilterInput(editor) = &self.overlay {
            return format!(
                "{}: {}_  (Enter:apply  Esc:close)\n",
                editor.target().prompt(),
                editor.text()
            );
        }
        if let Some(status) = &self.status {
            return format!("{status}\n");
        }
        format!("{}\n", self.table_status_hints())
    }

    const fn table_status_hints(&self) -> &'static str {
        if self.width <= 80 {
            "q:quit  ?:help  space:select  s:sort  f:filter  Enter:study"
        } else {
            "j/k:move  h/l:column  space:select  a:all  s/S:sort  f:filter  /:search  c:columns  Enter:study  ?:help  q:quit"
        }
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Table:
  j, Down    Move cursor down
  k, Up      Move cursor up
  PgDn       Page down
  PgUp       Page up
  Home, g    Go to first row
  End, G     Go to last row
  h, l       Focus previous/next column
  Space      Select or deselect row
  a          Select or deselect all visible rows
  s          Sort by focused column
  S          Add focused column to the sort
  z          Clear sort
  >, <       Widen or narrow focused column
  f          Filter focused column
  /          Search every field
  x          Clear all filters
  c          Show or hide columns
  r          Reload vocabulary
  Enter      Study selected entries

Flashcards:
  h, l       Previous or next card
  Space      Flip card
  ,          Remove card from session and selection
  /          Flag or unflag card
  Esc        Back to vocabulary list

Other:
  ?          Toggle this help
  q          Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut output = lines.join("\n");
    output.push('\n');
    output
}
