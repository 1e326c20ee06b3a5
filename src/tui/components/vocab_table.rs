//! Vocabulary table component.
//!
//! Renders the header row (select-all box, column titles, sort and filter
//! markers) followed by the window of visible rows around the cursor.

use crate::selection::SelectionStore;
use crate::table::{ColumnId, SELECT_COLUMN_WIDTH, SelectAllState, SortSpec, TableView};
use crate::vocabulary::Entry;

use super::text_fit::fit_cell;

/// Everything needed to draw one frame of the table.
#[derive(Debug, Clone, Copy)]
pub struct VocabTableViewContext<'a> {
    /// Table state to draw.
    pub view: &'a TableView,
    /// Row selection.
    pub selection: &'a SelectionStore,
    /// Column receiving sort, filter, and resize keys.
    pub focused_column: ColumnId,
    /// Rows available for table rows (excluding the header).
    pub visible_height: usize,
}

/// Stateless renderer for the vocabulary table.
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabTableComponent;

impl VocabTableComponent {
    /// Renders the header and the visible window of rows.
    #[must_use]
    pub fn view(ctx: &VocabTableViewContext<'_>) -> String {
        let mut output = Self::render_header(ctx);

        if ctx.view.entries().is_empty() {
            output.push_str("  No vocabulary entries loaded.\n");
            return output;
        }
        if ctx.view.visible_len() == 0 {
            output.push_str("  No vocabulary entries match the current filters.\n");
            return output;
        }

        let cursor = ctx.view.cursor();
        for (index, entry) in ctx
            .view
            .visible_rows()
            .into_iter()
            .enumerate()
            .skip(cursor.scroll_offset)
            .take(ctx.visible_height.max(1))
        {
            output.push_str(&Self::render_row(ctx, entry, index == cursor.position));
            output.push('\n');
        }
        output
    }

    fn render_header(ctx: &VocabTableViewContext<'_>) -> String {
        let select_all = match ctx.view.select_all_state(ctx.selection) {
            SelectAllState::Checked => "[x]",
            SelectAllState::Indeterminate => "[-]",
            SelectAllState::Unchecked => "[ ]",
        };
        let mut header = fit_cell(select_all, usize::from(SELECT_COLUMN_WIDTH));
        for layout in ctx.view.layout().visible_columns() {
            let title = header_title(ctx, layout.column);
            header.push_str(&fit_cell(&title, usize::from(layout.size)));
            header.push(' ');
        }
        header.push('\n');
        header
    }

    fn render_row(ctx: &VocabTableViewContext<'_>, entry: &Entry, under_cursor: bool) -> String {
        let marker = if under_cursor { ">" } else { " " };
        let checkbox = if ctx.selection.is_selected(entry.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let mut line = fit_cell(
            &format!("{marker}{checkbox}"),
            usize::from(SELECT_COLUMN_WIDTH),
        );
        for layout in ctx.view.layout().visible_columns() {
            line.push_str(&fit_cell(
                &layout.column.display_text(entry),
                usize::from(layout.size),
            ));
            line.push(' ');
        }
        line
    }
}

fn header_title(ctx: &VocabTableViewContext<'_>, column: ColumnId) -> String {
    let mut title = column.header().to_owned();
    title.push_str(&sort_marker(ctx.view.sort_spec(), column));
    if ctx.view.filters().predicate(column).is_some() {
        title.push('*');
    }
    if column == ctx.focused_column {
        format!("<{title}>")
    } else {
        title
    }
}

fn sort_marker(sort: &SortSpec, column: ColumnId) -> String {
    let keys = sort.keys();
    keys.iter()
        .enumerate()
        .find(|(_, key)| key.column == column)
        .map_or_else(String::new, |(position, key)| {
            if keys.len() > 1 {
                format!("{}{}", key.direction.indicator(), position.saturating_add(1))
            } else {
                key.direction.indicator().to_owned()
            }
        })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{VocabTableComponent, VocabTableViewContext};
    use crate::selection::{InMemorySelection, SelectionStore};
    use crate::table::{ColumnId, TableView};
    use crate::telemetry::NoopTelemetrySink;
    use crate::vocabulary::test_support::entry_with_id;

    #[fixture]
    fn selection() -> SelectionStore {
        SelectionStore::load(Box::new(InMemorySelection::default()), &NoopTelemetrySink)
    }

    fn render(view: &TableView, selection: &SelectionStore) -> String {
        VocabTableComponent::view(&VocabTableViewContext {
            view,
            selection,
            focused_column: ColumnId::English,
            visible_height: 10,
        })
    }

    #[rstest]
    fn marks_cursor_and_selected_rows(mut selection: SelectionStore) {
        let view = TableView::new(vec![entry_with_id(1, "cat"), entry_with_id(2, "dog")]);
        selection.set_selected(2, true).expect("selection should persist");

        let output = render(&view, &selection);
        let lines: Vec<&str> = output.lines().collect();

        let [header, first, second] = lines.as_slice() else {
            panic!("expected header and two rows, got {lines:?}");
        };
        assert!(header.starts_with("[-]"));
        assert!(header.contains("<English>"));
        assert!(first.starts_with(">[ ]"));
        assert!(second.starts_with(" [x]"));
        assert!(second.contains("dog"));
    }

    #[rstest]
    fn header_shows_sort_and_filter_markers(selection: SelectionStore) {
        let mut view = TableView::new(vec![entry_with_id(1, "cat")]);
        view.toggle_sort(ColumnId::Chapter, false);
        view.toggle_sort(ColumnId::English, true);
        view.edit_filters(|filters| filters.set_substring(ColumnId::Japanese, "c"));

        let output = render(&view, &selection);

        assert!(output.contains("Chapter▲1"));
        assert!(output.contains("<English▲2>"));
        assert!(output.contains("Japanese*"));
    }

    #[rstest]
    fn explains_empty_results(selection: SelectionStore) {
        let mut view = TableView::new(vec![entry_with_id(1, "cat")]);
        view.edit_filters(|filters| filters.set_global("zebra"));

        assert!(render(&view, &selection).contains("match the current filters"));
        assert!(render(&TableView::default(), &selection).contains("No vocabulary entries loaded"));
    }

    #[rstest]
    fn hidden_columns_are_not_drawn(selection: SelectionStore) {
        let mut view = TableView::new(vec![entry_with_id(1, "cat")]);
        view.layout_mut().set_visible(ColumnId::PublicNotes, false);

        assert!(!render(&view, &selection).contains("Public Notes"));
    }
}
