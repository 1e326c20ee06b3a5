//! `Model` trait implementation for the vocabulary TUI application.
//!
//! This module contains the `bubbletea_rs::Model` trait implementation for
//! `VocabularyApp`, handling initialisation, update dispatch, and view
//! rendering.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};
use unicode_width::UnicodeWidthChar;

use super::{ViewMode, VocabularyApp};
use crate::selection::{InMemorySelection, SelectionStore};
use crate::telemetry::NoopTelemetrySink;
use crate::tui::input::map_key_to_message_with_context;
use crate::tui::messages::AppMsg;
use crate::tui::storage::{get_app_context, get_initial_terminal_size};

impl Model for VocabularyApp {
    fn init() -> (Self, Option<Cmd>) {
        let model = get_app_context().map_or_else(
            || {
                Self::unconfigured(SelectionStore::load(
                    Box::new(InMemorySelection::default()),
                    &NoopTelemetrySink,
                ))
            },
            |context| Self::from_context(&context),
        );
        let (width, height) = get_initial_terminal_size();

        // The first fetch starts when `AppMsg::Initialized` is handled.
        (
            model.with_dimensions(width, height),
            Some(Self::immediate_init_cmd()),
        )
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            // Any key closes the help overlay.
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let mapped = map_key_to_message_with_context(key_msg, self.input_context())?;
            return self.handle_message(&mapped);
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            return self.handle_message(&AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            });
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }
        let output = match self.view_mode {
            ViewMode::Table => self.render_table_view(),
            ViewMode::Study => self.render_study_view(),
        };
        self.normalise_viewport(&output)
    }
}

impl VocabularyApp {
    /// Emits an immediate startup message.
    pub(super) fn immediate_init_cmd() -> Cmd {
        Box::pin(async { Some(Box::new(AppMsg::Initialized) as Box<dyn Any + Send>) })
    }

    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are clamped to one column less than the terminal width to avoid
    /// autowrap, and padded with spaces to clear cells left by a longer
    /// previous frame.
    pub(super) fn normalise_viewport(&self, output: &str) -> String {
        let width = usize::from(self.width.max(1));
        let safe_width = width.saturating_sub(1).max(1);
        let height = usize::from(self.height.max(1));

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| pad_or_truncate_plain_line(line, safe_width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(safe_width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}

fn pad_or_truncate_plain_line(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible_width = 0usize;

    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if char_width == 0 {
            output.push(ch);
            continue;
        }
        if visible_width.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible_width = visible_width.saturating_add(char_width);
    }

    output.push_str(&" ".repeat(width.saturating_sub(visible_width)));
    output
}
