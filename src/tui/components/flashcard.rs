//! Flashcard component for the study view.

use unicode_width::UnicodeWidthStr;

use crate::study::StudySession;

use super::text_fit::truncate_with_ellipsis;

const CARD_WIDTH: usize = 44;

/// Everything needed to draw one frame of the study view.
#[derive(Debug, Clone, Copy)]
pub struct FlashcardViewContext<'a> {
    /// Session to draw.
    pub session: &'a StudySession,
    /// Terminal width in columns.
    pub max_width: usize,
}

/// Stateless renderer for the flashcard session.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlashcardComponent;

impl FlashcardComponent {
    /// Renders progress, feedback, and the current card face.
    #[must_use]
    pub fn view(ctx: &FlashcardViewContext<'_>) -> String {
        let session = ctx.session;
        let card_width = CARD_WIDTH.min(ctx.max_width.saturating_sub(2)).max(8);

        let Some((position, total)) = session.progress() else {
            return format!(
                "Flashcards\n\n  {}\n\n  Esc: back to vocabulary list\n",
                session.empty_message()
            );
        };

        let mut output = format!("Flashcards  {position} / {total}\n");
        let feedback = session
            .feedback()
            .map(|feedback| feedback.message.as_str())
            .unwrap_or_default();
        output.push_str(&truncate_with_ellipsis(feedback, ctx.max_width));
        output.push('\n');

        let face = session.visible_face();
        let mut body = Vec::new();
        if let Some(reading) = face.and_then(|card| card.reading) {
            body.push(reading);
        }
        body.push(face.map_or("", |card| card.text));

        output.push_str(&border(card_width));
        output.push_str(&padded_line("", card_width));
        for line in body {
            output.push_str(&padded_line(line, card_width));
        }
        output.push_str(&padded_line("", card_width));
        output.push_str(&border(card_width));
        output
    }
}

fn border(width: usize) -> String {
    format!("+{}+\n", "-".repeat(width))
}

fn padded_line(text: &str, width: usize) -> String {
    let fitted = truncate_with_ellipsis(text, width);
    let spare = width.saturating_sub(fitted.width());
    let left = spare.checked_div(2).unwrap_or(0);
    let right = spare.saturating_sub(left);
    format!("|{}{fitted}{}|\n", " ".repeat(left), " ".repeat(right))
}
