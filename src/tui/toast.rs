//! Toast notification
//!
//! A short message shown over the bottom-right corner that auto-dismisses.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

pub struct Toast {
    pub message: String,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    /// Create a toast shown for three seconds
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Render in the bottom-right corner of `area`, on top of other content
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let width = u16::try_from(self.message.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let paragraph = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(paragraph, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn fresh_toast_is_not_expired() {
        assert!(!Toast::new("Exported").is_expired());
    }

    #[test]
    fn very_long_message_fits_the_area() {
        // 65534 columns wide, past what fits in a u16 once the border is added
        let toast = Toast::new(format!("Exported to {}", "x/".repeat(32_761)));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                toast.render(f, area);
            })
            .unwrap();
    }
}
