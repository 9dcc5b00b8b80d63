// Reusable UI components

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Accent colour for the configured `ui.theme`
pub fn accent_color(theme: &str) -> Color {
    match theme {
        "frog_splash" => Color::Green,
        _ => Color::Cyan,
    }
}

pub struct Footer {
    content: Line<'static>,
}

impl Footer {
    pub fn main() -> Self {
        let controls = [
            ("[Tab]", " Section"),
            ("[↑/↓]", " Navigate"),
            ("[←/→]", " Change"),
            ("[S]", "tart"),
            ("[R]", "escan"),
            ("[Q]", "uit"),
        ];

        let mut spans = vec![Span::raw("CONTROLS: ")];

        for (i, (hotkey, desc)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*hotkey, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(*desc));
        }

        Self {
            content: Line::from(spans),
        }
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.content)
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
    }
}

/// One-line `< value >` selector; highlighted when its section has focus
pub fn render_choice(
    label: &str,
    value: &str,
    focused: bool,
    accent: Color,
    area: Rect,
    buf: &mut Buffer,
) {
    let value_style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(accent)
    };
    let arrow_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = Line::from(vec![
        Span::raw(format!("{:<11}", label)),
        Span::styled("< ", arrow_style),
        Span::styled(value.to_string(), value_style),
        Span::styled(" >", arrow_style),
    ]);

    buf.set_line(area.x, area.y, &text, area.width);
}
