use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use engine::NoticeLevel;

use crate::{app::Toasts, ui::theme::Theme};

/// Stacks toasts bottom-right, newest at the bottom.
pub fn render(frame: &mut Frame<'_>, area: Rect, toasts: &Toasts) {
    let theme = Theme::default();
    let height = 3u16;
    let mut bottom = area.y + area.height.saturating_sub(1);

    for toast in toasts.iter().rev() {
        if bottom < area.y + height {
            break;
        }
        let notice = &toast.notice;
        let text_width = notice.message.chars().count() + notice.action.chars().count() + 3;
        let width = (text_width + 4).min(area.width as usize) as u16;
        let x = area.x + area.width.saturating_sub(width);
        let rect = Rect {
            x,
            y: bottom - height,
            width,
            height,
        };

        let style = match notice.level {
            NoticeLevel::Success => Style::default().fg(theme.positive),
            NoticeLevel::Error => Style::default().fg(theme.error),
        };

        let block = Block::default().borders(Borders::ALL).border_style(style);
        let line = Line::from(vec![
            Span::styled(notice.message.as_str(), style),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", notice.action),
                Style::default().fg(theme.accent),
            ),
        ]);
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(line).block(block), rect);
        bottom -= height;
    }
}
