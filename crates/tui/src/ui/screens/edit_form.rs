use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::EditModal,
    ui::{components::popup::dialog_area, theme::Theme},
};

const LABEL_WIDTH: usize = 16;

pub fn render(frame: &mut Frame<'_>, area: Rect, edit: &EditModal) {
    let theme = Theme::default();
    let fields = edit.form.fields();
    let popup = dialog_area(&edit.options, fields.len() as u16 + 2, area);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(format!(" Editar gasto #{} ", edit.form.id()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Status
        ])
        .split(inner);

    let lines = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == edit.form.focus();
            let label = format!("{:<LABEL_WIDTH$}", field.column.header());
            let value_style = if focused {
                Style::default()
                    .fg(theme.text)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let mut spans = vec![
                Span::styled(label, Style::default().fg(theme.text_muted)),
                Span::styled(field.value.as_str(), value_style),
            ];
            if focused && !edit.saving {
                spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    let offset = scroll_offset(edit.form.focus(), layout[0].height);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), layout[0]);

    let status = match (&edit.error, edit.saving) {
        (_, true) => Span::styled("Guardando…", Style::default().fg(theme.dim)),
        (Some(err), false) => Span::styled(err.as_str(), Style::default().fg(theme.error)),
        (None, false) => Span::styled(
            "Tab siguiente  Enter guardar  Esc cancelar",
            Style::default().fg(theme.dim),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), layout[1]);
}

/// First line to draw so the focused field stays on screen.
fn scroll_offset(focus: usize, height: u16) -> u16 {
    let height = usize::from(height.max(1));
    let offset = (focus + 1).saturating_sub(height);
    u16::try_from(offset).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_field_stays_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(17, 5), 13);
        assert_eq!(scroll_offset(3, 0), 3);
    }
}
