use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use engine::DialogOptions;

use crate::ui::{components::popup::dialog_area, theme::Theme};

pub fn render_delete(frame: &mut Frame<'_>, area: Rect, message: &str, options: &DialogOptions) {
    let theme = Theme::default();
    let lines = vec![
        Line::from(message),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" eliminar   "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancelar"),
        ]),
    ];
    render_dialog(frame, area, " Confirmar ", lines, options, &theme);
}

pub fn render_delete_all(
    frame: &mut Frame<'_>,
    area: Rect,
    keyword: &str,
    input: &str,
    options: &DialogOptions,
) {
    let theme = Theme::default();
    let lines = vec![
        Line::from(Span::styled(
            "Esta acción eliminará todos los gastos.",
            Style::default().fg(theme.error),
        )),
        Line::from(vec![
            Span::raw("Escriba "),
            Span::styled(keyword, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" para confirmar:"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::raw(input),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ]),
    ];
    render_dialog(frame, area, " Eliminar todos ", lines, options, &theme);
}

fn render_dialog(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    options: &DialogOptions,
    theme: &Theme,
) {
    let popup = dialog_area(options, lines.len() as u16 + 1, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        popup,
    );
}
