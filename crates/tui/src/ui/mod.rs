pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::LoadState;

use crate::app::{AppState, Modal, Mode};

use components::hints::{self, KeyHint};
pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::gastos::render(frame, layout[1], state);
    render_bottom_bar(frame, layout[2], state, &theme);

    match &state.modal {
        Some(Modal::Edit(edit)) => screens::edit_form::render(frame, area, edit),
        Some(Modal::ConfirmDelete {
            message, options, ..
        }) => screens::confirm::render_delete(frame, area, message, options),
        Some(Modal::ConfirmDeleteAll {
            keyword,
            input,
            options,
        }) => screens::confirm::render_delete_all(frame, area, keyword, input, options),
        None => {}
    }

    components::toast::render(frame, area, &state.toasts);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = match state.list.load_state() {
        LoadState::Idle => ("-", Style::default().fg(theme.dim)),
        LoadState::Loading => ("…", Style::default().fg(theme.dim)),
        LoadState::Loaded => ("OK", Style::default().fg(theme.positive)),
        LoadState::Failed(_) => ("ERR", Style::default().fg(theme.error)),
    };

    let mut spans = vec![
        Span::styled("Gastos", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.list.items().len())),
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Actualizado", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ];
    if state.pending > 0 {
        spans.push(Span::styled(
            format!("  ⟳ {}", state.pending),
            Style::default().fg(theme.accent),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints::hints_to_spans(&context_hints(state), theme);
    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(&hints::common::global(), theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Keyboard hints for the current mode or open dialog.
fn context_hints(state: &AppState) -> Vec<KeyHint> {
    match (&state.modal, state.mode) {
        (Some(Modal::Edit(_)), _) => hints::common::form_editing(),
        (Some(Modal::ConfirmDelete { .. }), _) => hints::common::confirm(),
        (Some(Modal::ConfirmDeleteAll { .. }), _) => hints::common::type_keyword(),
        (None, Mode::Filter) => hints::common::filter(),
        (None, Mode::Browse) => {
            let mut keys = hints::common::browse();
            keys.extend(hints::common::row_actions());
            keys
        }
    }
}
