use std::ops::Range;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState as RowCursor},
};

use engine::{Column, LoadState, SortDirection, VisibleRows};

use crate::{
    app::{AppState, Mode},
    ui::theme::Theme,
};

const ACTIONS_CELL: &str = "e ✎  d ✗";

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Paginator
        ])
        .split(area);

    render_filter(frame, layout[0], state, &theme);

    let visible = state.list.visible();
    if visible.is_empty() {
        render_empty(frame, layout[1], state, &visible, &theme);
    } else {
        render_table(frame, layout[1], state, &visible, &theme);
    }

    let paginator = Paragraph::new(Line::from(Span::styled(
        paginator_label(&visible),
        Style::default().fg(theme.text_muted),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(paginator, layout[2]);
}

fn render_filter(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.mode == Mode::Filter;
    let border = if editing { theme.accent } else { theme.border };

    let line = if state.filter_input.is_empty() && !editing {
        Line::from(Span::styled(
            "Ej. Transporte",
            Style::default().fg(theme.dim),
        ))
    } else {
        let mut spans = vec![Span::styled(
            state.filter_input.as_str(),
            Style::default().fg(theme.text),
        )];
        if editing {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    let block = Block::default()
        .title(" Filtrar ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_empty(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    visible: &VisibleRows<'_>,
    theme: &Theme,
) {
    let message = empty_message(state, visible);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(theme.text_muted),
        )))
        .alignment(Alignment::Center)
        .block(block),
        area,
    );
}

fn empty_message(state: &AppState, visible: &VisibleRows<'_>) -> String {
    if state.list.is_empty_state() {
        return "No hay gastos registrados.".to_string();
    }
    if visible.total > 0 && visible.matched == 0 {
        return format!(
            "Ningún gasto coincide con \"{}\".",
            state.list.table().filter()
        );
    }
    match state.list.load_state() {
        LoadState::Idle | LoadState::Loading => "Cargando gastos…".to_string(),
        _ => "No hay gastos registrados.".to_string(),
    }
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    visible: &VisibleRows<'_>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner_width = block.inner(area).width.saturating_sub(2);

    let widths = Column::ALL.map(column_width);
    let shown = visible_columns(&widths, state.column, inner_width);
    let all = &Column::ALL;
    let columns = &all[shown.clone()];
    let sort = state.list.table().sort();

    let header = Row::new(columns.iter().enumerate().map(|(offset, column)| {
        let marker = match sort {
            Some(sort) if sort.column == *column => match sort.direction {
                SortDirection::Asc => " ▲",
                SortDirection::Desc => " ▼",
            },
            _ => "",
        };
        let mut style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        if shown.start + offset == state.column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(format!("{}{marker}", column.header())).style(style)
    }));

    let rows = visible.rows.iter().map(|gasto| {
        Row::new(columns.iter().map(|column| {
            if column.is_data() {
                Cell::from(column.cell(gasto).into_owned())
            } else {
                Cell::from(ACTIONS_CELL).style(Style::default().fg(theme.dim))
            }
        }))
    });

    let constraints = columns
        .iter()
        .map(|column| Constraint::Length(column_width(*column)));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut cursor = RowCursor::default();
    cursor.select(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut cursor);
}

pub fn column_width(column: Column) -> u16 {
    match column {
        Column::TipoDocumento => 10,
        Column::NumeroDocumento => 14,
        Column::Siaf => 8,
        Column::ANombreDe => 24,
        Column::Concepto => 30,
        Column::Monto | Column::Monto2 => 12,
        Column::Especifica | Column::Especifica2 => 14,
        Column::Ff => 4,
        Column::Mes => 10,
        Column::FechaDevengado | Column::FechaSalida | Column::FechaRetorno => 12,
        Column::Proyecto => 16,
        Column::Meta => 6,
        Column::CertificacionViatico => 14,
        Column::Destino => 16,
        Column::Acciones => 10,
    }
}

/// Window of columns that fits in `available` cells and contains `cursor`,
/// scrolling right only as far as needed.
pub fn visible_columns(widths: &[u16], cursor: usize, available: u16) -> Range<usize> {
    if widths.is_empty() {
        return 0..0;
    }
    let cursor = cursor.min(widths.len() - 1);
    let fits = |range: Range<usize>| {
        let used: u32 = widths[range].iter().map(|width| u32::from(*width) + 1).sum();
        used <= u32::from(available) + 1
    };

    let mut start = 0;
    while start < cursor && !fits(start..cursor + 1) {
        start += 1;
    }
    let mut end = cursor + 1;
    while end < widths.len() && fits(start..end + 1) {
        end += 1;
    }
    start..end
}

pub fn paginator_label(visible: &VisibleRows<'_>) -> String {
    let range = match visible.range() {
        Some((start, end)) => format!("{start} – {end} de {}", visible.matched),
        None => format!("0 de {}", visible.matched),
    };
    format!(
        "Filas por página: {}   {range}   Página {}/{}",
        visible.page_size,
        visible.page + 1,
        visible.page_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Gasto, GastoList, ListEvent, TableState, visible_rows};
    use ratatui::{Terminal, backend::TestBackend};

    use crate::app::{AppState, Toasts};

    fn gasto(id: i64, concepto: &str) -> Gasto {
        Gasto {
            id,
            concepto: concepto.to_string(),
            ..Gasto::default()
        }
    }

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn columns_scroll_to_cursor() {
        let widths = [10, 10, 10, 10];
        assert_eq!(visible_columns(&widths, 0, 21), 0..2);
        assert_eq!(visible_columns(&widths, 2, 21), 1..3);
        assert_eq!(visible_columns(&widths, 3, 100), 0..4);
        assert_eq!(visible_columns(&widths, 9, 21), 2..4);
        assert_eq!(visible_columns(&widths, 1, 3), 1..2);
        assert_eq!(visible_columns(&[], 0, 10), 0..0);
    }

    #[test]
    fn paginator_describes_page() {
        let items = (1..=12).map(|id| gasto(id, "x")).collect::<Vec<_>>();
        let rows = visible_rows(&items, "", None, 1, 5);
        assert_eq!(
            paginator_label(&rows),
            "Filas por página: 5   6 – 10 de 12   Página 2/3"
        );

        let none = visible_rows(&items, "nada", None, 0, 5);
        assert_eq!(
            paginator_label(&none),
            "Filas por página: 5   0 de 0   Página 1/1"
        );
    }

    #[test]
    fn empty_states() {
        let mut list = GastoList::new(TableState::new(10));
        list.init();
        let mut state = AppState::new(list, String::new());
        assert!(screen_text(&state).contains("Cargando gastos…"));

        let mut toasts = Toasts::default();
        state
            .list
            .apply(ListEvent::Fetched(Ok(Vec::new())), &mut toasts);
        assert!(screen_text(&state).contains("No hay gastos registrados."));

        state
            .list
            .apply(ListEvent::Fetched(Ok(vec![gasto(1, "Taxi")])), &mut toasts);
        assert!(screen_text(&state).contains("Taxi"));

        state.list.apply_filter("hotel");
        assert!(screen_text(&state).contains("Ningún gasto coincide"));
    }
}
