use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hint groups per context.
pub mod common {
    use super::KeyHint;

    pub fn browse() -> Vec<KeyHint> {
        vec![
            KeyHint::new("↑↓", "fila"),
            KeyHint::new("←→", "columna"),
            KeyHint::new("s", "ordenar"),
            KeyHint::new("/", "filtrar"),
            KeyHint::new("n/p", "página"),
            KeyHint::new("+/-", "filas"),
        ]
    }

    pub fn row_actions() -> Vec<KeyHint> {
        vec![
            KeyHint::new("e", "editar"),
            KeyHint::new("d", "eliminar"),
            KeyHint::new("D", "eliminar todo"),
            KeyHint::new("r", "recargar"),
        ]
    }

    pub fn filter() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Enter", "aplicar"),
            KeyHint::new("Esc", "volver"),
        ]
    }

    pub fn form_editing() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "siguiente"),
            KeyHint::new("Enter", "guardar"),
            KeyHint::new("Esc", "cancelar"),
        ]
    }

    pub fn confirm() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Enter/s", "confirmar"),
            KeyHint::new("Esc/n", "cancelar"),
        ]
    }

    pub fn type_keyword() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Enter", "confirmar"),
            KeyHint::new("Esc", "cancelar"),
        ]
    }

    pub fn global() -> Vec<KeyHint> {
        vec![KeyHint::new("q", "salir")]
    }
}
