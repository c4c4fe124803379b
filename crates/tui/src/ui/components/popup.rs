use engine::DialogOptions;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dialog widths are given in pixels; a terminal cell is taken as 8 wide.
const PIXELS_PER_CELL: u16 = 8;
const MIN_WIDTH: u16 = 30;

/// Calculates a centered rect of the given size, clipped to `area`.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Area of a dialog opened with `options`, for a body of `content_height`
/// lines. `max_height` is a percentage of the screen.
pub fn dialog_area(options: &DialogOptions, content_height: u16, area: Rect) -> Rect {
    let width = (options.width / PIXELS_PER_CELL).max(MIN_WIDTH);
    let max_height = options
        .max_height
        .map(|percent| area.height.saturating_mul(percent) / 100)
        .unwrap_or(area.height);
    let height = content_height.saturating_add(2).min(max_height);
    centered_box(width, height, area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_width_follows_options() {
        let area = Rect::new(0, 0, 200, 50);
        let confirm = dialog_area(&DialogOptions::CONFIRM_DELETE, 4, area);
        assert_eq!(confirm.width, 43);
        assert_eq!(confirm.height, 6);

        let edit = dialog_area(&DialogOptions::EDIT, 100, area);
        assert_eq!(edit.width, 125);
        assert_eq!(edit.height, 45);
    }

    #[test]
    fn small_screens_clip() {
        let area = Rect::new(0, 0, 40, 10);
        let edit = dialog_area(&DialogOptions::EDIT, 100, area);
        assert_eq!(edit.width, 40);
        assert_eq!(edit.height, 9);
    }
}
