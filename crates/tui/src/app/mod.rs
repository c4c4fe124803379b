pub mod modal;
pub mod toast;

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{
    ApiError, Column, Command, CommandQueue, Completion, EditResult, Gasto, GastoList, ListEvent,
    TableState,
};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    local_state::LocalState,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use modal::{EditModal, Modal};
pub use toast::Toasts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Keystrokes go to the filter field.
    Filter,
}

/// What the app loop must do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Idle,
    Submit(Command),
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub list: GastoList,
    pub mode: Mode,
    pub filter_input: String,
    /// Selected row within the current page.
    pub selected: usize,
    /// Column cursor, index into [`Column::ALL`].
    pub column: usize,
    pub modal: Option<Modal>,
    pub toasts: Toasts,
    pub base_url: String,
    pub last_refresh: Option<DateTime<Local>>,
    /// Commands queued and not completed yet.
    pub pending: usize,
}

impl AppState {
    pub fn new(list: GastoList, base_url: String) -> Self {
        Self {
            list,
            mode: Mode::Browse,
            filter_input: String::new(),
            selected: 0,
            column: 0,
            modal: None,
            toasts: Toasts::default(),
            base_url,
            last_refresh: None,
            pending: 0,
        }
    }

    pub fn cursor_column(&self) -> Column {
        Column::ALL[self.column.min(Column::ALL.len() - 1)]
    }

    pub fn selected_gasto(&self) -> Option<Gasto> {
        self.list
            .visible()
            .rows
            .get(self.selected)
            .map(|gasto| (*gasto).clone())
    }

    pub fn handle(&mut self, action: AppAction) -> Step {
        if action == AppAction::Quit {
            return Step::Quit;
        }
        if self.modal.is_some() {
            return self.handle_modal(action);
        }
        match self.mode {
            Mode::Filter => self.handle_filter(action),
            Mode::Browse => self.handle_browse(action),
        }
    }

    fn handle_browse(&mut self, action: AppAction) -> Step {
        match action {
            AppAction::Up | AppAction::Input('k') => self.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.select_next(),
            AppAction::Left | AppAction::Input('[') => {
                self.column = self.column.saturating_sub(1);
            }
            AppAction::Right | AppAction::Input(']') => {
                self.column = (self.column + 1).min(Column::ALL.len() - 1);
            }
            AppAction::Cancel => {
                self.toasts.dismiss();
            }
            AppAction::Submit | AppAction::Input('e') => self.open_edit(),
            AppAction::Input(ch) => return self.handle_browse_char(ch),
            _ => {}
        }
        Step::Idle
    }

    fn handle_browse_char(&mut self, ch: char) -> Step {
        match ch {
            'q' => return Step::Quit,
            '/' => self.mode = Mode::Filter,
            'c' => {
                self.filter_input.clear();
                self.list.apply_filter("");
                self.selected = 0;
            }
            'n' => {
                self.list.next_page();
                self.selected = 0;
            }
            'p' => {
                self.list.prev_page();
                self.selected = 0;
            }
            '+' => {
                self.list.grow_page_size();
                self.clamp_selection();
            }
            '-' => {
                self.list.shrink_page_size();
                self.clamp_selection();
            }
            's' => {
                self.list.toggle_sort(self.cursor_column());
                self.selected = 0;
            }
            'd' => {
                if let Some(gasto) = self.selected_gasto() {
                    self.modal = Some(Modal::from(self.list.request_delete(gasto.id)));
                }
            }
            'D' => {
                self.modal = Some(Modal::from(self.list.request_delete_all()));
            }
            'r' => return Step::Submit(self.list.reload()),
            _ => {}
        }
        Step::Idle
    }

    fn handle_filter(&mut self, action: AppAction) -> Step {
        match action {
            AppAction::Input(ch) => {
                self.filter_input.push(ch);
                self.apply_filter();
            }
            AppAction::Backspace => {
                self.filter_input.pop();
                self.apply_filter();
            }
            AppAction::Up => self.select_prev(),
            AppAction::Down => self.select_next(),
            AppAction::Submit | AppAction::Cancel => self.mode = Mode::Browse,
            _ => {}
        }
        Step::Idle
    }

    fn apply_filter(&mut self) {
        self.list.apply_filter(&self.filter_input);
        self.selected = 0;
    }

    fn handle_modal(&mut self, action: AppAction) -> Step {
        let Some(open) = self.modal.as_mut() else {
            return Step::Idle;
        };

        match open {
            Modal::Edit(edit) => {
                if edit.saving {
                    return Step::Idle;
                }
                match action {
                    AppAction::Cancel => {
                        self.modal = None;
                        if let Some(cmd) =
                            self.list.edit_closed(EditResult::Cancelled, &mut self.toasts)
                        {
                            return Step::Submit(cmd);
                        }
                    }
                    AppAction::NextField | AppAction::Down => edit.form.focus_next(),
                    AppAction::PrevField | AppAction::Up => edit.form.focus_prev(),
                    AppAction::Backspace => edit.form.pop(),
                    AppAction::Input(ch) => edit.form.push(ch),
                    AppAction::Submit => match edit.form.to_gasto() {
                        Ok(gasto) => {
                            edit.saving = true;
                            edit.error = None;
                            return Step::Submit(Command::Save(gasto));
                        }
                        Err(err) => edit.error = Some(err.to_string()),
                    },
                    _ => {}
                }
            }
            Modal::ConfirmDelete { id, .. } => {
                let id = *id;
                if let Some(result) = modal::confirm_key(action) {
                    self.modal = None;
                    if let Some(cmd) = self.list.delete_closed(id, result) {
                        return Step::Submit(cmd);
                    }
                }
            }
            Modal::ConfirmDeleteAll { input, .. } => {
                if let Some(result) = modal::delete_all_key(input, action) {
                    self.modal = None;
                    if let Some(cmd) = self.list.delete_all_closed(result, &mut self.toasts) {
                        return Step::Submit(cmd);
                    }
                }
            }
        }
        Step::Idle
    }

    fn open_edit(&mut self) {
        if let Some(gasto) = self.selected_gasto() {
            self.modal = Some(Modal::from(self.list.edit(&gasto)));
        }
    }

    /// Applies a completion from the command worker, possibly queueing a
    /// follow-up command.
    pub fn complete(&mut self, completion: Completion) -> Option<Command> {
        match completion {
            Completion::List(event) => {
                let fetched = matches!(event, ListEvent::Fetched(Ok(_)));
                self.list.apply(event, &mut self.toasts);
                if fetched {
                    self.last_refresh = Some(Local::now());
                }
                self.clamp_selection();
                None
            }
            Completion::Saved(result) => self.saved(result),
        }
    }

    fn saved(&mut self, result: std::result::Result<Gasto, ApiError>) -> Option<Command> {
        match result {
            Ok(gasto) => {
                tracing::info!("gasto {} updated", gasto.id);
                if matches!(self.modal, Some(Modal::Edit(_))) {
                    self.modal = None;
                }
                self.list.edit_closed(EditResult::Updated, &mut self.toasts)
            }
            Err(err) => {
                tracing::error!("failed to update gasto: {err}");
                if let Some(Modal::Edit(edit)) = self.modal.as_mut() {
                    edit.saving = false;
                    edit.error = Some(format!("No se pudo guardar: {err}"));
                }
                None
            }
        }
    }

    fn select_next(&mut self) {
        let rows = self.list.visible().rows.len();
        if rows == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(rows - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let rows = self.list.visible().rows.len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }
}

pub struct App {
    config: AppConfig,
    queue: CommandQueue,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let saved = LocalState::load(&config.state_file).unwrap_or_else(|err| {
            tracing::warn!("ignoring unreadable state file {}: {err}", config.state_file);
            LocalState::default()
        });
        let mut table = TableState::new(saved.page_size.unwrap_or(config.page_size));
        table.set_sort(saved.restored_sort());
        let list = GastoList::new(table).with_fetch_error_notices(config.notify_fetch_errors);

        Ok(Self {
            state: AppState::new(list, config.base_url.clone()),
            queue: CommandQueue::spawn(client),
            config,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;

        let saved = LocalState::capture(self.state.list.table());
        if let Err(err) = saved.save(&self.config.state_file) {
            tracing::warn!("failed to save state to {}: {err}", self.config.state_file);
        }
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        let init = self.state.list.init();
        self.submit(init)?;

        while !self.should_quit {
            while let Some(completion) = self.queue.try_next() {
                if let Some(cmd) = self.state.complete(completion) {
                    self.submit(cmd)?;
                }
            }
            self.state.pending = self.queue.pending();
            self.state.toasts.expire(Instant::now());

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key)?,
                    _ => {}
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state.handle(map_key(key)) {
            Step::Idle => {}
            Step::Submit(cmd) => self.submit(cmd)?,
            Step::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn submit(&mut self, command: Command) -> Result<()> {
        tracing::debug!("queueing {}", command.label());
        self.queue.submit(command)?;
        self.state.pending = self.queue.pending();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{
        DELETE_ALL_KEYWORD, NoticeLevel,
        list::{MSG_UPDATED, MSG_WRONG_KEYWORD},
    };

    fn gasto(id: i64, concepto: &str) -> Gasto {
        Gasto {
            id,
            concepto: concepto.to_string(),
            monto: 10.0,
            ..Gasto::default()
        }
    }

    fn state_with(items: Vec<Gasto>) -> AppState {
        let mut list = GastoList::new(TableState::new(2));
        list.init();
        let mut state = AppState::new(list, "http://localhost/".to_string());
        state.complete(Completion::List(ListEvent::Fetched(Ok(items))));
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            state.handle(AppAction::Input(ch));
        }
    }

    #[test]
    fn filter_mode_narrows_rows_and_resets_page() {
        let mut state = state_with(vec![
            gasto(1, "Taxi"),
            gasto(2, "Hotel"),
            gasto(3, "Taxi aeropuerto"),
        ]);
        state.handle(AppAction::Input('n'));
        assert_eq!(state.list.table().page(), 1);

        state.handle(AppAction::Input('/'));
        type_text(&mut state, "TAXI");
        assert_eq!(state.list.table().page(), 0);
        assert_eq!(state.list.visible().matched, 2);

        state.handle(AppAction::Submit);
        assert_eq!(state.mode, Mode::Browse);
        state.handle(AppAction::Input('c'));
        assert_eq!(state.list.visible().matched, 3);
    }

    #[test]
    fn q_quits_only_when_browsing() {
        let mut state = state_with(vec![gasto(1, "a")]);
        state.handle(AppAction::Input('/'));
        assert_eq!(state.handle(AppAction::Input('q')), Step::Idle);
        assert_eq!(state.filter_input, "q");
        state.handle(AppAction::Cancel);
        assert_eq!(state.handle(AppAction::Input('q')), Step::Quit);
    }

    #[test]
    fn delete_goes_through_confirmation() {
        let mut state = state_with(vec![gasto(1, "a"), gasto(2, "b")]);
        state.handle(AppAction::Down);
        state.handle(AppAction::Input('d'));
        assert!(matches!(state.modal, Some(Modal::ConfirmDelete { id: 2, .. })));

        assert_eq!(state.handle(AppAction::Input('n')), Step::Idle);
        assert!(state.modal.is_none());

        state.handle(AppAction::Input('d'));
        assert_eq!(
            state.handle(AppAction::Submit),
            Step::Submit(Command::Delete(2))
        );

        state.complete(Completion::List(ListEvent::Deleted {
            id: 2,
            result: Ok(()),
        }));
        assert_eq!(state.list.items().len(), 1);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn delete_all_with_wrong_phrase_notifies() {
        let mut state = state_with(vec![gasto(1, "a")]);
        state.handle(AppAction::Input('D'));
        type_text(&mut state, "eliminar");
        assert_eq!(state.handle(AppAction::Submit), Step::Idle);
        assert!(state.modal.is_none());
        let toast = state.toasts.iter().last().unwrap();
        assert_eq!(toast.notice.level, NoticeLevel::Error);
        assert_eq!(toast.notice.message, MSG_WRONG_KEYWORD);

        state.handle(AppAction::Input('D'));
        type_text(&mut state, DELETE_ALL_KEYWORD);
        assert_eq!(
            state.handle(AppAction::Submit),
            Step::Submit(Command::DeleteAll)
        );
    }

    #[test]
    fn edit_save_then_refetch() {
        let mut state = state_with(vec![gasto(1, "Taxi")]);
        state.handle(AppAction::Input('e'));
        assert!(matches!(state.modal, Some(Modal::Edit(_))));

        for _ in 0..4 {
            state.handle(AppAction::NextField);
        }
        type_text(&mut state, " nocturno");
        let Step::Submit(Command::Save(saved)) = state.handle(AppAction::Submit) else {
            panic!("expected a save command");
        };
        assert_eq!(saved.concepto, "Taxi nocturno");

        // input is ignored while saving
        assert_eq!(state.handle(AppAction::Cancel), Step::Idle);
        assert!(state.modal.is_some());

        let next = state.complete(Completion::Saved(Ok(saved)));
        assert_eq!(next, Some(Command::FetchAll));
        assert!(state.modal.is_none());
        assert_eq!(
            state.toasts.iter().last().unwrap().notice.message,
            MSG_UPDATED
        );
    }

    #[test]
    fn failed_save_keeps_form_open() {
        let mut state = state_with(vec![gasto(1, "Taxi")]);
        state.handle(AppAction::Submit);
        state.handle(AppAction::Submit);

        let next = state.complete(Completion::Saved(Err(ApiError::Validation(
            "monto inválido".to_string(),
        ))));
        assert_eq!(next, None);
        let Some(Modal::Edit(edit)) = &state.modal else {
            panic!("edit form should stay open");
        };
        assert!(!edit.saving);
        assert!(edit.error.as_deref().unwrap().contains("monto inválido"));
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn cancelled_edit_has_no_effect() {
        let mut state = state_with(vec![gasto(1, "Taxi")]);
        state.handle(AppAction::Input('e'));
        assert_eq!(state.handle(AppAction::Cancel), Step::Idle);
        assert!(state.modal.is_none());
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn sort_uses_column_cursor() {
        let mut state = state_with(vec![gasto(2, "b"), gasto(1, "a")]);
        for _ in 0..4 {
            state.handle(AppAction::Right);
        }
        assert_eq!(state.cursor_column(), Column::Concepto);
        state.handle(AppAction::Input('s'));
        assert_eq!(state.selected_gasto().map(|g| g.id), Some(1));
    }

    #[test]
    fn sorting_returns_selection_to_first_row() {
        let mut state = state_with(vec![gasto(1, "a"), gasto(2, "b")]);
        state.handle(AppAction::Down);
        assert_eq!(state.selected, 1);

        for _ in 0..4 {
            state.handle(AppAction::Right);
        }
        state.handle(AppAction::Input('s'));
        state.handle(AppAction::Input('s'));
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_gasto().map(|g| g.id), Some(2));
    }
}
