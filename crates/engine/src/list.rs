//! The gastos list controller.
//!
//! [`GastoList`] owns the in-memory collection and the table state. It never
//! talks to the backend or to the screen directly: user actions return the
//! [`Dialog`] to open or the [`Command`] to queue, and backend completions are
//! fed back through [`GastoList::apply`].
use api_types::gasto::{Gasto, GastoId};

use crate::{
    columns::Column,
    commands::{Command, ListEvent},
    dialog::{
        ConfirmResult, DELETE_ALL_KEYWORD, DELETE_CONFIRM_MESSAGE, DeleteAllResult, Dialog,
        DialogOptions, EditResult,
    },
    notify::{Notice, Notifier},
    table::{Sort, TableState, VisibleRows, visible_rows},
};

pub const MSG_UPDATED: &str = "¡Gasto actualizado con éxito!";
pub const MSG_DELETED: &str = "Gasto eliminado con éxito";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar el gasto";
pub const MSG_DELETED_ALL: &str = "Todos los gastos han sido eliminados.";
pub const MSG_DELETE_ALL_FAILED: &str = "Error al eliminar todos los gastos";
pub const MSG_WRONG_KEYWORD: &str = "Palabra de confirmación incorrecta. No se eliminó nada.";
pub const MSG_FETCH_FAILED: &str = "Error al cargar los gastos";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug)]
pub struct GastoList {
    items: Vec<Gasto>,
    table: TableState,
    load: LoadState,
    notify_fetch_errors: bool,
}

impl Default for GastoList {
    fn default() -> Self {
        Self::new(TableState::default())
    }
}

impl GastoList {
    pub fn new(table: TableState) -> Self {
        Self {
            items: Vec::new(),
            table,
            load: LoadState::Idle,
            notify_fetch_errors: false,
        }
    }

    /// Also show an error notice when the list cannot be fetched.
    pub fn with_fetch_error_notices(mut self, enabled: bool) -> Self {
        self.notify_fetch_errors = enabled;
        self
    }

    pub fn items(&self) -> &[Gasto] {
        &self.items
    }

    pub fn get(&self, id: GastoId) -> Option<&Gasto> {
        self.items.iter().find(|gasto| gasto.id == id)
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Rows on screen for the current collection and table state.
    pub fn visible(&self) -> VisibleRows<'_> {
        visible_rows(
            &self.items,
            self.table.filter(),
            self.table.sort(),
            self.table.page(),
            self.table.page_size(),
        )
    }

    /// Nothing to show because the backend has nothing, not because of a
    /// filter or a pending fetch.
    pub fn is_empty_state(&self) -> bool {
        self.items.is_empty() && matches!(self.load, LoadState::Loaded | LoadState::Failed(_))
    }

    /// Full fetch, issued on activation.
    pub fn init(&mut self) -> Command {
        tracing::info!("loading gastos");
        self.load = LoadState::Loading;
        Command::FetchAll
    }

    pub fn reload(&mut self) -> Command {
        self.init()
    }

    pub fn apply_filter(&mut self, text: &str) {
        self.table.set_filter(text);
    }

    pub fn toggle_sort(&mut self, column: Column) {
        self.table.toggle_sort(column);
    }

    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.table.set_sort(sort);
    }

    pub fn next_page(&mut self) {
        let page_count = self.visible().page_count;
        self.table.next_page(page_count);
    }

    pub fn prev_page(&mut self) {
        self.table.prev_page();
    }

    pub fn grow_page_size(&mut self) {
        self.table.grow_page_size();
        self.clamp_page();
    }

    pub fn shrink_page_size(&mut self) {
        self.table.shrink_page_size();
    }

    pub fn edit(&self, gasto: &Gasto) -> Dialog {
        Dialog::EditGasto {
            gasto: gasto.clone(),
            options: DialogOptions::EDIT,
        }
    }

    pub fn edit_closed(
        &mut self,
        result: EditResult,
        notifier: &mut impl Notifier,
    ) -> Option<Command> {
        match result {
            EditResult::Updated => {
                notifier.notify(Notice::success(MSG_UPDATED));
                Some(self.reload())
            }
            EditResult::Cancelled => None,
        }
    }

    pub fn request_delete(&self, id: GastoId) -> Dialog {
        Dialog::ConfirmDelete {
            id,
            message: DELETE_CONFIRM_MESSAGE,
            options: DialogOptions::CONFIRM_DELETE,
        }
    }

    pub fn delete_closed(&self, id: GastoId, result: ConfirmResult) -> Option<Command> {
        match result {
            ConfirmResult::Confirmed => Some(Command::Delete(id)),
            ConfirmResult::Cancelled => None,
        }
    }

    pub fn request_delete_all(&self) -> Dialog {
        Dialog::ConfirmDeleteAll {
            keyword: DELETE_ALL_KEYWORD,
            options: DialogOptions::CONFIRM_DELETE_ALL,
        }
    }

    pub fn delete_all_closed(
        &self,
        result: DeleteAllResult,
        notifier: &mut impl Notifier,
    ) -> Option<Command> {
        if result.is_keyword() {
            return Some(Command::DeleteAll);
        }
        if let DeleteAllResult::Confirmed(phrase) = result {
            tracing::info!("delete all refused, wrong confirmation phrase {phrase:?}");
            notifier.notify(Notice::error(MSG_WRONG_KEYWORD));
        }
        None
    }

    /// Applies a backend completion to the collection.
    pub fn apply(&mut self, event: ListEvent, notifier: &mut impl Notifier) {
        match event {
            ListEvent::Fetched(Ok(items)) => {
                tracing::info!("received {} gastos", items.len());
                if items.is_empty() {
                    tracing::warn!("the backend returned 0 gastos");
                }
                self.items = items;
                self.load = LoadState::Loaded;
            }
            ListEvent::Fetched(Err(err)) => {
                tracing::error!("failed to load gastos: {err}");
                if self.notify_fetch_errors {
                    notifier.notify(Notice::error(MSG_FETCH_FAILED));
                }
                self.load = LoadState::Failed(err.to_string());
            }
            ListEvent::Deleted { id, result: Ok(()) } => {
                notifier.notify(Notice::success(MSG_DELETED));
                let before = self.items.len();
                self.items.retain(|gasto| gasto.id != id);
                if self.items.len() == before {
                    tracing::warn!("deleted gasto {id} was not in the local list");
                }
            }
            ListEvent::Deleted {
                id,
                result: Err(err),
            } => {
                notifier.notify(Notice::error(MSG_DELETE_FAILED));
                tracing::error!("failed to delete gasto {id}: {err}");
            }
            ListEvent::DeletedAll(Ok(())) => {
                notifier.notify(Notice::success(MSG_DELETED_ALL));
                self.items.clear();
            }
            ListEvent::DeletedAll(Err(err)) => {
                notifier.notify(Notice::error(MSG_DELETE_ALL_FAILED));
                tracing::error!("failed to delete all gastos: {err}");
            }
        }
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let page_count = self.visible().page_count;
        self.table.clamp_page(page_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ApiError, notify::NoticeLevel};

    fn gasto(id: GastoId, concepto: &str) -> Gasto {
        Gasto {
            id,
            concepto: concepto.to_string(),
            monto: id as f64 * 10.0,
            ..Gasto::default()
        }
    }

    fn loaded(items: Vec<Gasto>) -> GastoList {
        let mut list = GastoList::default();
        list.init();
        list.apply(ListEvent::Fetched(Ok(items)), &mut Vec::new());
        list
    }

    #[test]
    fn init_issues_fetch_and_marks_loading() {
        let mut list = GastoList::default();
        assert_eq!(list.init(), Command::FetchAll);
        assert_eq!(list.load_state(), &LoadState::Loading);
        assert!(!list.is_empty_state());
    }

    #[test]
    fn empty_fetch_is_an_empty_state() {
        let mut notices = Vec::new();
        let mut list = GastoList::default();
        list.init();
        list.apply(ListEvent::Fetched(Ok(Vec::new())), &mut notices);
        assert!(list.is_empty_state());
        assert_eq!(list.load_state(), &LoadState::Loaded);
        assert!(notices.is_empty());
    }

    #[test]
    fn fetch_failure_is_silent_by_default() {
        let mut notices = Vec::new();
        let mut list = GastoList::default();
        list.init();
        list.apply(
            ListEvent::Fetched(Err(ApiError::Transport("refused".to_string()))),
            &mut notices,
        );
        assert!(list.items().is_empty());
        assert!(notices.is_empty());
        assert!(matches!(list.load_state(), LoadState::Failed(_)));
    }

    #[test]
    fn fetch_failure_can_notify() {
        let mut notices = Vec::new();
        let mut list = GastoList::default().with_fetch_error_notices(true);
        list.apply(
            ListEvent::Fetched(Err(ApiError::Server("boom".to_string()))),
            &mut notices,
        );
        assert_eq!(notices, [Notice::error(MSG_FETCH_FAILED)]);
    }

    #[test]
    fn filter_resets_page_and_restores() {
        let mut list = GastoList::new(TableState::new(2));
        list.apply(
            ListEvent::Fetched(Ok((1..=5).map(|id| gasto(id, "Viáticos")).collect())),
            &mut Vec::new(),
        );
        list.next_page();
        assert_eq!(list.table().page(), 1);

        list.apply_filter("viát");
        assert_eq!(list.table().page(), 0);
        assert_eq!(list.visible().matched, 5);

        list.apply_filter("combustible");
        assert_eq!(list.visible().matched, 0);

        list.apply_filter("");
        assert_eq!(list.visible().matched, 5);
    }

    #[test]
    fn edit_updated_refetches_and_notifies() {
        let mut list = loaded(vec![gasto(1, "a")]);
        let mut notices = Vec::new();
        let cmd = list.edit_closed(EditResult::Updated, &mut notices);
        assert_eq!(cmd, Some(Command::FetchAll));
        assert_eq!(notices[0].message, MSG_UPDATED);
        assert_eq!(list.load_state(), &LoadState::Loading);
    }

    #[test]
    fn edit_cancelled_does_nothing() {
        let mut list = loaded(vec![gasto(1, "a")]);
        let mut notices = Vec::new();
        assert_eq!(list.edit_closed(EditResult::Cancelled, &mut notices), None);
        assert!(notices.is_empty());
        assert_eq!(list.load_state(), &LoadState::Loaded);
    }

    #[test]
    fn edit_opens_prepopulated_form() {
        let list = loaded(vec![gasto(4, "Hospedaje")]);
        let record = list.get(4).cloned().unwrap();
        match list.edit(&record) {
            Dialog::EditGasto { gasto, options } => {
                assert_eq!(gasto, record);
                assert_eq!(options, DialogOptions::EDIT);
            }
            other => panic!("unexpected dialog {other:?}"),
        }
    }

    #[test]
    fn delete_confirmation_flow() {
        let mut list = loaded(vec![gasto(1, "a"), gasto(2, "b"), gasto(3, "c")]);
        assert!(matches!(
            list.request_delete(2),
            Dialog::ConfirmDelete { id: 2, message: DELETE_CONFIRM_MESSAGE, .. }
        ));
        assert_eq!(list.delete_closed(2, ConfirmResult::Cancelled), None);
        assert_eq!(
            list.delete_closed(2, ConfirmResult::Confirmed),
            Some(Command::Delete(2))
        );

        let mut notices = Vec::new();
        list.apply(ListEvent::Deleted { id: 2, result: Ok(()) }, &mut notices);
        assert_eq!(
            list.items().iter().map(|g| g.id).collect::<Vec<_>>(),
            [1, 3]
        );
        assert_eq!(notices, [Notice::success(MSG_DELETED)]);
    }

    #[test]
    fn failed_delete_keeps_collection() {
        let mut list = loaded(vec![gasto(1, "a"), gasto(2, "b")]);
        let before = list.items().to_vec();
        let mut notices = Vec::new();
        list.apply(
            ListEvent::Deleted {
                id: 1,
                result: Err(ApiError::NotFound),
            },
            &mut notices,
        );
        assert_eq!(list.items(), before.as_slice());
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, MSG_DELETE_FAILED);
    }

    #[test]
    fn delete_all_requires_exact_keyword() {
        let list = loaded(vec![gasto(1, "a")]);
        let mut notices = Vec::new();

        assert_eq!(
            list.delete_all_closed(DeleteAllResult::from_input("eliminar"), &mut notices),
            None
        );
        assert_eq!(notices, [Notice::error(MSG_WRONG_KEYWORD)]);

        notices.clear();
        assert_eq!(
            list.delete_all_closed(DeleteAllResult::Cancelled, &mut notices),
            None
        );
        assert!(notices.is_empty());

        assert_eq!(
            list.delete_all_closed(DeleteAllResult::from_input("ELIMINAR"), &mut notices),
            Some(Command::DeleteAll)
        );
        assert!(notices.is_empty());
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn delete_all_outcomes() {
        let mut list = loaded(vec![gasto(1, "a"), gasto(2, "b")]);
        let mut notices = Vec::new();
        list.apply(
            ListEvent::DeletedAll(Err(ApiError::Server("locked".to_string()))),
            &mut notices,
        );
        assert_eq!(list.items().len(), 2);
        assert_eq!(notices, [Notice::error(MSG_DELETE_ALL_FAILED)]);

        notices.clear();
        list.apply(ListEvent::DeletedAll(Ok(())), &mut notices);
        assert!(list.items().is_empty());
        assert!(list.is_empty_state());
        assert_eq!(notices, [Notice::success(MSG_DELETED_ALL)]);
    }

    #[test]
    fn delete_on_last_page_moves_back() {
        let mut list = GastoList::new(TableState::new(2));
        list.apply(
            ListEvent::Fetched(Ok((1..=3).map(|id| gasto(id, "x")).collect())),
            &mut Vec::new(),
        );
        list.next_page();
        assert_eq!(list.table().page(), 1);
        list.apply(ListEvent::Deleted { id: 3, result: Ok(()) }, &mut Vec::new());
        assert_eq!(list.table().page(), 0);
        assert_eq!(list.visible().rows.len(), 2);
    }
}
