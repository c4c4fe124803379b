//! List controller for expense records (`gastos`).
//!
//! The crate owns everything the gastos table does except drawing it:
//!
//! - [`GastoList`] keeps the collection and routes user actions.
//! - [`visible_rows`] derives the rows on screen from the collection, the
//!   filter, the sort and the page.
//! - [`Dialog`] and its typed results replace free-form modal return values.
//! - [`CommandQueue`] runs backend calls one at a time on a worker task.
//!
//! Hosts provide a [`GastosApi`] implementation and a [`Notifier`].
pub use api::GastosApi;
pub use columns::{Column, SortValue, format_amount};
pub use commands::{Command, CommandQueue, Completion, ListEvent, QueueClosed, execute};
pub use dialog::{
    ConfirmResult, DELETE_ALL_KEYWORD, DELETE_CONFIRM_MESSAGE, DeleteAllResult, Dialog,
    DialogOptions, EditResult,
};
pub use error::{ApiError, FormError};
pub use form::{FormField, GastoForm};
pub use list::{GastoList, LoadState};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use table::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, Sort, SortDirection, TableState, VisibleRows,
    visible_rows,
};

pub use api_types::gasto::{Gasto, GastoId, ViaticoFlag};

mod api;
mod columns;
mod commands;
mod dialog;
mod error;
mod form;
pub mod list;
mod notify;
mod table;
