//! Dialogs the controller asks its host to open, and their typed results.
use api_types::gasto::{Gasto, GastoId};

/// Phrase the user must type to delete every record.
pub const DELETE_ALL_KEYWORD: &str = "ELIMINAR";
pub const DELETE_CONFIRM_MESSAGE: &str = "¿Estás seguro de que deseas eliminar este gasto?";

/// Presentation hints for the dialog host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogOptions {
    pub width: u16,
    /// Percentage of the available height.
    pub max_height: Option<u16>,
    pub panel_class: Option<&'static str>,
    /// The content scrolls inside the dialog instead of growing it.
    pub scrollable: bool,
}

impl DialogOptions {
    pub const EDIT: Self = Self {
        width: 1000,
        max_height: Some(90),
        panel_class: Some("gasto-form-dialog"),
        scrollable: true,
    };

    pub const CONFIRM_DELETE: Self = Self {
        width: 350,
        max_height: None,
        panel_class: None,
        scrollable: false,
    };

    pub const CONFIRM_DELETE_ALL: Self = Self {
        width: 400,
        max_height: None,
        panel_class: None,
        scrollable: false,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub enum Dialog {
    /// Edit form pre-populated with `gasto`.
    EditGasto {
        gasto: Gasto,
        options: DialogOptions,
    },
    ConfirmDelete {
        id: GastoId,
        message: &'static str,
        options: DialogOptions,
    },
    ConfirmDeleteAll {
        keyword: &'static str,
        options: DialogOptions,
    },
}

impl Dialog {
    pub fn options(&self) -> DialogOptions {
        match self {
            Self::EditGasto { options, .. }
            | Self::ConfirmDelete { options, .. }
            | Self::ConfirmDeleteAll { options, .. } => *options,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditResult {
    /// The form saved the record.
    Updated,
    /// Closed without saving, including backdrop or escape.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteAllResult {
    /// The dialog was submitted with this phrase.
    Confirmed(String),
    Cancelled,
}

impl DeleteAllResult {
    /// Submitting an empty phrase counts as cancelling.
    pub fn from_input(input: impl Into<String>) -> Self {
        let input = input.into();
        if input.is_empty() {
            Self::Cancelled
        } else {
            Self::Confirmed(input)
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::Confirmed(phrase) if phrase == DELETE_ALL_KEYWORD)
    }
}
