use engine::{ConfirmResult, DeleteAllResult, Dialog, DialogOptions, GastoForm, GastoId};

use crate::ui::keymap::AppAction;

/// The dialog currently open over the table.
#[derive(Debug)]
pub enum Modal {
    Edit(EditModal),
    ConfirmDelete {
        id: GastoId,
        message: &'static str,
        options: DialogOptions,
    },
    ConfirmDeleteAll {
        keyword: &'static str,
        input: String,
        options: DialogOptions,
    },
}

#[derive(Debug)]
pub struct EditModal {
    pub form: GastoForm,
    pub options: DialogOptions,
    pub error: Option<String>,
    /// A save is in flight; input is ignored until it completes.
    pub saving: bool,
}

impl From<Dialog> for Modal {
    fn from(dialog: Dialog) -> Self {
        match dialog {
            Dialog::EditGasto { gasto, options } => Self::Edit(EditModal {
                form: GastoForm::from_gasto(&gasto),
                options,
                error: None,
                saving: false,
            }),
            Dialog::ConfirmDelete {
                id,
                message,
                options,
            } => Self::ConfirmDelete {
                id,
                message,
                options,
            },
            Dialog::ConfirmDeleteAll { keyword, options } => Self::ConfirmDeleteAll {
                keyword,
                input: String::new(),
                options,
            },
        }
    }
}

/// Result of a key press inside a confirmation dialog, `None` while open.
pub fn confirm_key(action: AppAction) -> Option<ConfirmResult> {
    match action {
        AppAction::Submit | AppAction::Input('y' | 'Y' | 's' | 'S') => {
            Some(ConfirmResult::Confirmed)
        }
        AppAction::Cancel | AppAction::Input('n' | 'N') => Some(ConfirmResult::Cancelled),
        _ => None,
    }
}

/// Edits the phrase of the delete-all dialog, returns the result once closed.
pub fn delete_all_key(input: &mut String, action: AppAction) -> Option<DeleteAllResult> {
    match action {
        AppAction::Input(ch) => {
            input.push(ch);
            None
        }
        AppAction::Backspace => {
            input.pop();
            None
        }
        AppAction::Submit => Some(DeleteAllResult::from_input(std::mem::take(input))),
        AppAction::Cancel => Some(DeleteAllResult::Cancelled),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{DELETE_ALL_KEYWORD, Gasto};

    #[test]
    fn dialogs_become_modals() {
        let gasto = Gasto {
            id: 9,
            concepto: "Movilidad".to_string(),
            ..Gasto::default()
        };
        let Modal::Edit(edit) = Modal::from(Dialog::EditGasto {
            gasto,
            options: DialogOptions::EDIT,
        }) else {
            panic!("expected edit modal");
        };
        assert_eq!(edit.form.id(), 9);
        assert!(!edit.saving);

        let modal = Modal::from(Dialog::ConfirmDeleteAll {
            keyword: DELETE_ALL_KEYWORD,
            options: DialogOptions::CONFIRM_DELETE_ALL,
        });
        assert!(matches!(modal, Modal::ConfirmDeleteAll { ref input, .. } if input.is_empty()));
    }

    #[test]
    fn confirm_keys() {
        assert_eq!(confirm_key(AppAction::Submit), Some(ConfirmResult::Confirmed));
        assert_eq!(confirm_key(AppAction::Input('s')), Some(ConfirmResult::Confirmed));
        assert_eq!(confirm_key(AppAction::Cancel), Some(ConfirmResult::Cancelled));
        assert_eq!(confirm_key(AppAction::Input('x')), None);
    }

    #[test]
    fn delete_all_typing() {
        let mut input = String::new();
        for ch in "ELIMINARR".chars() {
            assert_eq!(delete_all_key(&mut input, AppAction::Input(ch)), None);
        }
        delete_all_key(&mut input, AppAction::Backspace);
        assert_eq!(
            delete_all_key(&mut input, AppAction::Submit),
            Some(DeleteAllResult::Confirmed("ELIMINAR".to_string()))
        );
        assert!(input.is_empty());
        assert_eq!(
            delete_all_key(&mut input, AppAction::Submit),
            Some(DeleteAllResult::Cancelled)
        );
    }
}
