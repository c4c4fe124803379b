pub mod confirm;
pub mod edit_form;
pub mod gastos;
