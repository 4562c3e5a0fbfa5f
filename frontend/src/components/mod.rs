pub mod cards;
pub mod confirm_dialog;
pub mod guard;
pub mod layout;
