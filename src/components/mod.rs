pub mod flash;
pub mod hooks;
pub mod nav;
pub mod note_card;
pub mod ui;
