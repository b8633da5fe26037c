pub mod app;
pub mod dialogs;
pub mod draw;
pub mod editor;
pub mod settings_tab;
pub mod theme;
