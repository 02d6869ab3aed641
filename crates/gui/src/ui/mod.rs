pub mod detail_panel;
pub mod exit_dialog;
pub mod place_list;
pub mod status_bar;
pub mod toolbar;
