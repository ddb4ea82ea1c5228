pub mod header;
pub mod pagination;
pub mod record_form;
pub mod record_list;
pub mod settings_panel;
pub mod sidebar;
pub mod summary_cards;
