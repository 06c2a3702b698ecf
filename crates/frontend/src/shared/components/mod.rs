pub mod date_range_picker;
pub mod pagination_controls;
pub mod ui;
