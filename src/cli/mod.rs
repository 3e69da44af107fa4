pub mod coin_info;
pub mod setup;
pub mod ui;
