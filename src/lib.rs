pub mod api;
pub mod app;
pub mod events;
pub mod logging;
pub mod player;
pub mod ui;
