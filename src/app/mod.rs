pub mod config;
pub mod controllers;
pub mod events;
pub mod inputs;
pub mod keys;
pub mod requests;
pub mod router;
pub mod session;
pub mod state;

pub mod cli;
pub use state::*;
