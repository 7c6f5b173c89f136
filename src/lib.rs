pub mod account;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod page;
pub mod wallet;
