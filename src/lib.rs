pub mod advisor;
pub mod common;
pub mod config;
pub mod costs;
pub mod cropdata;
pub mod farm;
pub mod layout;
pub mod weather;

pub mod database;
pub mod server;
pub mod services;
