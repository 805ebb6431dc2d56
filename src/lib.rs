//! collegefinder: client core for discovering, comparing and tracking colleges.
//!
//! The library exposes every store and service for the RPC binary and the
//! integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
