// Shared type definitions
// Each submodule defines types used across stores, services and the RPC layer.

pub mod college;
pub mod config;
pub mod deadline;
pub mod errors;
pub mod favorite;
pub mod history;
pub mod preferences;
pub mod review;
pub mod search;
