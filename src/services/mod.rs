// Services
// Storage, configuration and the remote collaborators the managers talk to.

pub mod backend_client;
pub mod config_engine;
pub mod hosted_db;
pub mod local_storage;
pub mod recommendation_service;
pub mod remote;
pub mod suggestion_service;
