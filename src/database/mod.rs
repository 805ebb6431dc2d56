//! Local persistence layer.
//!
//! A single SQLite file holds the key-value table every store writes to.
//!
//! # Usage
//!
//! ```no_run
//! use collegefinder::database::Database;
//!
//! let db = Database::open("collegefinder.db").expect("failed to open database");
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
