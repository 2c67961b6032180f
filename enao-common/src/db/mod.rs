//! SQLite snapshot store

mod init;

pub use init::{connect_readonly, init_database};
