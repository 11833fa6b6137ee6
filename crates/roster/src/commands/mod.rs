//! Command handlers: bridge CLI args -> controller operations -> output.

pub mod config_cmd;
pub mod users;
