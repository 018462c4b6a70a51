//! Menuboard applications: configuration, the CLI commands, the public
//! page template and the HTTP server.

pub mod commands;
pub mod config;
pub mod page;
pub mod server;
