pub mod audit;
pub mod cli;
pub mod config;
pub mod errors;
pub mod session;
pub mod shell;
pub mod vault;
