pub mod cli;
pub mod config;
pub mod festival;
pub mod render;
pub mod store;
