//! Client stack and configuration types shared by the library and the CLI

pub mod clients;
pub mod config;
