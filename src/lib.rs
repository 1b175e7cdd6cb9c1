// src/lib.rs — Library root for workbot

pub mod cli;
pub mod core;
pub mod infra;
pub mod integrations;
