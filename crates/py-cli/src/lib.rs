pub mod args;
pub mod commands;
pub mod trace_init;
