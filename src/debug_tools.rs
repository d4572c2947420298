#[macro_use]
mod debug_log;
