pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, TimeStyle};
pub(crate) use commands::Action;
