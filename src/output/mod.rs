mod format;
mod json;
mod status;
mod thread;

pub(crate) use json::output_thread_json;
pub(crate) use status::{StatusReport, output_status_json, print_status_table};
pub(crate) use thread::{ThreadView, ViewOptions, rows};
