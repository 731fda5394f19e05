use std::path::PathBuf;
use std::time::Duration;

use comfy_table::Cell;
use serde::Serialize;

use super::format::{create_styled_table, header_cell};

/// Resolved settings shown by `chatline status`
#[derive(Debug, Serialize)]
pub(crate) struct StatusReport {
    pub(crate) user: Option<String>,
    pub(crate) peer: String,
    pub(crate) endpoint: String,
    #[serde(serialize_with = "timeout_secs")]
    pub(crate) timeout: Option<Duration>,
    pub(crate) greeting: Option<String>,
    pub(crate) time_style: &'static str,
    pub(crate) timezone: String,
    pub(crate) config_file: Option<PathBuf>,
    pub(crate) store_file: PathBuf,
    pub(crate) log_file: Option<PathBuf>,
}

fn timeout_secs<S: serde::Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => s.serialize_some(&d.as_secs()),
        None => s.serialize_none(),
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

impl StatusReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Display name", or_dash(self.user.clone())),
            ("Peer", self.peer.clone()),
            ("Endpoint", self.endpoint.clone()),
            (
                "Timeout",
                self.timeout
                    .map(|d| format!("{}s", d.as_secs()))
                    .unwrap_or_else(|| "none".to_string()),
            ),
            ("Greeting", or_dash(self.greeting.clone())),
            ("Time style", self.time_style.to_string()),
            ("Timezone", self.timezone.clone()),
            (
                "Config file",
                or_dash(self.config_file.as_ref().map(|p| p.display().to_string())),
            ),
            ("Store file", self.store_file.display().to_string()),
            (
                "Log file",
                or_dash(self.log_file.as_ref().map(|p| p.display().to_string())),
            ),
        ]
    }
}

pub(crate) fn print_status_table(report: &StatusReport, use_color: bool) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Setting", use_color),
        header_cell("Value", use_color),
    ]);
    for (key, value) in report.rows() {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    println!("{table}");
}

pub(crate) fn output_status_json(report: &StatusReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {}", e);
        "{}".to_string()
    })
}
