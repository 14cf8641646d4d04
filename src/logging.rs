use crate::utils::truncate_str;
use crate::AnalysisReport;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: false,
        }
    }
}

pub fn log_report_card(report: &AnalysisReport) {
    const CARD_WIDTH: usize = 80;
    const CONTENT_WIDTH: usize = CARD_WIDTH - 12;

    let field = |value: Option<&str>| truncate_str(value.unwrap_or("N/A"), CONTENT_WIDTH);
    let horizontal_line = "═".repeat(CARD_WIDTH - 2);

    let findings = report
        .findings
        .iter()
        .map(|f| truncate_str(&format!("[{}] {}: {}", f.severity, f.tag, f.message), CONTENT_WIDTH))
        .collect::<Vec<_>>()
        .join("\n  ");

    info!(
        "\n╔{}╗\n\
         URL:      {}\n\
         Final:    {}\n\
         Title:    {}\n\
         og:title: {}\n\
         og:image: {}\n\
         Card:     {}\n\
         JSON-LD:  {}\n\
         Findings: {}\n  {}\n\
         ╚{}╝",
        horizontal_line,
        truncate_str(&report.url, CONTENT_WIDTH),
        truncate_str(&report.final_url, CONTENT_WIDTH),
        field(report.meta.title.as_deref()),
        field(report.open_graph.title.as_deref()),
        field(report.open_graph.image.as_deref()),
        field(report.twitter.card.as_deref()),
        report.technical.structured_data_types.join(", "),
        report.findings.len(),
        findings,
        horizontal_line,
    );
}

pub fn log_error_card<E: Display + std::error::Error>(url: &str, error: &E) {
    const CARD_WIDTH: usize = 70;
    const CONTENT_WIDTH: usize = CARD_WIDTH - 8;

    let top_bottom = "═".repeat(CARD_WIDTH - 2);
    let middle = "─".repeat(CARD_WIDTH - 2);

    let mut error_details = error.to_string();
    if let Some(source) = error.source() {
        error_details = format!("{error_details} (caused by: {source})");
    }

    error!(
        "\n╔═{}═╗\n\
         ║ URL:   {:<width$} ║\n\
         ║{}║\n\
         ║ Error: {:<width$} ║\n\
         ╚═{}═╝",
        top_bottom,
        truncate_str(url, CONTENT_WIDTH),
        middle,
        truncate_str(&error_details, CONTENT_WIDTH),
        top_bottom,
        width = CONTENT_WIDTH
    );
}

/// Installs the global subscriber. `RUST_LOG` overrides `config.log_level`.
pub fn setup_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true);
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir)?;

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "og-inspector.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    debug!("Logging system initialized with config: {:?}", config);
    Ok(())
}
