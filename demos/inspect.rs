use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use og_inspector::{
    log_error_card, log_report_card, setup_logging, AnalysisReport, FetcherConfig, Fetcher,
    LogConfig, MetaAnalyzer, PlatformPreview, Severity,
};
use std::error::Error;
use std::time::Duration;

/// Inspect the social and SEO metadata of one or more pages.
#[derive(Parser, Debug)]
#[command(name = "inspect")]
struct Args {
    /// URLs or bare domains to analyze
    #[arg(required = true)]
    urls: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 8)]
    timeout: u64,

    /// Race the public CORS relays instead of fetching directly
    #[arg(long)]
    via_proxies: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also write logs to ./logs
    #[arg(long)]
    log_file: bool,
}

fn print_report(report: &AnalysisReport) {
    println!("\n{}", report.final_url.bold().blue());
    println!("{}", "-".repeat(report.final_url.len()).blue());

    let show = |label: &str, value: Option<&str>| {
        println!("{:>16}: {}", label.bold(), value.unwrap_or("-"));
    };
    show("title", report.meta.title.as_deref());
    show("description", report.meta.description.as_deref());
    show("og:title", report.open_graph.title.as_deref());
    show("og:image", report.open_graph.image.as_deref());
    show("twitter:card", report.twitter.card.as_deref());
    show("canonical", report.meta.canonical.as_deref());
    if report.technical.has_structured_data {
        println!(
            "{:>16}: {}",
            "JSON-LD".bold(),
            report.technical.structured_data_types.join(", ")
        );
    }

    println!("\n{}", "Previews".bold());
    for preview in PlatformPreview::all(report) {
        println!(
            "  {:<12} {} | {} ({}x{})",
            preview.config.name,
            preview.title,
            preview.site_name,
            preview.config.max_width,
            preview.config.max_height
        );
    }

    if report.findings.is_empty() {
        println!("\n{}", "No issues found".green());
        return;
    }

    println!("\n{}", "Suggestions".bold());
    for finding in &report.findings {
        let label = match finding.severity {
            Severity::Missing => finding.severity.to_string().red(),
            Severity::Suboptimal => finding.severity.to_string().yellow(),
            Severity::Info => finding.severity.to_string().cyan(),
        };
        println!("  [{}] {}: {}", label, finding.tag.bold(), finding.message);
        println!("      {}", finding.impact.dimmed());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    setup_logging(LogConfig {
        log_level: "warn".into(),
        file_output: args.log_file,
        ..LogConfig::default()
    })?;

    let mut config = FetcherConfig::default().with_timeout(Duration::from_secs(args.timeout));
    if args.via_proxies {
        config = config.with_cors_proxies();
    }
    let analyzer = MetaAnalyzer::with_fetcher(Fetcher::new_with_config(config)?);

    let pb = ProgressBar::new(args.urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    for url in &args.urls {
        let result = analyzer.analyze(url).await;
        pb.inc(1);

        match result {
            Ok(report) => {
                log_report_card(&report);
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_report(&report);
                }
            }
            Err(e) => {
                e.log();
                log_error_card(url, &e);
                eprintln!("{}: {} - {}", "Error".bold().red(), url, e.user_message());
            }
        }
    }

    pb.finish_with_message("done");
    Ok(())
}
