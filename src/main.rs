use anyhow::{Context, Result, bail};
use seocheck::{Analyzer, BatchSummary, analysis::parse_url_list, config::Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: seocheck <url>... | seocheck -f <file>";

fn urls_from_args(args: &[String]) -> Result<Vec<String>> {
    match args {
        [flag, path] if flag == "-f" || flag == "--file" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read url list {path}"))?;
            Ok(parse_url_list(&text))
        }
        [flag, ..] if flag.starts_with('-') => bail!("{USAGE}"),
        urls => Ok(urls.to_vec()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the JSON report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let urls = urls_from_args(&args)?;
    if urls.is_empty() {
        bail!("{USAGE}");
    }

    let config = Config::from_env()?;
    let analyzer = Analyzer::new(config)?;

    info!("Analyzing {} URLs...", urls.len());
    let summary = BatchSummary::from_results(analyzer.analyze_urls(&urls).await);
    info!(
        "Successfully analyzed: {}/{} URLs",
        summary.successful_analyses, summary.total_urls
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
