use anyhow::{Context, Result};
use clap::Parser;
use safestate::{
    Analyzer, BANNER, SystemSnapshot, decode_share_code, encode_share_code, load_snapshot,
    render_report,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Safestate - Deadlock Detection With Step-by-Step Resolution Hints"
)]
struct Cli {
    /// Path to a scenario JSON file, or a share code with --share-code
    scenario: String,

    /// Treat SCENARIO as a share code instead of a file path
    #[arg(long)]
    share_code: bool,

    /// Print the detection result as JSON instead of a report
    #[arg(long, conflicts_with = "export_share")]
    json: bool,

    /// Print the scenario's share code and exit
    #[arg(long)]
    export_share: bool,

    /// Write a JSON-lines trace of the analysis to this file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let snapshot: SystemSnapshot = if cli.share_code {
        decode_share_code(&cli.scenario)?
    } else {
        load_snapshot(&cli.scenario)?
    };

    if cli.export_share {
        println!("{}", encode_share_code(&snapshot)?);
        return Ok(());
    }

    let mut analyzer = Analyzer::new();
    if let Some(log) = &cli.log {
        analyzer = analyzer.with_log(log);
    }
    let result = analyzer.analyze(&snapshot)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{json}");
    } else {
        println!("{BANNER}");
        print!("{}", render_report(&result));
    }

    Ok(())
}
