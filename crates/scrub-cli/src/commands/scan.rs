use anyhow::Result;
use scrub_config::Config;
use scrub_core::{PathFilter, Planner, ScanOptions, TermSet, scan};
use scrub_sources::{ExportFileSource, GitLogSource, HistorySource};
use tracing::info;

use crate::cli::{OutputFormat, ScanArgs};

pub async fn handle(args: ScanArgs, config: &Config) -> Result<()> {
    // Resolve terms before touching git so a usage error never runs the export
    let terms = TermSet::resolve(args.map_file.as_deref(), &args.lookup)?;

    let options = ScanOptions {
        case_insensitive: args.case_insensitive || config.case_insensitive,
        ignore: PathFilter::new(config.ignore.patterns.clone()),
    };

    let source = history_source(&args, config);
    info!("Reading history from {}", source.describe());
    let export = source.export().await?;

    let planner = Planner::new(&config.rewrite_tool);
    let report = scan(&export, &terms, &options, &args.repo, &planner);

    match args.format {
        OutputFormat::Text => {
            if report.plan.is_empty() {
                info!("No matches found");
            }
            print!("{}", report.plan);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.plan)?);
        }
    }

    Ok(())
}

fn history_source(args: &ScanArgs, config: &Config) -> Box<dyn HistorySource> {
    match &args.from_file {
        Some(path) => Box::new(ExportFileSource::new(path)),
        None => Box::new(
            GitLogSource::new(&args.repo)
                .with_binary(&config.git.binary)
                .with_args(config.git.args.clone()),
        ),
    }
}
