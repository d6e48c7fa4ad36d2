use revdiff_compare::ComparisonAggregator;
use revdiff_version::VersioningStrategy;

use super::CompareArgs;
use crate::config::Config;
use crate::error::{CliError, Result};

pub(crate) fn run(args: CompareArgs, config: &Config) -> Result<()> {
    let (old, new) = args.pair.load()?;
    let content = args.content.provider(&old, &new);
    let strategy = VersioningStrategy::from_config(&config.strategy)?;
    let format = args.format.unwrap_or(config.report.format);

    let report = ComparisonAggregator::new()
        .with_strategy(strategy)
        .with_provider(&content)
        .with_diff_options(config.diff.clone())
        .generate_diff_report(&old, &new, format)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &report.content).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            println!("Wrote {format} report to {}", path.display());
        }
        None if report.content.ends_with('\n') => print!("{}", report.content),
        None => println!("{}", report.content),
    }

    Ok(())
}
