use revdiff_version::{BumpKind, ComparisonOutcome, Strategy, VersioningStrategy};

use super::VersionCommand;
use crate::config::Config;
use crate::error::{CliError, Result};

pub(crate) fn run(command: VersionCommand, config: &Config) -> Result<()> {
    let strategy = VersioningStrategy::from_config(&config.strategy)?;

    match command {
        VersionCommand::Parse { version } => {
            let metadata = strategy.parse_version(&version)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        VersionCommand::Validate { version } => {
            if !strategy.is_valid_version(&version) {
                return Err(CliError::InvalidVersion {
                    version,
                    strategy: strategy.strategy_name(),
                });
            }
            println!("{version} is a valid {} version", strategy.strategy_name());
        }
        VersionCommand::Compare { a, b } => {
            let comparison = strategy.compare_versions(&a, &b)?;
            let relation = match comparison.result {
                ComparisonOutcome::Greater => format!("{a} > {b}"),
                ComparisonOutcome::Less => format!("{a} < {b}"),
                ComparisonOutcome::Equal => format!("{a} = {b}"),
                ComparisonOutcome::Incompatible => format!("{a} and {b} cannot be ordered"),
            };
            println!("{relation}");
            println!("{}", comparison.explanation);
        }
        VersionCommand::Bump {
            version,
            kind,
            preid,
        } => {
            println!("{}", strategy.bump(&version, kind, preid.as_deref())?);
        }
        VersionCommand::Next { current } => {
            println!("{}", next(&strategy, current.as_deref())?);
        }
    }

    Ok(())
}

fn next(strategy: &VersioningStrategy, current: Option<&str>) -> Result<String> {
    match (strategy, current) {
        (VersioningStrategy::Timestamp(timestamp), _) => Ok(timestamp.current_version()?),
        (_, Some(current)) => Ok(strategy.bump(current, BumpKind::Patch, None)?),
        (_, None) => Err(CliError::MissingVersion {
            strategy: strategy.strategy_name(),
        }),
    }
}
