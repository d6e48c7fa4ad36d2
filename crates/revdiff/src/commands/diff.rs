use revdiff_diff::{DiffOptions, DiffRenderer, render_with};

use super::DiffArgs;
use crate::config::Config;
use crate::error::Result;

pub(crate) fn run(args: DiffArgs, config: &Config) -> Result<()> {
    let (old, new) = args.pair.load()?;
    let content = args.content.provider(&old, &new);
    let options = options(&args, config);

    let report = DiffRenderer::new(&content).generate_diff(&old, &new, &options);

    print!("{}", render_with(&report, &options));
    Ok(())
}

/// Config values with command-line flags laid over them.
fn options(args: &DiffArgs, config: &Config) -> DiffOptions {
    let mut options = config.diff.clone();
    if let Some(layout) = args.layout {
        options.format = layout;
    }
    if let Some(context) = args.context {
        options.context_lines = context;
    }
    if let Some(algorithm) = args.algorithm {
        options.algorithm = algorithm;
    }
    if let Some(width) = args.width {
        options.side_by_side_width = width;
    }
    options
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::commands::{ContentArgs, PairArgs};
    use revdiff_diff::{DiffFormat, HunkAlgorithm};

    fn args() -> DiffArgs {
        DiffArgs {
            pair: PairArgs {
                old: PathBuf::from("old.json"),
                new: PathBuf::from("new.json"),
            },
            content: ContentArgs {
                old_root: None,
                new_root: None,
            },
            layout: None,
            context: None,
            algorithm: None,
            width: None,
        }
    }

    #[test]
    fn config_applies_without_flags() {
        let mut config = Config::default();
        config.diff.context_lines = 7;
        config.diff.algorithm = HunkAlgorithm::Lcs;

        let options = options(&args(), &config);

        assert_eq!(options.context_lines, 7);
        assert_eq!(options.algorithm, HunkAlgorithm::Lcs);
        assert_eq!(options.format, DiffFormat::Unified);
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.diff.context_lines = 7;
        let mut args = args();
        args.context = Some(0);
        args.layout = Some(DiffFormat::SideBySide);
        args.width = Some(100);

        let options = options(&args, &config);

        assert_eq!(options.context_lines, 0);
        assert_eq!(options.format, DiffFormat::SideBySide);
        assert_eq!(options.side_by_side_width, 100);
    }
}
