use revdiff_detect::ChangeDetector;

use super::PairArgs;
use crate::error::Result;

pub(crate) fn run(args: &PairArgs) -> Result<()> {
    let (old, new) = args.load()?;

    let report = ChangeDetector::generate_change_report(&old, &new);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
