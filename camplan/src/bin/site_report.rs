//! Site report generator
//!
//! Loads a site plan JSON file, runs the DORI, coverage and sizing engines
//! and prints either an aligned text summary or the full report as JSON.

use camplan::shared_args::PlanArgs;
use camplan::SiteReport;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "Site Report",
    about = "Coverage, DORI and recording infrastructure report for a camera site plan",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    plan: PlanArgs,

    /// Print the report as JSON instead of a text table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let plan = args.plan.load()?;
    log::info!(
        "Loaded {} with {} cameras",
        args.plan.plan.display(),
        plan.cameras.len()
    );

    let report = SiteReport::build(&plan)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
