mod cli;
mod tables;

use clap::{Parser, crate_version};
use fennec_triggers::{
    conditions::{Context, TracingSink},
    core::{series::read_series, snapshot::PriceSnapshot},
    prelude::*,
    rules::Rules,
};

use crate::{
    cli::{Args, CheckArgs, Command, ShowArgs},
    tables::build_slots_table,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Check(args) => check(&args)?,
        Command::Show(args) => show(&args)?,
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all)]
fn check(args: &CheckArgs) -> Result {
    let series = read_series(&args.prices.path)?;
    let rules = Rules::read(&args.rules_path)?;
    let now = args.now.now();
    let snapshot = PriceSnapshot::try_new(&series, &now)?;
    let context = Context::new(&series, &snapshot, now);

    for rule in &rules.rules {
        let is_met = rule.condition.evaluate(&TracingSink, &context);
        info!(rule = %rule.name, is_met, "evaluated");
        println!("{}: {is_met}", rule.name);
    }
    Ok(())
}

#[instrument(skip_all)]
fn show(args: &ShowArgs) -> Result {
    let series = read_series(&args.prices.path)?;
    let now = args.now.now();
    let snapshot = PriceSnapshot::try_new(&series, &now)?;
    info!(
        lowest = %snapshot.lowest_today.total,
        highest = %snapshot.highest_today.total,
        "today",
    );
    println!("{}", build_slots_table(&snapshot.today, snapshot.latest.as_ref(), &now.timezone()));
    Ok(())
}
