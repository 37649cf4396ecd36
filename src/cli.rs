use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use fennec_triggers::core::clock::in_zone_or_default;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate the rules at the given moment.
    Check(CheckArgs),

    /// Show today's prices.
    Show(ShowArgs),
}

#[derive(Parser)]
pub struct PricesArgs {
    /// JSON array of quarter-hourly price slots, spanning at least yesterday, today, and tomorrow.
    #[clap(long = "prices", env = "PRICES_PATH")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct NowArgs {
    /// Evaluate at this moment instead of the current time, for example: `2023-02-01T23:00:00+01:00`.
    #[clap(long, env = "NOW")]
    pub now: Option<DateTime<FixedOffset>>,

    /// IANA time zone which clock times and «today» refer to.
    #[clap(long = "time-zone", env = "TIME_ZONE")]
    pub time_zone: Option<Tz>,
}

impl NowArgs {
    pub fn now(&self) -> DateTime<Tz> {
        match self.now {
            Some(now) => in_zone_or_default(&now, self.time_zone),
            None => in_zone_or_default(&Utc::now(), self.time_zone),
        }
    }
}

#[derive(Parser)]
pub struct CheckArgs {
    #[clap(flatten)]
    pub prices: PricesArgs,

    #[clap(flatten)]
    pub now: NowArgs,

    /// TOML file with `[[rule]]` tables.
    #[clap(long = "rules", env = "RULES_PATH", default_value = "rules.toml")]
    pub rules_path: PathBuf,
}

#[derive(Parser)]
pub struct ShowArgs {
    #[clap(flatten)]
    pub prices: PricesArgs,

    #[clap(flatten)]
    pub now: NowArgs,
}
