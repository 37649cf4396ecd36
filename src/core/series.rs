use std::{fs, path::Path};

use itertools::Itertools;

use crate::{core::slot::PriceSlot, prelude::*};

/// Read a JSON array of price slots and check that it is strictly chronological.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_series(path: &Path) -> Result<Vec<PriceSlot>> {
    let contents = fs::read_to_string(path).context("failed to read the prices")?;
    let series = parse_series(&contents)?;
    info!(n_slots = series.len(), "loaded");
    Ok(series)
}

pub fn parse_series(json: &str) -> Result<Vec<PriceSlot>> {
    let series: Vec<PriceSlot> = serde_json::from_str(json).context("failed to parse the prices")?;
    if let Some((previous, next)) =
        series.iter().tuple_windows().find(|(previous, next)| previous.starts_at >= next.starts_at)
    {
        bail!(
            "slots must be in ascending order without duplicates: {} is followed by {}",
            previous.starts_at,
            next.starts_at,
        );
    }
    Ok(series)
}
