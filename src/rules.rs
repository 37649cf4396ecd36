use std::{fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{conditions::Condition, prelude::*};

/// Named automation rules, usually loaded from a TOML file with `[[rule]]` tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default, rename = "rule")]
    pub rules: Vec<Rule>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,

    #[serde(flatten)]
    pub condition: Condition,
}

impl Rules {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let rules: Self = fs::read_to_string(path).context("failed to read the rules")?.parse()?;
        info!(n_rules = rules.rules.len(), "loaded");
        Ok(rules)
    }
}

impl FromStr for Rules {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to parse the rules")
    }
}
