// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run configuration.
//!
//! Callers pass string flags (`"mnp"`, `"cnp"`); they are validated once, here,
//! and the search only ever sees the resulting [`Config`].

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Result, SearchError};

/// One recognised configuration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
pub enum ConfigFlag {
    /// Only minimally non-polar objects are wanted.
    #[strum(serialize = "mnp")]
    MinimalRequired,
    /// Only critically non-polar objects are wanted.
    #[strum(serialize = "cnp")]
    CriticalRequired,
}

/// Which optional pruners are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub minimal_required: bool,
    pub critical_required: bool,
}

impl Config {
    /// Build a config from string flags, rejecting unknown ones.
    ///
    /// Repeated flags are harmless.
    pub fn from_flags<I, S>(flags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();
        for flag in flags {
            let flag = flag.as_ref();
            let parsed = ConfigFlag::from_str(flag)
                .map_err(|_| SearchError::UnknownConfigFlag(flag.to_string()))?;
            config.set(parsed);
        }
        Ok(config)
    }

    pub fn set(&mut self, flag: ConfigFlag) {
        match flag {
            ConfigFlag::MinimalRequired => self.minimal_required = true,
            ConfigFlag::CriticalRequired => self.critical_required = true,
        }
    }

    pub fn has(&self, flag: ConfigFlag) -> bool {
        match flag {
            ConfigFlag::MinimalRequired => self.minimal_required,
            ConfigFlag::CriticalRequired => self.critical_required,
        }
    }

    /// The active flags, in declaration order.
    pub fn flags(&self) -> Vec<ConfigFlag> {
        ConfigFlag::iter().filter(|flag| self.has(*flag)).collect()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.flags().iter().map(ToString::to_string).collect();
        write!(f, "{}", names.join(","))
    }
}

/// Parses the comma separated form produced by `Display`.
impl FromStr for Config {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        Config::from_flags(s.split(',').map(str::trim).filter(|flag| !flag.is_empty()))
    }
}
