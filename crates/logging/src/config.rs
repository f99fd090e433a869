//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level (0-4).
    ///
    /// Levels above 4 behave like 4.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        if level >= 1 {
            config.info.filter = 1;
            config.info.remove = 1;
            config.info.stats = 1;
        }
        if level >= 2 {
            config.info.enumerate = 1;
            config.info.filter = 2;
            config.debug.filter = 1;
            config.debug.scope = 1;
        }
        if level >= 3 {
            config.debug.ancestor = 1;
            config.debug.enumerate = 1;
            config.debug.filter = 2;
        }
        if level >= 4 {
            config.info.set_all(2);
            config.debug.set_all(3);
        }

        config
    }

    /// Apply a single info flag token (e.g., "filter2", "stats").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        let flag = match name {
            "filter" => InfoFlag::Filter,
            "enum" => InfoFlag::Enum,
            "remove" => InfoFlag::Remove,
            "stats" => InfoFlag::Stats,
            "all" => {
                self.info.set_all(level);
                return Ok(());
            }
            _ => return Err(format!("unknown info flag: {name}")),
        };

        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "ancestor2", "scope").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        let flag = match name {
            "filter" => DebugFlag::Filter,
            "enum" => DebugFlag::Enum,
            "ancestor" => DebugFlag::Ancestor,
            "scope" => DebugFlag::Scope,
            "all" => {
                self.debug.set_all(level);
                return Ok(());
            }
            _ => return Err(format!("unknown debug flag: {name}")),
        };

        self.debug.set(flag, level);
        Ok(())
    }
}

/// Parse a flag token like "filter2" into ("filter", 2) or "scope" into ("scope", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("flag token has no name: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}
