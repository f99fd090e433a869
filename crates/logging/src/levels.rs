//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Filter configuration and per-item outcomes.
    Filter,
    /// Source enumeration.
    Enum,
    /// Remove-scope handling.
    Remove,
    /// End-of-pass statistics.
    Stats,
}

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Filter category evaluation.
    Filter,
    /// Enumerator internals.
    Enum,
    /// Ancestor folder materialization.
    Ancestor,
    /// Scope restriction checks.
    Scope,
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Filter outcome level.
    pub filter: u8,
    /// Enumeration level.
    pub enumerate: u8,
    /// Remove-scope level.
    pub remove: u8,
    /// Statistics level.
    pub stats: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Filter => self.filter,
            InfoFlag::Enum => self.enumerate,
            InfoFlag::Remove => self.remove,
            InfoFlag::Stats => self.stats,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Filter => self.filter = level,
            InfoFlag::Enum => self.enumerate = level,
            InfoFlag::Remove => self.remove = level,
            InfoFlag::Stats => self.stats = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.filter = level;
        self.enumerate = level;
        self.remove = level;
        self.stats = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Category evaluation level.
    pub filter: u8,
    /// Enumerator level.
    pub enumerate: u8,
    /// Ancestor materialization level.
    pub ancestor: u8,
    /// Scope restriction level.
    pub scope: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Filter => self.filter,
            DebugFlag::Enum => self.enumerate,
            DebugFlag::Ancestor => self.ancestor,
            DebugFlag::Scope => self.scope,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Filter => self.filter = level,
            DebugFlag::Enum => self.enumerate = level,
            DebugFlag::Ancestor => self.ancestor = level,
            DebugFlag::Scope => self.scope = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.filter = level;
        self.enumerate = level;
        self.ancestor = level;
        self.scope = level;
    }
}
