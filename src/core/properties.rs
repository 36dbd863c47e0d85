//! Build property dumps.
//!
//! `arduino-cli compile --show-properties` prints the fully expanded build
//! properties of a board as `key=value` lines. [`BuildPropertySet`] is the
//! parsed form of that dump.

use std::collections::HashMap;

/// Property keys the configuration engine reads.
pub mod keys {
    /// Root directory of the installed platform package.
    pub const PLATFORM_PATH: &str = "runtime.platform.path";
    /// Explicit path to the core sources.
    pub const CORE_PATH: &str = "build.core.path";
    /// Core directory name under `<platform>/cores`.
    pub const CORE: &str = "build.core";
    /// Explicit path to the board variant sources.
    pub const VARIANT_PATH: &str = "build.variant.path";
    /// Variant directory name under `<platform>/variants`.
    pub const VARIANT: &str = "build.variant";
    /// Directory holding the compiler binaries (usually ends in `bin/`).
    pub const COMPILER_PATH: &str = "compiler.path";
    /// C++ compiler driver command name.
    pub const COMPILER_CPP_CMD: &str = "compiler.cpp.cmd";
    /// Target architecture (`avr`, `samd`, `esp32`, ...).
    pub const ARCH: &str = "build.arch";
    /// Target MCU identifier.
    pub const MCU: &str = "build.mcu";
    /// Board identifier used for the `ARDUINO_<board>` define.
    pub const BOARD: &str = "build.board";
    /// CPU clock frequency.
    pub const F_CPU: &str = "build.f_cpu";
}

/// A flat set of build properties, in dump order.
///
/// Duplicate keys keep the position of their first occurrence and the value
/// of their last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPropertySet {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl BuildPropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        BuildPropertySet::default()
    }

    /// Parse a raw property dump.
    ///
    /// Each line is split at the first `=`. Lines without `=`, or with an
    /// empty key, are skipped. Keys and values are trimmed.
    pub fn parse(text: &str) -> Self {
        let mut props = BuildPropertySet::new();

        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            props.insert(key, value.trim());
        }

        props
    }

    /// Insert or overwrite a property.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Get a property value, which may be empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_str())
    }

    /// Get a property value, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in dump order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BuildPropertySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = BuildPropertySet::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}
