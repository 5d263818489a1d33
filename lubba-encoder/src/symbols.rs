//! Symbol tables for enumerated string fields
//!
//! Each table maps a fixed set of string tokens to one-byte codes starting at
//! 1. Code 0 is never assigned; the title field uses it to mark a custom
//! string that follows inline.
//!
//! Code-to-symbol lookups index the symbol list directly. Symbol-to-code
//! lookups go through a hash index built lazily on first access and never
//! mutated afterwards, so tables are safe to share across threads.

use hashbrown::HashMap;
use std::sync::OnceLock;

use crate::error::LubbaError;

/// A fixed bidirectional mapping between string tokens and one-byte codes
#[derive(Debug)]
pub struct SymbolTable {
    name: &'static str,
    /// Symbol for code `i + 1` at index `i`
    symbols: &'static [&'static str],
    index: OnceLock<HashMap<&'static str, u8>>,
}

impl SymbolTable {
    const fn new(name: &'static str, symbols: &'static [&'static str]) -> Self {
        Self {
            name,
            symbols,
            index: OnceLock::new(),
        }
    }

    /// Table name used in error messages
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of symbols in the table
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the table has no symbols
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up the code for a symbol (O(1) via lazy-initialized hash index)
    pub fn code(&self, symbol: &str) -> Option<u8> {
        let index = self.index.get_or_init(|| {
            self.symbols
                .iter()
                .enumerate()
                .map(|(i, &s)| (s, (i + 1) as u8))
                .collect()
        });
        index.get(symbol).copied()
    }

    /// Look up the symbol for a code
    pub fn symbol(&self, code: u8) -> Option<&'static str> {
        let i = usize::from(code).checked_sub(1)?;
        self.symbols.get(i).copied()
    }

    /// Code for a symbol, failing if the table does not contain it
    pub fn encode(&self, symbol: &str) -> Result<u8, LubbaError> {
        self.code(symbol).ok_or_else(|| LubbaError::UnknownSymbol {
            table: self.name,
            symbol: symbol.to_string(),
        })
    }

    /// Symbol for a code, failing if the table does not contain it
    pub fn decode(&self, code: u8) -> Result<&'static str, LubbaError> {
        self.symbol(code).ok_or(LubbaError::UnknownCode {
            table: self.name,
            code,
        })
    }

    /// Iterate `(code, symbol)` pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &'static str)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, &s)| ((i + 1) as u8, s))
    }
}

/// Known part titles. Titles outside this table are encoded inline.
pub static PART_TITLES: SymbolTable = SymbolTable::new(
    "title",
    &[
        "Warmup", "Activity", "Fast", "Recover", "Rest", "Cooldown", "Ski", "Run", "Skate", "Walk",
    ],
);

/// Screen layouts, named by rows of values (`"2+1"` = two on top, one below)
pub static LAYOUTS: SymbolTable =
    SymbolTable::new("layout", &["1", "2+1", "2+2", "2+3", "3+3", "1+1"]);

/// Value kinds shared by goal types, target types and layout values
pub static VALUE_KINDS: SymbolTable = SymbolTable::new(
    "value kind",
    &[
        "duration",
        "distance",
        "distanceTest",
        "paceCurrent",
        "paceTest",
        "paceTest2",
        "paceAverageDuration",
        "bpm",
        "bpmAverageDuration",
        "intervalLeft",
        "durationInterval",
        "distanceInterval",
        "desiredAccuracy",
        "pace",
        "paceSplits",
        "smartDistance",
        "smartDuration",
        "speedCurrent",
        "speedAverageDuration",
        "totalActiveEnergyBurned",
        "activeEnergyBurnedInterval",
        "totalEnergyBurned",
        "energyBurnedInterval",
        "runningPower",
        "runningVerticalOscillation",
        "runningGroundContactTime",
        "rpe",
        "speed",
        "cyclingPower",
    ],
);
