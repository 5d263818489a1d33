//! Part codec - one workout segment, including nested repeat blocks
//!
//! # Record Format
//!
//! ```text
//! flags_a: u8
//!   bit 0 = title, bit 1 = layout, bit 2 = layout_values,
//!   bit 3 = goal_type, bit 4 = goal_value, bit 5 = goal_is_variable,
//!   bit 6 = target_type, bit 7 = target_min
//! flags_b: u8
//!   bit 0 = target_max, bit 1 = repeats, bit 2 = repeat_parts
//!
//! [if title]          code: u8 (0 = custom, followed by text)
//! [if layout]         code: u8
//! [if layout_values]  count: u8, codes: [u8; count]
//! [if goal_type]      code: u8
//! [if goal_value]     f64 (BE)
//! [if target_type]    code: u8
//! [if target_min]     f64 (BE)
//! [if target_max]     f64 (BE)
//! [if repeats]        u8
//! [if repeat_parts]   count: u8, parts: [Part; count]
//! ```
//!
//! `goal_is_variable` has no payload: the flag bit is the value. A part has no
//! length prefix of its own; the enclosing count bounds how many are read.


use serde::{Deserialize, Deserializer, Serialize};
use std::io::Cursor;

use crate::MAX_NESTING_DEPTH;
use crate::error::LubbaError;
use crate::io::{
    read_f64, read_u8, read_var_string, write_count, write_f64, write_u8, write_var_string,
};
use crate::symbols::{LAYOUTS, PART_TITLES, SymbolTable, VALUE_KINDS};

// flags_a
const HAS_TITLE: u8 = 1 << 0;
const HAS_LAYOUT: u8 = 1 << 1;
const HAS_LAYOUT_VALUES: u8 = 1 << 2;
const HAS_GOAL_TYPE: u8 = 1 << 3;
const HAS_GOAL_VALUE: u8 = 1 << 4;
const GOAL_IS_VARIABLE: u8 = 1 << 5;
const HAS_TARGET_TYPE: u8 = 1 << 6;
const HAS_TARGET_MIN: u8 = 1 << 7;

// flags_b
const HAS_TARGET_MAX: u8 = 1 << 0;
const HAS_REPEATS: u8 = 1 << 1;
const HAS_REPEAT_PARTS: u8 = 1 << 2;

/// Title code marking a custom title stored inline
const CUSTOM_TITLE: u8 = 0;

/// One timed or targeted segment of a workout
///
/// Every field is optional. String fields other than `title` must be symbols
/// from their table (see [`crate::symbols`]); `title` falls back to inline
/// text when it is not a known title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Layout shape, e.g. `"2+1"`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "symbol_or_number"
    )]
    pub layout: Option<String>,

    /// Value kinds shown in the layout, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_value: Option<f64>,

    /// Only `Some(true)` is encoded; decoding never yields `Some(false)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_is_variable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_max: Option<f64>,

    /// Repeat count for `repeat_parts`; zero is treated as absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeats: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_parts: Option<Vec<Part>>,
}

impl Part {
    /// Create a part with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    fn layout_values(&self) -> Option<&[String]> {
        self.layout_values.as_deref().filter(|v| !v.is_empty())
    }

    fn repeats(&self) -> Option<u8> {
        self.repeats.filter(|&r| r > 0)
    }

    fn repeat_parts(&self) -> Option<&[Part]> {
        self.repeat_parts.as_deref().filter(|p| !p.is_empty())
    }

    /// Presence bits for the two flag bytes
    fn flags(&self) -> (u8, u8) {
        let mut flags_a = 0u8;
        if self.title.is_some() {
            flags_a |= HAS_TITLE;
        }
        if self.layout.is_some() {
            flags_a |= HAS_LAYOUT;
        }
        if self.layout_values().is_some() {
            flags_a |= HAS_LAYOUT_VALUES;
        }
        if self.goal_type.is_some() {
            flags_a |= HAS_GOAL_TYPE;
        }
        if self.goal_value.is_some() {
            flags_a |= HAS_GOAL_VALUE;
        }
        if self.goal_is_variable == Some(true) {
            flags_a |= GOAL_IS_VARIABLE;
        }
        if self.target_type.is_some() {
            flags_a |= HAS_TARGET_TYPE;
        }
        if self.target_min.is_some() {
            flags_a |= HAS_TARGET_MIN;
        }

        let mut flags_b = 0u8;
        if self.target_max.is_some() {
            flags_b |= HAS_TARGET_MAX;
        }
        if self.repeats().is_some() {
            flags_b |= HAS_REPEATS;
        }
        if self.repeat_parts().is_some() {
            flags_b |= HAS_REPEAT_PARTS;
        }

        (flags_a, flags_b)
    }
}

/// Accept a layout written as a bare number (`layout: 1`) as well as a string
fn symbol_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SymbolOrNumber {
        Symbol(String),
        Number(u64),
    }

    Ok(
        Option::<SymbolOrNumber>::deserialize(deserializer)?.map(|value| match value {
            SymbolOrNumber::Symbol(s) => s,
            SymbolOrNumber::Number(n) => n.to_string(),
        }),
    )
}

/// Encode a part (and its repeat parts) onto the end of `output`
///
/// # Errors
/// * `UnknownSymbol` - a layout or value-kind string is not in its table
/// * `TooManyEntries` - `layout_values` or `repeat_parts` exceeds 255 entries
/// * `NestingTooDeep` - repeat parts nest deeper than [`MAX_NESTING_DEPTH`]
///
/// On error `output` may hold a partial record and should be discarded.
pub fn encode_part(part: &Part, output: &mut Vec<u8>) -> Result<(), LubbaError> {
    write_part(part, output, 0)
}

/// Decode one part at the cursor, advancing past it
///
/// # Errors
/// * `UnexpectedEof` - the record is truncated
/// * `UnknownCode` - a symbol code is not in its table
/// * `NestingTooDeep` - repeat parts nest deeper than [`MAX_NESTING_DEPTH`]
pub fn decode_part(cursor: &mut Cursor<&[u8]>) -> Result<Part, LubbaError> {
    read_part(cursor, 0)
}

fn write_part(part: &Part, output: &mut Vec<u8>, depth: usize) -> Result<(), LubbaError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(LubbaError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    let (flags_a, flags_b) = part.flags();
    write_u8(output, flags_a);
    write_u8(output, flags_b);

    if let Some(ref title) = part.title {
        match PART_TITLES.code(title) {
            Some(code) => write_u8(output, code),
            None => {
                write_u8(output, CUSTOM_TITLE);
                write_var_string(output, title);
            }
        }
    }

    if let Some(ref layout) = part.layout {
        write_u8(output, LAYOUTS.encode(layout)?);
    }

    if let Some(values) = part.layout_values() {
        write_count(output, "layout values", values.len())?;
        for value in values {
            write_u8(output, VALUE_KINDS.encode(value)?);
        }
    }

    if let Some(ref goal_type) = part.goal_type {
        write_u8(output, VALUE_KINDS.encode(goal_type)?);
    }
    if let Some(goal_value) = part.goal_value {
        write_f64(output, goal_value);
    }

    if let Some(ref target_type) = part.target_type {
        write_u8(output, VALUE_KINDS.encode(target_type)?);
    }
    if let Some(target_min) = part.target_min {
        write_f64(output, target_min);
    }
    if let Some(target_max) = part.target_max {
        write_f64(output, target_max);
    }

    if let Some(repeats) = part.repeats() {
        write_u8(output, repeats);
    }

    if let Some(sub_parts) = part.repeat_parts() {
        write_count(output, "repeat parts", sub_parts.len())?;
        for sub_part in sub_parts {
            write_part(sub_part, output, depth + 1)?;
        }
    }

    Ok(())
}

fn read_part(cursor: &mut Cursor<&[u8]>, depth: usize) -> Result<Part, LubbaError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(LubbaError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    let flags_a = read_u8(cursor)?;
    let flags_b = read_u8(cursor)?;
    if flags_b & !(HAS_TARGET_MAX | HAS_REPEATS | HAS_REPEAT_PARTS) != 0 {
        tracing::trace!("Ignoring reserved part flag bits: {:#04x}", flags_b);
    }

    let mut part = Part::default();

    if flags_a & HAS_TITLE != 0 {
        let code = read_u8(cursor)?;
        part.title = Some(if code == CUSTOM_TITLE {
            read_var_string(cursor)?
        } else {
            PART_TITLES.decode(code)?.to_string()
        });
    }

    if flags_a & HAS_LAYOUT != 0 {
        part.layout = Some(read_symbol(cursor, &LAYOUTS)?);
    }

    if flags_a & HAS_LAYOUT_VALUES != 0 {
        let count = read_u8(cursor)?;
        let mut values = Vec::with_capacity(count as usize);
        for _ in 0..count {
            values.push(read_symbol(cursor, &VALUE_KINDS)?);
        }
        part.layout_values = Some(values);
    }

    if flags_a & HAS_GOAL_TYPE != 0 {
        part.goal_type = Some(read_symbol(cursor, &VALUE_KINDS)?);
    }
    if flags_a & HAS_GOAL_VALUE != 0 {
        part.goal_value = Some(read_f64(cursor)?);
    }
    if flags_a & GOAL_IS_VARIABLE != 0 {
        part.goal_is_variable = Some(true);
    }

    if flags_a & HAS_TARGET_TYPE != 0 {
        part.target_type = Some(read_symbol(cursor, &VALUE_KINDS)?);
    }
    if flags_a & HAS_TARGET_MIN != 0 {
        part.target_min = Some(read_f64(cursor)?);
    }
    if flags_b & HAS_TARGET_MAX != 0 {
        part.target_max = Some(read_f64(cursor)?);
    }

    if flags_b & HAS_REPEATS != 0 {
        part.repeats = Some(read_u8(cursor)?);
    }

    if flags_b & HAS_REPEAT_PARTS != 0 {
        let count = read_u8(cursor)?;
        let mut sub_parts = Vec::with_capacity(count as usize);
        for _ in 0..count {
            sub_parts.push(read_part(cursor, depth + 1)?);
        }
        part.repeat_parts = Some(sub_parts);
    }

    Ok(part)
}

fn read_symbol(cursor: &mut Cursor<&[u8]>, table: &SymbolTable) -> Result<String, LubbaError> {
    let code = read_u8(cursor)?;
    Ok(table.decode(code)?.to_string())
}
