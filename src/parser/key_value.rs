use crate::parser::error::InventoryError;
use crate::types::key_values::KeyValuesMap;

pub const DEFAULT_DELIMITER: char = '=';

/// Parse `key<delimiter>value` lines into a new map.
pub fn parse_key_values<S: AsRef<str>>(
    lines: &[S],
    delimiter: char,
) -> Result<KeyValuesMap, InventoryError> {
    let mut map = KeyValuesMap::new();
    add_parse_key_values(&mut map, lines, delimiter)?;
    Ok(map)
}

/// Parse lines and append the results to `base`.
///
/// Lines are split at the first delimiter only, so values may contain it.
/// Valid lines are added even when some lines are invalid; the invalid ones
/// are then reported together in a single `InvalidData` error.
pub fn add_parse_key_values<S: AsRef<str>>(
    base: &mut KeyValuesMap,
    lines: &[S],
    delimiter: char,
) -> Result<(), InventoryError> {
    let mut invalid_items = Vec::new();

    for line in lines {
        let line = line.as_ref();
        match line.split_once(delimiter) {
            Some((key, value)) => base.insert(key, value),
            None => invalid_items.push(line),
        }
    }

    if invalid_items.is_empty() {
        Ok(())
    } else {
        Err(InventoryError::InvalidData {
            items: invalid_items.join(", "),
        })
    }
}
