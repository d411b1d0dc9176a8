pub mod parser;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use parser::{get_inventory_data, InventoryCollector, InventoryError};
pub use types::key_values::KeyValuesMap;
pub use types::output::{InventoryReport, OutputFormat};
