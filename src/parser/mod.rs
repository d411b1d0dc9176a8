pub mod config;
pub mod error;
pub mod inventory;
pub mod key_value;
pub mod process;

pub use config::CollectorConfig;
pub use error::InventoryError;
pub use inventory::{get_inventory_data, InventoryCollector};
pub use key_value::{add_parse_key_values, parse_key_values};
pub use process::run_line_data;
