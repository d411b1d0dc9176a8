pub mod key_values;
pub mod output;
