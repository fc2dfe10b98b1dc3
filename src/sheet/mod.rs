pub mod cell_value;
pub mod engine;
pub mod locator;
