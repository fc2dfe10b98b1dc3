pub mod reader;
pub mod registry;
