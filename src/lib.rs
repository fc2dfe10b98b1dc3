pub mod common;
pub mod keywords;
pub mod rpc;
pub mod session;
pub mod sheet;
