pub mod args;
pub mod bracket;
pub mod store;
pub mod types;
