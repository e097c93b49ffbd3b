pub mod filesystem;
pub mod memory;
