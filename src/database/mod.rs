pub mod catalog_file;
pub mod repositories;

pub use catalog_file::*;
