pub mod batch;
pub mod concurrent_map;
