pub mod compliance;
pub mod stats;
