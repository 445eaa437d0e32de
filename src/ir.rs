pub mod bits;
pub mod climate;
pub mod format;
pub mod output;
pub mod types;
