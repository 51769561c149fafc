pub mod compile;
pub mod monitors;
