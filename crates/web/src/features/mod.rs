pub mod eoi;
pub mod groups;
