pub mod corporate_group;
pub mod eoi;
