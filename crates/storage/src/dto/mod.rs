pub mod common;
pub mod eoi;
pub mod group;
pub mod review;
