pub mod predict;
pub mod visits;
