pub mod counter_store;
pub mod inference;
