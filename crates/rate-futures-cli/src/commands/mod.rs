pub mod creation;
pub mod pricing;
pub mod schedule;
