//! Domain model for the purchasing portal
pub mod aggregates;
pub mod catalog;
pub mod events;
pub mod value_objects;
