pub mod brief;
pub mod campaign;
pub mod catalog;
