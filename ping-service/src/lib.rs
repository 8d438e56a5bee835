pub mod handlers;
pub mod startup;
