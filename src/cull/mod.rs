pub mod action;
pub mod census;
pub mod compare;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod executor;
pub mod extract;
pub mod index;
pub mod priority;
pub mod walk;
