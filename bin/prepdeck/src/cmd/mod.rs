//! Command implementations.

pub mod check;
pub mod index;
pub mod interactive;
pub mod nav;
pub mod search;
pub mod show;
