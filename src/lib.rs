//! Weekly meeting assignments: a roster, an agenda template and an
//! organizer's plan in; an assignment table and printable documents out.

pub mod cli;
pub mod config;
pub mod model;
pub mod render;
pub mod resolve;
pub mod storage;
pub mod week;
