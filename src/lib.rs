//! Smart Traffic Library
//!
//! A four-way intersection simulation driven by an adaptive signal controller.

pub mod simulation;
