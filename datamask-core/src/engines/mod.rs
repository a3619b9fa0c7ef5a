// datamask-core/src/engines/mod.rs
//! Concrete implementations of the `MaskingEngine` trait.

pub mod regex_engine;
