//! Core Module
//!
//! Infraestrutura transversal da biblioteca (logging).

pub mod logging;
