//! # Addr - Wrappers Type-Safe para Endereços
//!
//! Endereços físicos e números de frame como tipos distintos, evitando
//! confusão entre byte-address e índice de frame.

mod phys;

pub use phys::{Pfn, PhysAddr};
