//! Forge DAMON Library.
//!
//! Primitivas de monitoramento de acesso do espaço de endereço físico
//! (DAMON-PA) para o Redstone OS: cache de resultados por frame, mark-old,
//! check-young, pageout de regiões e score de esquemas.
//!
//! O kernel hospedeiro fornece o backend de memória ([`mm::PhysMemory`] +
//! [`mm::LruOps`]) e, opcionalmente, um sink de log
//! ([`drivers::serial::install`]).

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (lote de reclaim, listas de regiões)
extern crate alloc;

// --- Infraestrutura ---
pub mod core; // Logging
pub mod drivers; // Sink serial

// --- Memória ---
pub mod mm; // Tipos físicos, rmap, reclaim, DAMON

pub use crate::mm::damon::{MonitorOps, PaddrOps};
