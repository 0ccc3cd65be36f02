//! # Page Reclaim Subsystem
//!
//! Interface com a maquinaria de LRU do kernel hospedeiro (isolamento,
//! putback e reclaim em lote) e o despejo de faixas físicas usado pelo
//! esquema PAGEOUT.

pub mod evict;

pub use evict::{pageout_range, PageoutResult, PAGES_RECLAIMED};

use crate::mm::rmap::PhysMemory;
use alloc::vec::Vec;

/// Operações de LRU consumidas pelo reclaim.
pub trait LruOps: PhysMemory {
    /// Isola a página da sua lista LRU. `false` se outra entidade (reclaim
    /// concorrente, compaction) já a possui ou se não está em LRU.
    fn isolate_lru_page(&self, page: &Self::Page) -> bool;

    /// Devolve uma página isolada para a LRU.
    fn putback_lru_page(&self, page: &Self::Page);

    /// Despeja em lote as páginas isoladas de `pages`, drenando a lista.
    /// Retorna quantas foram efetivamente despejadas; as restantes voltam
    /// para a LRU pelo próprio backend.
    fn reclaim_pages(&self, pages: &mut Vec<Self::Page>) -> usize;

    /// Ponto de preempção cooperativa.
    fn cond_resched(&self) {}
}
