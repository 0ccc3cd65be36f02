//! # Eviction Engine
//!
//! Despeja as páginas de uma faixa física em lote.
//!
//! Para cada página alinhada da faixa:
//! 1. Pina a página (pula se não existe)
//! 2. Limpa Referenced e o young de software
//! 3. Isola da LRU (pula silenciosamente se falhar)
//! 4. Unevictable → putback; senão → entra no lote
//!
//! Ao final o lote vai para `reclaim_pages` e cedemos a CPU uma vez.

use super::LruOps;
use crate::mm::addr::PhysAddr;
use crate::mm::config::PAGE_SIZE;
use crate::mm::page::{PageFlags, PinnedPage};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

/// Páginas despejadas (global, todas as instâncias)
pub static PAGES_RECLAIMED: AtomicU64 = AtomicU64::new(0);

/// Resultado de um despejo de faixa
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageoutResult {
    /// Endereços alinhados visitados
    pub scanned: usize,
    /// Endereços sem página
    pub no_page: usize,
    /// Falhas de isolamento (página de outro dono)
    pub isolation_failed: usize,
    /// Páginas unevictable devolvidas à LRU
    pub unevictable: usize,
    /// Páginas submetidas ao reclaim em lote
    pub submitted: usize,
    /// Páginas efetivamente despejadas
    pub reclaimed: usize,
}

impl PageoutResult {
    /// Bytes liberados, limitados ao tamanho da faixa.
    pub fn bytes(&self, range_len: u64) -> u64 {
        ((self.reclaimed * PAGE_SIZE) as u64).min(range_len)
    }
}

/// Despeja as páginas de `[start, end)`.
pub fn pageout_range<M: LruOps>(mem: &M, start: PhysAddr, end: PhysAddr) -> PageoutResult {
    let mut result = PageoutResult::default();
    let mut batch: Vec<M::Page> = Vec::new();

    // Sem wrap no topo do espaço: a faixa termina em u64::MAX
    let mut next = start.checked_align_up(PAGE_SIZE as u64);
    while let Some(addr) = next.filter(|&addr| addr < end) {
        result.scanned += 1;
        let pfn = addr.pfn();
        next = addr.checked_add(PAGE_SIZE as u64);

        let Some(pinned) = PinnedPage::get(mem, pfn) else {
            result.no_page += 1;
            continue;
        };
        let page = pinned.page();

        mem.clear_page_referenced(page);
        mem.test_and_clear_page_young(page);

        if !mem.isolate_lru_page(page) {
            result.isolation_failed += 1;
            continue;
        }

        if pinned.flags().contains(PageFlags::UNEVICTABLE) {
            mem.putback_lru_page(page);
            result.unevictable += 1;
        } else {
            // O lote segura a referência de isolamento; o pin cai no drop
            batch.push(page.clone());
        }
    }

    result.submitted = batch.len();
    if !batch.is_empty() {
        // Nunca mais que o submetido
        result.reclaimed = mem.reclaim_pages(&mut batch).min(result.submitted);
    }
    mem.cond_resched();

    PAGES_RECLAIMED.fetch_add(result.reclaimed as u64, Ordering::Relaxed);
    result
}
