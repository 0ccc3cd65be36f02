//! # Page Handles
//!
//! Flags de página consumidas pelas primitivas e os guards RAII que garantem
//! a liberação do pin e do lock de página em TODOS os caminhos de retorno.
//!
//! ```text
//! get_page ──▶ PinnedPage ──▶ lock_for_rmap ──▶ PageLockGuard
//!                  │                                  │
//!                  ▼ drop                             ▼ drop
//!              put_page                          unlock_page
//! ```
//!
//! O lock só é tentado em modo não bloqueante: contenção significa
//! "pular a amostra neste round", nunca esperar.

use crate::mm::addr::Pfn;
use crate::mm::rmap::PhysMemory;
use bitflags::bitflags;

bitflags! {
    /// Estado de uma página física relevante para o walk de rmap e reclaim.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PageFlags: u32 {
        /// Página possui ao menos um mapeamento em page table.
        const MAPPED      = 1 << 0;
        /// Página possui estrutura de reverse mapping (anon_vma/mapping).
        const RMAPPING    = 1 << 1;
        /// Página anônima.
        const ANON        = 1 << 2;
        /// Página compartilhada por merge (KSM).
        const KSM         = 1 << 3;
        /// Página não pode ser despejada (mlock, ramfs, ...).
        const UNEVICTABLE = 1 << 4;
    }
}

impl PageFlags {
    /// Página pode ser percorrida via rmap (mapeada e com rmapping).
    #[inline]
    pub const fn is_rmap_walkable(self) -> bool {
        self.contains(Self::MAPPED) && self.contains(Self::RMAPPING)
    }

    /// Walk exige o lock da página: file-backed ou KSM.
    #[inline]
    pub const fn needs_rmap_lock(self) -> bool {
        !self.contains(Self::ANON) || self.contains(Self::KSM)
    }
}

/// O lock da página está com outro contexto (reclaim, compaction, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLockContended;

// =============================================================================
// PINNED PAGE
// =============================================================================

/// Página com referência pinada durante uma chamada de primitiva.
pub struct PinnedPage<'m, M: PhysMemory + ?Sized> {
    mem: &'m M,
    page: M::Page,
}

impl<'m, M: PhysMemory + ?Sized> PinnedPage<'m, M> {
    /// Resolve e pina a página de `pfn`. `None` se não há página (livre,
    /// offline ou nunca populada).
    pub fn get(mem: &'m M, pfn: Pfn) -> Option<Self> {
        mem.get_page(pfn).map(|page| Self { mem, page })
    }

    #[inline]
    pub fn page(&self) -> &M::Page {
        &self.page
    }

    #[inline]
    pub fn flags(&self) -> PageFlags {
        self.mem.page_flags(&self.page)
    }

    /// Aplica a política de lock do walk de rmap.
    ///
    /// - `Ok(None)`: página anônima não-KSM, lock desnecessário
    /// - `Ok(Some(guard))`: lock obtido
    /// - `Err(PageLockContended)`: lock ocupado, a amostra deve ser pulada
    pub fn lock_for_rmap(&self) -> Result<Option<PageLockGuard<'_, M>>, PageLockContended> {
        if !self.flags().needs_rmap_lock() {
            return Ok(None);
        }
        if self.mem.trylock_page(&self.page) {
            Ok(Some(PageLockGuard {
                mem: self.mem,
                page: &self.page,
            }))
        } else {
            Err(PageLockContended)
        }
    }
}

impl<M: PhysMemory + ?Sized> Drop for PinnedPage<'_, M> {
    fn drop(&mut self) {
        self.mem.put_page(&self.page);
    }
}

// =============================================================================
// PAGE LOCK GUARD
// =============================================================================

/// Guard do lock de página - libera ao sair do escopo
pub struct PageLockGuard<'a, M: PhysMemory + ?Sized> {
    mem: &'a M,
    page: &'a M::Page,
}

impl<M: PhysMemory + ?Sized> Drop for PageLockGuard<'_, M> {
    fn drop(&mut self) {
        self.mem.unlock_page(self.page);
    }
}
