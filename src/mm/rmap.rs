//! # Reverse Mappings (RMAP)
//!
//! Interface com o subsistema de memória do kernel hospedeiro: resolução de
//! frames, walk de rmap, bits de acesso de page table e flags idle/young.
//!
//! As primitivas DAMON não implementam nada disso; consomem via
//! [`PhysMemory`]. Todos os métodos recebem `&self`: o backend é dono da
//! sincronização interna (locks de anon_vma, i_mmap, PTL).

use crate::mm::addr::Pfn;
use crate::mm::config::{HPAGE_PMD_SIZE, PAGE_SIZE};
use crate::mm::page::PageFlags;

/// Identificador de address space (mm) dono do mapeamento
pub type AspaceId = u64;

/// Nível de page table onde o frame está mapeado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLevel {
    /// PTE de página base (4 KiB)
    Pte,
    /// PMD de huge page (2 MiB)
    Pmd,
}

/// Um mapeamento virtual de um frame físico, visitado pelo walk de rmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub aspace_id: AspaceId,
    pub virt_addr: u64,
    pub level: MapLevel,
}

impl Mapping {
    pub const fn new(aspace_id: AspaceId, virt_addr: u64, level: MapLevel) -> Self {
        Self {
            aspace_id,
            virt_addr,
            level,
        }
    }

    /// Tamanho em bytes coberto pela entrada de page table
    #[inline]
    pub const fn size(&self) -> u64 {
        match self.level {
            MapLevel::Pte => PAGE_SIZE as u64,
            MapLevel::Pmd => HPAGE_PMD_SIZE,
        }
    }
}

/// Resposta do visitor ao walk de rmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    Stop,
}

/// Primitivas de memória física consumidas pelo DAMON-PA.
pub trait PhysMemory {
    /// Handle opaco de página (ex.: ponteiro para `struct page`/folio).
    type Page: Clone;

    /// Resolve e pina a página que contém `pfn`.
    fn get_page(&self, pfn: Pfn) -> Option<Self::Page>;

    /// Solta o pin obtido em `get_page`.
    fn put_page(&self, page: &Self::Page);

    fn page_flags(&self, page: &Self::Page) -> PageFlags;

    /// Invoca `visit` para cada entrada de page table (PTE ou PMD) que mapeia
    /// `page`, em todos os address spaces. `WalkControl::Stop` encerra o walk.
    fn rmap_walk(&self, page: &Self::Page, visit: &mut dyn FnMut(&Mapping) -> WalkControl);

    /// Lê e limpa o bit Accessed de hardware da entrada.
    fn test_and_clear_young(&self, mapping: &Mapping) -> bool;

    /// Lê o bit Accessed de hardware da entrada.
    fn mapping_young(&self, mapping: &Mapping) -> bool;

    /// Limpa o indicador de acesso de agentes externos (MMU notifier,
    /// ex.: KVM secondary MMU) no intervalo do mapeamento.
    fn notifier_clear_young(&self, mapping: &Mapping) -> bool;

    /// Testa o indicador de acesso de agentes externos.
    fn notifier_test_young(&self, mapping: &Mapping) -> bool;

    fn page_is_idle(&self, page: &Self::Page) -> bool;
    fn set_page_idle(&self, page: &Self::Page);

    /// Marca a página como referenciada em software (preserva a informação
    /// para o reclaim após limpar o bit de hardware).
    fn set_page_young(&self, page: &Self::Page);
    fn test_and_clear_page_young(&self, page: &Self::Page) -> bool;
    fn clear_page_referenced(&self, page: &Self::Page);

    /// Tenta adquirir o lock da página SEM bloquear.
    fn trylock_page(&self, page: &Self::Page) -> bool;
    fn unlock_page(&self, page: &Self::Page);
}
