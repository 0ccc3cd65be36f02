//! Testes de integração das primitivas DAMON-PA
//!
//! Rodam no host contra [`fake::FakeMemory`], um backend que simula
//! mapeamentos PTE/PMD, bits Accessed, notifier, LRU e reclaim.
//!
//! # Como Executar
//! ```bash
//! cargo test --package forge-damon --lib mm::damon::tests
//! cargo test --package forge-damon --lib mm::damon::tests::pageout
//! ```
//!
//! # Estrutura
//!
//! - `fake.rs` - Backend de memória simulado
//! - `primitives.rs` - mark-old, check-young, cache e política de lock
//! - `callbacks.rs` - Os quatro callbacks de `MonitorOps`
//! - `pageout.rs` - Reclaim de faixas físicas

#![cfg(test)]


pub use fake::FakeMemory;

use crate::mm::addr::PhysAddr;
use crate::mm::config::PAGE_SHIFT;
use crate::mm::damon::PaddrOps;

/// Espaço de endereço usado pela maioria dos testes
pub const ASPACE: u64 = 1;

/// Helper: endereço físico do início de `pfn`
pub fn pfn_addr(pfn: u64) -> PhysAddr {
    PhysAddr::new(pfn << PAGE_SHIFT)
}

/// Helper: endereço virtual arbitrário para mapear `pfn`
pub fn vaddr_for(pfn: u64) -> u64 {
    0x7f00_0000_0000 + (pfn << PAGE_SHIFT)
}

/// Helper: backend com páginas anônimas base mapeadas em `pfns`
pub fn create_mapped_memory(pfns: core::ops::Range<u64>) -> FakeMemory {
    let mem = FakeMemory::new();
    for pfn in pfns {
        mem.map_base(pfn, ASPACE, vaddr_for(pfn));
    }
    mem
}

/// Helper: primitivas sobre `mem` com configuração padrão
pub fn create_test_ops(mem: FakeMemory) -> PaddrOps<FakeMemory> {
    PaddrOps::new(mem)
}
