use crate::mm::config::{checked_align_up, PAGE_SHIFT, PAGE_SIZE};
use core::fmt;

/// Endereço físico (wrapper type-safe)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct PhysAddr(u64);

impl PhysAddr {
    /// Cria novo endereço físico
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Retorna o valor interno como u64
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Frame físico que contém este endereço (PHYS_PFN)
    #[inline]
    pub const fn pfn(self) -> Pfn {
        Pfn(self.0 >> PAGE_SHIFT)
    }

    /// Alinha para cima (múltiplo de align). `None` no topo do espaço.
    #[inline]
    pub const fn checked_align_up(self, align: u64) -> Option<Self> {
        match checked_align_up(self.0, align) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Adiciona offset. `None` se passar de `u64::MAX`.
    #[inline]
    pub const fn checked_add(self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }
}

impl fmt::Debug for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysAddr({:#x})", self.0)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Page Frame Number: índice de um frame de `PAGE_SIZE` bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Pfn(u64);

impl Pfn {
    #[inline]
    pub const fn new(pfn: u64) -> Self {
        Self(pfn)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Alinha o pfn ao primeiro frame de um mapeamento de `map_size` bytes.
    ///
    /// `map_size` deve ser potência de 2 e múltiplo de `PAGE_SIZE`.
    #[inline]
    pub const fn align_to_mapping(self, map_size: u64) -> Self {
        let nr_pages = map_size >> PAGE_SHIFT;
        Self(self.0 & !(nr_pages - 1))
    }

    /// Avança `count` frames
    #[inline]
    pub const fn add(self, count: u64) -> Self {
        Self(self.0 + count)
    }
}

impl fmt::Debug for Pfn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pfn({:#x})", self.0)
    }
}

const _: () = assert!(PAGE_SIZE == 1 << PAGE_SHIFT);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::config::HPAGE_PMD_SIZE;

    #[test]
    fn test_phys_to_pfn() {
        assert_eq!(PhysAddr::new(0x1000).pfn(), Pfn::new(1));
        assert_eq!(PhysAddr::new(0x1004).pfn(), Pfn::new(1));
        assert_eq!(PhysAddr::new(0x1fff).pfn(), Pfn::new(1));
        assert_eq!(PhysAddr::new(0x2000).pfn(), Pfn::new(2));
    }

    #[test]
    fn test_checked_arithmetic_at_top_of_space() {
        let page = PAGE_SIZE as u64;
        let last = PhysAddr::new(0xFFFF_FFFF_FFFF_F000);
        assert_eq!(PhysAddr::new(0xFFFF_FFFF_FFFF_E001).checked_align_up(page), Some(last));
        assert_eq!(PhysAddr::new(0xFFFF_FFFF_FFFF_F001).checked_align_up(page), None);
        assert_eq!(last.checked_add(page), None);
        assert_eq!(
            PhysAddr::new(0x1000).checked_add(page),
            Some(PhysAddr::new(0x2000))
        );
    }

    #[test]
    fn test_align_to_huge_mapping() {
        // 2 MiB = 512 frames
        let pfn = Pfn::new(0x2a7);
        assert_eq!(pfn.align_to_mapping(HPAGE_PMD_SIZE), Pfn::new(0x200));
        assert_eq!(pfn.align_to_mapping(PAGE_SIZE as u64), pfn);
    }
}
