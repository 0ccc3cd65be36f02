//! # Regiões Monitoradas
//!
//! Contrato com o engine de monitoramento: o engine cria, divide, funde e
//! destrói regiões; as primitivas apenas escrevem `sampling_addr` e
//! incrementam `nr_accesses`.

use super::error::{DamonError, DamonResult};
use alloc::vec::Vec;

/// Faixa de endereços físicos `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrRange {
    pub start: u64,
    pub end: u64,
}

impl AddrRange {
    /// Cria faixa validada (não vazia)
    pub fn new(start: u64, end: u64) -> DamonResult<Self> {
        if start >= end {
            return Err(DamonError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Tamanho em bytes (0 se a faixa foi corrompida pelo chamador)
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }
}

/// Região monitorada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub ar: AddrRange,
    /// Endereço amostrado no round corrente
    pub sampling_addr: u64,
    /// Amostras acessadas no intervalo de agregação corrente
    pub nr_accesses: u32,
    /// Intervalos de agregação em que o padrão de acesso se manteve
    pub age: u32,
}

impl Region {
    pub fn new(start: u64, end: u64) -> DamonResult<Self> {
        let ar = AddrRange::new(start, end)?;
        Ok(Self {
            ar,
            sampling_addr: start,
            nr_accesses: 0,
            age: 0,
        })
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.ar.len()
    }
}

/// Alvo monitorado: para o espaço físico, apenas uma lista de regiões.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub regions: Vec<Region>,
}

impl Target {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Cria alvo a partir de faixas `(start, end)`
    pub fn from_ranges(ranges: &[(u64, u64)]) -> DamonResult<Self> {
        let mut regions = Vec::with_capacity(ranges.len());
        for &(start, end) in ranges {
            regions.push(Region::new(start, end)?);
        }
        Ok(Self { regions })
    }

    pub fn nr_regions(&self) -> usize {
        self.regions.len()
    }
}
