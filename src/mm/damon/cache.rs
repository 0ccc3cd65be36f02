//! # Cache de Resultados por Frame
//!
//! Evita walks de rmap repetidos dentro de um mesmo round de amostragem
//! quando várias regiões (de um ou mais alvos) amostram o mesmo frame.
//!
//! ## Estrutura
//!
//! - Tabela fixa de `DAMON_PA_CACHE_SIZE` entradas, sem alocação
//! - Bucket = `hash_long(pfn, DAMON_PA_CACHE_BITS)`
//! - Linear probing numa janela de `DAMON_PA_CACHE_PROBES` slots
//!
//! ## Gerações
//!
//! Cada entrada carrega a geração em que foi escrita. Uma entrada só é
//! "viva" se `gen == geração corrente`; qualquer outra é lixo lógico.
//! Iniciar um round é apenas incrementar a geração: O(1), sem tocar na
//! tabela. A geração 0 nunca é corrente, então a tabela zerada nasce vazia.
//!
//! ## Colisões
//!
//! Sem política de eviction além de "primeiro slot da janela". Uma colisão
//! custa no máximo um walk extra depois; nunca um resultado errado, porque
//! toda entrada diz a que pfn pertence e um miss cai no walk autoritativo.

use crate::mm::addr::Pfn;
use crate::mm::config::{
    hash_long, DAMON_PA_CACHE_BITS, DAMON_PA_CACHE_PROBES, DAMON_PA_CACHE_SIZE, HPAGE_PMD_SIZE,
    PAGE_SHIFT, PAGE_SIZE,
};

/// Entrada do cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheEntry {
    pub gen: u64,
    pub pfn: Pfn,
    /// Tamanho do mapeamento; 0 = young ainda não calculado neste round
    pub page_sz: u64,
    pub accessed: bool,
    pub mkold_done: bool,
}

impl CacheEntry {
    pub const EMPTY: Self = Self {
        gen: 0,
        pfn: Pfn::new(0),
        page_sz: 0,
        accessed: false,
        mkold_done: false,
    };

    /// Resultado de check-young disponível
    #[inline]
    pub const fn young_known(&self) -> bool {
        self.page_sz != 0
    }

    /// A entrada cobre `pfn` (ela mesma ou huge page que a contém)
    #[inline]
    pub const fn covers(&self, pfn: Pfn) -> bool {
        let nr_pages = if self.page_sz > PAGE_SIZE as u64 {
            self.page_sz >> PAGE_SHIFT
        } else {
            1
        };
        pfn.as_u64() >= self.pfn.as_u64() && pfn.as_u64() < self.pfn.as_u64() + nr_pages
    }
}

/// Cache de resultados de acesso por frame, válido por um round.
pub struct FrameCache {
    entries: [CacheEntry; DAMON_PA_CACHE_SIZE],
    gen: u64,
}

impl FrameCache {
    pub const fn new() -> Self {
        Self {
            entries: [CacheEntry::EMPTY; DAMON_PA_CACHE_SIZE],
            gen: 0,
        }
    }

    /// Geração corrente
    #[inline]
    pub fn generation(&self) -> u64 {
        self.gen
    }

    /// Invalida logicamente todas as entradas. Nunca usa gen == 0.
    #[inline]
    pub fn round_begin(&mut self) {
        self.gen = self.gen.wrapping_add(1);
        if self.gen == 0 {
            self.gen = 1;
        }
    }

    #[inline]
    fn is_live(&self, entry: &CacheEntry) -> bool {
        self.gen != 0 && entry.gen == self.gen
    }

    /// Índices da janela de probe de `pfn`; o primeiro é o bucket.
    #[inline]
    fn probe_window(pfn: Pfn) -> [usize; DAMON_PA_CACHE_PROBES] {
        let idx = hash_long(pfn.as_u64(), DAMON_PA_CACHE_BITS) as usize;
        core::array::from_fn(|i| (idx + i) & (DAMON_PA_CACHE_SIZE - 1))
    }

    /// Entrada viva de `pfn`, se houver.
    pub fn lookup(&self, pfn: Pfn) -> Option<&CacheEntry> {
        Self::probe_window(pfn)
            .into_iter()
            .map(|i| &self.entries[i])
            .find(|e| self.is_live(e) && e.pfn == pfn)
    }

    /// Resultado de check-young para `pfn`: entrada própria com young
    /// calculado ou, na falta dela, entrada de huge page que contém `pfn`.
    pub fn lookup_young(&self, pfn: Pfn) -> Option<&CacheEntry> {
        if let Some(e) = self.lookup(pfn).filter(|e| e.young_known()) {
            return Some(e);
        }
        let base = pfn.align_to_mapping(HPAGE_PMD_SIZE);
        if base == pfn {
            return None;
        }
        self.lookup(base)
            .filter(|e| e.young_known() && e.page_sz > PAGE_SIZE as u64 && e.covers(pfn))
    }

    /// Slot para escrever o resultado de `pfn`.
    ///
    /// Ordem: entrada viva do próprio `pfn` (refresh), primeiro slot não
    /// vivo da janela, e por fim o primeiro slot da janela (eviction).
    /// O chamador deve sobrescrever todos os campos.
    pub fn slot_for_insert(&mut self, pfn: Pfn) -> &mut CacheEntry {
        let window = Self::probe_window(pfn);
        let mut free = None;
        let mut own = None;
        for i in window {
            let entry = &self.entries[i];
            if !self.is_live(entry) {
                if free.is_none() {
                    free = Some(i);
                }
            } else if entry.pfn == pfn {
                own = Some(i);
                break;
            }
        }
        let idx = own.or(free).unwrap_or(window[0]);
        &mut self.entries[idx]
    }

    /// Grava o resultado de `pfn` na geração corrente.
    pub fn record(&mut self, pfn: Pfn, page_sz: u64, accessed: bool, mkold_done: bool) {
        let gen = self.gen;
        let entry = self.slot_for_insert(pfn);
        *entry = CacheEntry {
            gen,
            pfn,
            page_sz,
            accessed,
            mkold_done,
        };
    }

    /// Número de entradas vivas (diagnóstico)
    pub fn live_entries(&self) -> usize {
        self.entries.iter().filter(|e| self.is_live(e)).count()
    }

    #[cfg(test)]
    pub(crate) fn set_generation(&mut self, gen: u64) {
        self.gen = gen;
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(pfn: u64) -> usize {
        hash_long(pfn, DAMON_PA_CACHE_BITS) as usize
    }

    /// Encontra `n` pfns distintos que caem no mesmo bucket de `pfn`.
    fn colliding_pfns(pfn: u64, n: usize) -> alloc::vec::Vec<u64> {
        let target = bucket(pfn);
        (pfn + 1..)
            .filter(|&p| bucket(p) == target)
            .take(n)
            .collect()
    }

    #[test]
    fn test_fresh_cache_is_empty() {
        let mut cache = FrameCache::new();
        assert!(cache.lookup(Pfn::new(0)).is_none());
        // Entradas zeradas (gen 0) nunca ficam vivas
        cache.round_begin();
        assert!(cache.lookup(Pfn::new(0)).is_none());
        assert_eq!(cache.live_entries(), 0);
    }

    #[test]
    fn test_record_and_lookup() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        cache.record(Pfn::new(1), 0, false, true);
        let e = cache.lookup(Pfn::new(1)).unwrap();
        assert!(e.mkold_done);
        assert!(!e.young_known());
        assert!(cache.lookup(Pfn::new(2)).is_none());
    }

    #[test]
    fn test_round_begin_invalidates() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        for pfn in 0..64 {
            cache.record(Pfn::new(pfn), PAGE_SIZE as u64, true, true);
        }
        assert!(cache.live_entries() > 0);
        cache.round_begin();
        for pfn in 0..64 {
            assert!(cache.lookup(Pfn::new(pfn)).is_none());
        }
        assert_eq!(cache.live_entries(), 0);
    }

    #[test]
    fn test_generation_skips_zero() {
        let mut cache = FrameCache::new();
        cache.set_generation(u64::MAX);
        cache.record(Pfn::new(5), PAGE_SIZE as u64, true, true);
        assert!(cache.lookup(Pfn::new(5)).is_some());
        cache.round_begin();
        assert_eq!(cache.generation(), 1);
        assert!(cache.lookup(Pfn::new(5)).is_none());
    }

    #[test]
    fn test_refresh_keeps_single_live_entry() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        cache.record(Pfn::new(9), 0, false, true);
        cache.record(Pfn::new(9), PAGE_SIZE as u64, true, true);
        assert_eq!(cache.live_entries(), 1);
        let e = cache.lookup(Pfn::new(9)).unwrap();
        assert!(e.accessed);
        assert!(e.young_known());
    }

    #[test]
    fn test_probe_window_collisions() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        let base = 3u64;
        let others = colliding_pfns(base, DAMON_PA_CACHE_PROBES);

        // Enche a janela: base + 3 colisões
        cache.record(Pfn::new(base), 0, false, true);
        for &p in &others[..DAMON_PA_CACHE_PROBES - 1] {
            cache.record(Pfn::new(p), 0, false, true);
        }
        assert!(cache.lookup(Pfn::new(base)).is_some());
        for &p in &others[..DAMON_PA_CACHE_PROBES - 1] {
            assert!(cache.lookup(Pfn::new(p)).is_some());
        }

        // Janela cheia: o primeiro slot (base) é despejado
        let extra = others[DAMON_PA_CACHE_PROBES - 1];
        cache.record(Pfn::new(extra), 0, false, true);
        assert!(cache.lookup(Pfn::new(extra)).is_some());
        assert!(cache.lookup(Pfn::new(base)).is_none());
    }

    #[test]
    fn test_stale_slot_reused_before_eviction() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        let others = colliding_pfns(11, DAMON_PA_CACHE_PROBES);
        for &p in &others {
            cache.record(Pfn::new(p), 0, false, true);
        }
        cache.round_begin();
        cache.record(Pfn::new(11), 0, false, true);
        assert_eq!(cache.live_entries(), 1);
        assert!(cache.lookup(Pfn::new(11)).is_some());
    }

    #[test]
    fn test_huge_page_propagation_lookup() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        let nr_pages = HPAGE_PMD_SIZE >> PAGE_SHIFT;
        let base = Pfn::new(0x400);
        let sampled = base.add(0x2a);
        cache.record(sampled, HPAGE_PMD_SIZE, true, true);
        cache.record(base, HPAGE_PMD_SIZE, true, true);

        for off in 0..nr_pages {
            let e = cache.lookup_young(base.add(off)).unwrap();
            assert!(e.accessed);
            assert_eq!(e.page_sz, HPAGE_PMD_SIZE);
        }
        // Fora da huge page
        assert!(cache.lookup_young(base.add(nr_pages)).is_none());
    }

    #[test]
    fn test_base_page_entry_does_not_cover_neighbours() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        cache.record(Pfn::new(0x200), PAGE_SIZE as u64, true, true);
        assert!(cache.lookup_young(Pfn::new(0x200)).is_some());
        assert!(cache.lookup_young(Pfn::new(0x201)).is_none());
    }

    #[test]
    fn test_mkold_only_entry_is_not_young_result() {
        let mut cache = FrameCache::new();
        cache.round_begin();
        cache.record(Pfn::new(0x10), 0, false, true);
        assert!(cache.lookup(Pfn::new(0x10)).is_some());
        assert!(cache.lookup_young(Pfn::new(0x10)).is_none());
    }
}
