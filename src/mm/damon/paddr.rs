//! # DAMON-PA: Primitivas para o Espaço de Endereço Físico
//!
//! Implementa [`MonitorOps`] sobre frames físicos:
//!
//! | Callback                | O que faz                                         |
//! |-------------------------|---------------------------------------------------|
//! | `prepare_access_checks` | Novo round + mark-old no endereço amostrado       |
//! | `check_accesses`        | check-young + `nr_accesses++` se acessado          |
//! | `apply_scheme`          | PAGEOUT: isola e despeja as páginas da região     |
//! | `scheme_score`          | PAGEOUT: frieza da região; demais: score máximo   |
//!
//! ## Fluxo de uma amostra
//!
//! ```text
//! Idle ──▶ Sampling ──┬──▶ cache hit ──────────────────▶ Deduped-Return
//!                     └──▶ pin + (trylock) + rmap walk ─▶ Cached-Return
//! ```
//!
//! Frames compartilhados por várias regiões (aliasing) custam no máximo um
//! walk por fase por round graças ao [`FrameCache`]. Para huge pages o
//! resultado também é gravado no pfn base, cobrindo todas as sub-páginas.
//!
//! ## Política de lock
//!
//! Páginas file-backed ou KSM exigem o lock da página para o walk. O lock é
//! apenas TENTADO: com contenção a amostra é pulada neste round (mark-old
//! não acontece; check-young reporta "não acessado"). Nada aqui bloqueia,
//! exceto o `cond_resched` ao final de um lote de reclaim.

use super::cache::FrameCache;
use super::context::MonitorContext;
use super::ops::MonitorOps;
use super::region::{AddrRange, Region, Target};
use super::scheme::{Scheme, SchemeAction};
use super::score::{PageoutScorer, PriorityScorer};
use super::stats::PaddrStats;
use crate::mm::addr::{Pfn, PhysAddr};
use crate::mm::config::{DAMOS_MAX_SCORE, HPAGE_PMD_SIZE, PAGE_SIZE};
use crate::mm::page::PinnedPage;
use crate::mm::reclaim::{pageout_range, LruOps};
use crate::mm::rmap::{MapLevel, Mapping, PhysMemory, WalkControl};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Semente padrão do PRNG de amostragem
pub const DEFAULT_RNG_SEED: u64 = 0x5eed_da40_0c0f_fee5;

/// Configuração de runtime das primitivas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddrConfig {
    /// Semente do PRNG que escolhe `sampling_addr`
    pub rng_seed: u64,
}

impl Default for PaddrConfig {
    fn default() -> Self {
        Self {
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// Resultado de check-young de uma amostra
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessCheck {
    pub accessed: bool,
    /// Tamanho do mapeamento visto pelo walk (base ou huge page)
    pub page_sz: u64,
}

impl AccessCheck {
    const NOT_ACCESSED: Self = Self {
        accessed: false,
        page_sz: PAGE_SIZE as u64,
    };
}

/// Como terminou a tentativa de walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkOutcome {
    NoPage,
    Unmapped,
    Contended,
    Walked,
}

// =============================================================================
// MARK-OLD
// =============================================================================

/// Limpa os indicadores de acesso de um mapeamento.
fn mkold_one<M: PhysMemory + ?Sized>(mem: &M, page: &M::Page, mapping: &Mapping) {
    if mapping.level == MapLevel::Pmd && !cfg!(feature = "thp") {
        crate::kwarn_once!("(DAMON-PA) mkold: mapeamento PMD sem suporte a THP");
        return;
    }

    // `|` e não `||`: os dois indicadores precisam ser limpos
    let referenced = mem.test_and_clear_young(mapping) | mem.notifier_clear_young(mapping);
    if referenced {
        mem.set_page_young(page);
    }
    mem.set_page_idle(page);
}

fn damon_pa_mkold<M: PhysMemory + ?Sized>(mem: &M, pfn: Pfn) -> WalkOutcome {
    let Some(pinned) = PinnedPage::get(mem, pfn) else {
        return WalkOutcome::NoPage;
    };
    let page = pinned.page();

    if !pinned.flags().is_rmap_walkable() {
        mem.set_page_idle(page);
        return WalkOutcome::Unmapped;
    }

    let Ok(_lock) = pinned.lock_for_rmap() else {
        return WalkOutcome::Contended;
    };

    mem.rmap_walk(page, &mut |mapping| {
        mkold_one(mem, page, mapping);
        WalkControl::Continue
    });
    WalkOutcome::Walked
}

// =============================================================================
// CHECK-YOUNG
// =============================================================================

/// Verifica um mapeamento: bit de hardware, flag idle e notifier.
fn young_one<M: PhysMemory + ?Sized>(mem: &M, page: &M::Page, mapping: &Mapping) -> AccessCheck {
    if mapping.level == MapLevel::Pmd && !cfg!(feature = "thp") {
        crate::kwarn_once!("(DAMON-PA) young: mapeamento PMD sem suporte a THP");
        return AccessCheck::NOT_ACCESSED;
    }

    let accessed = mem.mapping_young(mapping)
        || !mem.page_is_idle(page)
        || mem.notifier_test_young(mapping);
    AccessCheck {
        accessed,
        page_sz: mapping.size(),
    }
}

fn damon_pa_young<M: PhysMemory + ?Sized>(mem: &M, pfn: Pfn) -> (AccessCheck, WalkOutcome) {
    let Some(pinned) = PinnedPage::get(mem, pfn) else {
        return (AccessCheck::NOT_ACCESSED, WalkOutcome::NoPage);
    };
    let page = pinned.page();

    if !pinned.flags().is_rmap_walkable() {
        let check = AccessCheck {
            accessed: !mem.page_is_idle(page),
            page_sz: PAGE_SIZE as u64,
        };
        return (check, WalkOutcome::Unmapped);
    }

    let Ok(_lock) = pinned.lock_for_rmap() else {
        return (AccessCheck::NOT_ACCESSED, WalkOutcome::Contended);
    };

    let mut result = AccessCheck::NOT_ACCESSED;
    mem.rmap_walk(page, &mut |mapping| {
        result = young_one(mem, page, mapping);
        if result.accessed {
            WalkControl::Stop
        } else {
            WalkControl::Continue
        }
    });
    (result, WalkOutcome::Walked)
}

// =============================================================================
// PADDR OPS
// =============================================================================

/// Primitivas de monitoramento do espaço físico.
///
/// Uma instância por engine: é dona do cache de resultados e do PRNG de
/// amostragem. Chamadas são síncronas e sem lock interno (`&mut self`).
pub struct PaddrOps<M, S = PageoutScorer> {
    mem: M,
    scorer: S,
    cache: FrameCache,
    rng: SmallRng,
    stats: PaddrStats,
}

impl<M: PhysMemory> PaddrOps<M> {
    /// Cria as primitivas com score PAGEOUT padrão e configuração padrão.
    pub fn new(mem: M) -> Self {
        Self::with_config(mem, PageoutScorer, PaddrConfig::default())
    }
}

impl<M: PhysMemory, S: PriorityScorer> PaddrOps<M, S> {
    pub fn with_config(mem: M, scorer: S, config: PaddrConfig) -> Self {
        crate::kinfo!("(DAMON-PA) Primitivas do espaço físico prontas, seed=", config.rng_seed);
        Self {
            mem,
            scorer,
            cache: FrameCache::new(),
            rng: SmallRng::seed_from_u64(config.rng_seed),
            stats: PaddrStats::default(),
        }
    }

    #[inline]
    pub fn backend(&self) -> &M {
        &self.mem
    }

    #[inline]
    pub fn stats(&self) -> PaddrStats {
        self.stats
    }

    /// Desmonta as primitivas devolvendo o backend.
    pub fn into_backend(self) -> M {
        crate::kdebug!("(DAMON-PA) Encerrando, walks=", self.stats.total_walks());
        self.mem
    }

    /// Inicia um round: invalida logicamente o cache.
    pub fn round_begin(&mut self) {
        self.cache.round_begin();
        self.stats.rounds += 1;
        crate::ktrace!("(DAMON-PA) round gen=", self.cache.generation());
    }

    /// Endereço uniforme em `[start, end)`.
    fn sample_addr(&mut self, ar: &AddrRange) -> u64 {
        if ar.is_empty() {
            return ar.start;
        }
        self.rng.gen_range(ar.start..ar.end)
    }

    /// Mark-old de uma amostra, deduplicado por frame no round.
    pub fn mkold_sample(&mut self, addr: PhysAddr) {
        let pfn = addr.pfn();

        if self.cache.lookup(pfn).is_some_and(|e| e.mkold_done) {
            self.stats.mkold_dedup_hits += 1;
            return;
        }

        match damon_pa_mkold(&self.mem, pfn) {
            WalkOutcome::Walked => self.stats.mkold_walks += 1,
            WalkOutcome::Unmapped => self.stats.unmapped += 1,
            WalkOutcome::NoPage => self.stats.no_page += 1,
            WalkOutcome::Contended => {
                self.stats.lock_contended += 1;
                crate::ktrace!("(DAMON-PA) mkold: lock ocupado, pfn=", pfn.as_u64());
            }
        }

        // Young ainda não calculado neste round
        self.cache.record(pfn, 0, false, true);
    }

    /// Check-young de uma amostra, reaproveitando o cache (inclusive o
    /// resultado de huge page gravado no pfn base).
    pub fn young_sample(&mut self, addr: PhysAddr) -> AccessCheck {
        let pfn = addr.pfn();

        if let Some(e) = self.cache.lookup_young(pfn) {
            self.stats.young_cache_hits += 1;
            return AccessCheck {
                accessed: e.accessed,
                page_sz: e.page_sz,
            };
        }

        let (check, outcome) = damon_pa_young(&self.mem, pfn);
        match outcome {
            WalkOutcome::Walked => self.stats.young_walks += 1,
            WalkOutcome::Unmapped => self.stats.unmapped += 1,
            WalkOutcome::NoPage => self.stats.no_page += 1,
            WalkOutcome::Contended => {
                self.stats.lock_contended += 1;
                crate::ktrace!("(DAMON-PA) young: lock ocupado, pfn=", pfn.as_u64());
            }
        }

        self.cache.record(pfn, check.page_sz, check.accessed, true);
        if check.page_sz > PAGE_SIZE as u64 {
            debug_assert_eq!(check.page_sz, HPAGE_PMD_SIZE);
            let base = pfn.align_to_mapping(check.page_sz);
            self.cache.record(base, check.page_sz, check.accessed, true);
        }
        check
    }

    /// Sorteia o endereço de amostragem da região e faz o mark-old.
    pub fn prepare_region(&mut self, region: &mut Region) {
        region.sampling_addr = self.sample_addr(&region.ar);
        self.mkold_sample(PhysAddr::new(region.sampling_addr));
    }

    /// Check-young do endereço amostrado; incrementa `nr_accesses` se
    /// acessado.
    pub fn check_region(&mut self, region: &mut Region) -> bool {
        let check = self.young_sample(PhysAddr::new(region.sampling_addr));
        if check.accessed {
            region.nr_accesses = region.nr_accesses.saturating_add(1);
        }
        check.accessed
    }
}

impl<M: LruOps, S: PriorityScorer> MonitorOps for PaddrOps<M, S> {
    fn prepare_access_checks(&mut self, ctx: &mut MonitorContext) {
        self.round_begin();
        crate::ktrace!("(DAMON-PA) prepare: regioes=", ctx.nr_regions());
        for region in ctx.regions_mut() {
            self.prepare_region(region);
        }
    }

    fn check_accesses(&mut self, ctx: &mut MonitorContext) -> u32 {
        let mut max_nr_accesses = 0;
        for region in ctx.regions_mut() {
            self.check_region(region);
            max_nr_accesses = max_nr_accesses.max(region.nr_accesses);
        }
        max_nr_accesses
    }

    fn target_valid(&self, _target: &Target) -> bool {
        // Memória física não "morre" como um processo
        true
    }

    fn apply_scheme(
        &mut self,
        _ctx: &MonitorContext,
        _target: &Target,
        region: &Region,
        scheme: &Scheme,
    ) -> u64 {
        if scheme.action != SchemeAction::Pageout {
            return 0;
        }

        let result = pageout_range(
            &self.mem,
            PhysAddr::new(region.ar.start),
            PhysAddr::new(region.ar.end),
        );
        self.stats.isolation_failed += result.isolation_failed as u64;
        self.stats.pages_reclaimed += result.reclaimed as u64;

        let bytes = result.bytes(region.size());
        crate::kdebug!("(DAMON-PA) pageout: bytes liberados=", bytes);
        bytes
    }

    fn scheme_score(
        &self,
        ctx: &MonitorContext,
        _target: &Target,
        region: &Region,
        scheme: &Scheme,
    ) -> u32 {
        match scheme.action {
            SchemeAction::Pageout => self.scorer.score(ctx, region, scheme).min(DAMOS_MAX_SCORE),
            _ => DAMOS_MAX_SCORE,
        }
    }
}
