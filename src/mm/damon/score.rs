//! # Score de Priorização
//!
//! Sob quota, o engine aplica a ação primeiro nas regiões de maior score.
//! Para PAGEOUT o score é a "frieza" da região: combina frequência de
//! acesso e idade, ponderadas pelos pesos da quota do esquema.
//!
//! ```text
//! freq_subscore = nr_accesses * 100 / max_nr_accesses        [0, 100]
//! age_in_log    = log2(idade em segundos)                     [0, 32]
//!                 (negativo se freq_subscore == 0: velho e frio = mais frio)
//! age_subscore  = (age_in_log + 32) * 100 / 32 / 2            [0, 100]
//! hotness       = média ponderada, escalada para [0, MAX_SCORE]
//! score         = MAX_SCORE - hotness
//! ```

use super::context::MonitorContext;
use super::region::Region;
use super::scheme::Scheme;
use crate::mm::config::{DAMON_MAX_AGE_IN_LOG, DAMON_MAX_SUBSCORE, DAMOS_MAX_SCORE};

/// Função de prioridade de uma região para um esquema.
pub trait PriorityScorer {
    /// Score em `[0, DAMOS_MAX_SCORE]`.
    fn score(&self, ctx: &MonitorContext, region: &Region, scheme: &Scheme) -> u32;
}

/// Score de frieza para PAGEOUT (frequência + idade).
#[derive(Debug, Clone, Copy, Default)]
pub struct PageoutScorer;

impl PriorityScorer for PageoutScorer {
    fn score(&self, ctx: &MonitorContext, region: &Region, scheme: &Scheme) -> u32 {
        pageout_score(ctx, region, scheme)
    }
}

/// Calcula a frieza de `region`.
pub fn pageout_score(ctx: &MonitorContext, region: &Region, scheme: &Scheme) -> u32 {
    let max_subscore = DAMON_MAX_SUBSCORE as i64;
    let freq_weight = scheme.quota.weight_nr_accesses as i64;
    let age_weight = scheme.quota.weight_age as i64;

    let max_nr_accesses = ctx.attrs.max_nr_accesses() as i64;
    let freq_subscore =
        (region.nr_accesses as i64 * max_subscore / max_nr_accesses).min(max_subscore);

    let mut age_in_sec = region.age as u64 * ctx.attrs.aggr_interval_us / 1_000_000;
    let mut age_in_log: i64 = 0;
    while age_in_log < DAMON_MAX_AGE_IN_LOG as i64 && age_in_sec != 0 {
        age_in_log += 1;
        age_in_sec >>= 1;
    }

    // Frequência zero: quanto mais velha, mais fria
    if freq_subscore == 0 {
        age_in_log = -age_in_log;
    }

    // [-MAX_AGE_IN_LOG, MAX_AGE_IN_LOG] -> [0, 100]
    age_in_log += DAMON_MAX_AGE_IN_LOG as i64;
    let age_subscore = age_in_log * max_subscore / DAMON_MAX_AGE_IN_LOG as i64 / 2;

    let mut hotness = freq_weight * freq_subscore + age_weight * age_subscore;
    if freq_weight + age_weight != 0 {
        hotness /= freq_weight + age_weight;
    }
    let hotness = hotness * DAMOS_MAX_SCORE as i64 / max_subscore;

    (DAMOS_MAX_SCORE as i64 - hotness).clamp(0, DAMOS_MAX_SCORE as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::damon::context::MonitorAttrs;
    use crate::mm::damon::scheme::{Quota, SchemeAction};

    fn ctx() -> MonitorContext {
        // 20 amostras por agregação, agregação de 1s para idade legível
        MonitorContext::new(MonitorAttrs::new(50_000, 1_000_000).unwrap())
    }

    fn region(nr_accesses: u32, age: u32) -> Region {
        let mut r = Region::new(0x1000, 0x2000).unwrap();
        r.nr_accesses = nr_accesses;
        r.age = age;
        r
    }

    #[test]
    fn test_hot_region_scores_low() {
        let scheme = Scheme::new(SchemeAction::Pageout);
        let hot = pageout_score(&ctx(), &region(20, 0), &scheme);
        let cold = pageout_score(&ctx(), &region(0, 0), &scheme);
        assert!(hot < cold);
    }

    #[test]
    fn test_old_cold_region_is_coldest() {
        let scheme = Scheme::new(SchemeAction::Pageout);
        let young_cold = pageout_score(&ctx(), &region(0, 1), &scheme);
        let old_cold = pageout_score(&ctx(), &region(0, 1024), &scheme);
        assert!(old_cold > young_cold);
    }

    #[test]
    fn test_old_hot_region_is_hottest() {
        let scheme = Scheme::new(SchemeAction::Pageout);
        let young_hot = pageout_score(&ctx(), &region(10, 1), &scheme);
        let old_hot = pageout_score(&ctx(), &region(10, 1024), &scheme);
        assert!(old_hot < young_hot);
    }

    #[test]
    fn test_known_values() {
        let scheme = Scheme::new(SchemeAction::Pageout);
        // freq=0, age=0: age_subscore = 32*100/32/2 = 50; hotness = 25 -> 24
        assert_eq!(pageout_score(&ctx(), &region(0, 0), &scheme), 75);
        // freq=100, age=0: hotness = (100 + 50)/2 = 75 -> 74
        assert_eq!(pageout_score(&ctx(), &region(20, 0), &scheme), 25);
    }

    #[test]
    fn test_zero_weights() {
        let quota = Quota {
            weight_sz: 0,
            weight_nr_accesses: 0,
            weight_age: 0,
        };
        let scheme = Scheme::with_quota(SchemeAction::Pageout, quota);
        assert_eq!(pageout_score(&ctx(), &region(20, 100), &scheme), DAMOS_MAX_SCORE);
    }

    #[test]
    fn test_score_bounded() {
        let scheme = Scheme::new(SchemeAction::Pageout);
        for nr in [0u32, 1, 5, 20, 1000] {
            for age in [0u32, 1, 7, 1 << 20, u32::MAX] {
                assert!(pageout_score(&ctx(), &region(nr, age), &scheme) <= DAMOS_MAX_SCORE);
            }
        }
    }
}
