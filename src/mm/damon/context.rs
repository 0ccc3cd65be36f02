//! # Contexto de Monitoramento
//!
//! Atributos temporais e alvos, como vistos pelas primitivas. O engine é
//! dono do contexto e o repassa a cada callback.

use super::error::{DamonError, DamonResult};
use super::region::{Region, Target};
use alloc::vec::Vec;

/// Intervalo de amostragem padrão (5 ms)
pub const DEFAULT_SAMPLE_INTERVAL_US: u64 = 5_000;

/// Intervalo de agregação padrão (100 ms)
pub const DEFAULT_AGGR_INTERVAL_US: u64 = 100_000;

/// Atributos temporais do monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorAttrs {
    pub sample_interval_us: u64,
    pub aggr_interval_us: u64,
}

impl MonitorAttrs {
    pub fn new(sample_interval_us: u64, aggr_interval_us: u64) -> DamonResult<Self> {
        if sample_interval_us == 0 {
            return Err(DamonError::InvalidSampleInterval);
        }
        if aggr_interval_us < sample_interval_us {
            return Err(DamonError::InvalidAggrInterval);
        }
        Ok(Self {
            sample_interval_us,
            aggr_interval_us,
        })
    }

    /// Máximo de `nr_accesses` alcançável num intervalo de agregação
    #[inline]
    pub fn max_nr_accesses(&self) -> u32 {
        let max = self.aggr_interval_us / self.sample_interval_us.max(1);
        max.clamp(1, u32::MAX as u64) as u32
    }
}

impl Default for MonitorAttrs {
    fn default() -> Self {
        Self {
            sample_interval_us: DEFAULT_SAMPLE_INTERVAL_US,
            aggr_interval_us: DEFAULT_AGGR_INTERVAL_US,
        }
    }
}

/// Contexto de monitoramento
#[derive(Debug, Clone, Default)]
pub struct MonitorContext {
    pub attrs: MonitorAttrs,
    pub targets: Vec<Target>,
}

impl MonitorContext {
    pub fn new(attrs: MonitorAttrs) -> Self {
        Self {
            attrs,
            targets: Vec::new(),
        }
    }

    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.targets.iter().flat_map(|t| t.regions.iter())
    }

    pub fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region> + '_ {
        self.targets.iter_mut().flat_map(|t| t.regions.iter_mut())
    }

    pub fn nr_regions(&self) -> usize {
        self.targets.iter().map(Target::nr_regions).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_validation() {
        assert!(MonitorAttrs::new(5_000, 100_000).is_ok());
        assert_eq!(MonitorAttrs::new(0, 100_000), Err(DamonError::InvalidSampleInterval));
        assert_eq!(MonitorAttrs::new(5_000, 1_000), Err(DamonError::InvalidAggrInterval));
    }

    #[test]
    fn test_max_nr_accesses() {
        assert_eq!(MonitorAttrs::default().max_nr_accesses(), 20);
        assert_eq!(MonitorAttrs::new(5_000, 5_000).unwrap().max_nr_accesses(), 1);
    }

    #[test]
    fn test_context_regions() {
        let mut ctx = MonitorContext::default();
        ctx.add_target(Target::from_ranges(&[(0x1000, 0x2000), (0x2000, 0x3000)]).unwrap());
        ctx.add_target(Target::from_ranges(&[(0x9000, 0xa000)]).unwrap());
        assert_eq!(ctx.nr_regions(), 3);
        for r in ctx.regions_mut() {
            r.nr_accesses = 7;
        }
        assert!(ctx.regions().all(|r| r.nr_accesses == 7));
    }
}
