//! # Estatísticas das Primitivas
//!
//! Contadores por instância de `PaddrOps`. Úteis para medir a eficácia do
//! cache de resultados (walks evitados) e a contenção de locks.

/// Contadores das primitivas do espaço físico
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddrStats {
    /// Rounds iniciados
    pub rounds: u64,
    /// Walks de rmap feitos pelo mark-old
    pub mkold_walks: u64,
    /// Mark-old evitados pelo cache
    pub mkold_dedup_hits: u64,
    /// Walks de rmap feitos pelo check-young
    pub young_walks: u64,
    /// Check-young resolvidos pelo cache (inclui propagação de huge page)
    pub young_cache_hits: u64,
    /// Amostras puladas por lock de página ocupado
    pub lock_contended: u64,
    /// Amostras cuja página não estava mapeada (caminho idle)
    pub unmapped: u64,
    /// Amostras sem página física
    pub no_page: u64,
    /// Falhas de isolamento de LRU no reclaim
    pub isolation_failed: u64,
    /// Páginas despejadas pelo reclaim
    pub pages_reclaimed: u64,
}

impl PaddrStats {
    /// Total de walks de rmap efetivamente executados
    pub fn total_walks(&self) -> u64 {
        self.mkold_walks + self.young_walks
    }

    /// Percentual de consultas resolvidas pelo cache
    pub fn hit_percent(&self) -> u64 {
        let hits = self.mkold_dedup_hits + self.young_cache_hits;
        let total = hits + self.total_walks();
        if total == 0 {
            return 0;
        }
        (hits * 100) / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_percent() {
        let mut stats = PaddrStats::default();
        assert_eq!(stats.hit_percent(), 0);
        stats.mkold_walks = 1;
        stats.young_walks = 1;
        stats.mkold_dedup_hits = 3;
        stats.young_cache_hits = 3;
        assert_eq!(stats.total_walks(), 2);
        assert_eq!(stats.hit_percent(), 75);
    }
}
