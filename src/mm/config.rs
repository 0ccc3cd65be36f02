//! # Configuração do Módulo de Memória
//!
//! Define constantes e utilitários globais usados pelas primitivas DAMON.

// =============================================================================
// CONSTANTES DE TAMANHO
// =============================================================================

/// Bits de offset dentro de uma página
pub const PAGE_SHIFT: u32 = 12;

/// Tamanho de uma página (4 KiB)
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;

/// Bits de uma huge page mapeada em nível PMD
pub const HPAGE_PMD_SHIFT: u32 = 21;

/// Tamanho de uma huge page PMD (2 MiB)
pub const HPAGE_PMD_SIZE: u64 = 1 << HPAGE_PMD_SHIFT;

// =============================================================================
// CACHE DE RESULTADOS POR FRAME
// =============================================================================

/// log2 do número de entradas do cache (256 entradas)
pub const DAMON_PA_CACHE_BITS: u32 = 8;

/// Número de entradas do cache
pub const DAMON_PA_CACHE_SIZE: usize = 1 << DAMON_PA_CACHE_BITS;

/// Largura da janela de linear probing
pub const DAMON_PA_CACHE_PROBES: usize = 4;

/// Constante de hash multiplicativo (golden ratio, 64 bits)
pub const GOLDEN_RATIO_64: u64 = 0x61C8_8646_80B5_83EB;

// =============================================================================
// SCORE DE ESQUEMAS
// =============================================================================

/// Score máximo de um esquema ("sempre elegível")
pub const DAMOS_MAX_SCORE: u32 = 99;

/// Escala dos subscores de frequência e idade
pub const DAMON_MAX_SUBSCORE: u32 = 100;

/// Limite do log2 da idade (em segundos) considerado no score
pub const DAMON_MAX_AGE_IN_LOG: i32 = 32;

// =============================================================================
// FUNÇÕES UTILITÁRIAS
// =============================================================================

/// Alinha valor para cima ao múltiplo de align (potência de 2).
/// `None` se o resultado não cabe em u64.
#[inline(always)]
pub const fn checked_align_up(val: u64, align: u64) -> Option<u64> {
    match val.checked_add(align - 1) {
        Some(v) => Some(v & !(align - 1)),
        None => None,
    }
}

/// hash_long(): hash multiplicativo com os `bits` bits mais altos.
#[inline(always)]
pub const fn hash_long(val: u64, bits: u32) -> u64 {
    val.wrapping_mul(GOLDEN_RATIO_64) >> (64 - bits)
}
