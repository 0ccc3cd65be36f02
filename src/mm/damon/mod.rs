//! # DAMON - Data Access MONitor
//!
//! Monitoramento de acesso à memória por amostragem. A cada round, para
//! cada região monitorada, um endereço é sorteado, seus indicadores de
//! acesso são limpos (mark-old) e, após o intervalo de amostragem,
//! verificados (check-young). A contagem por região estima a frequência de
//! acesso; esquemas (DAMOS) agem sobre as regiões frias ou quentes.
//!
//! ```text
//!            engine (externo)
//!   ┌──────────────────────────────┐
//!   │ timer ─▶ prepare ─▶ check ─▶ │ agregação ─▶ esquemas
//!   └──────────┬───────────┬───────┘                 │
//!              ▼           ▼                         ▼
//!         MonitorOps (PaddrOps) ──────────▶ apply_scheme / scheme_score
//!              │
//!              ▼
//!   FrameCache ─ PhysMemory (rmap, PTE/PMD, idle) ─ LruOps (reclaim)
//! ```
//!
//! Este módulo fornece apenas as primitivas do espaço físico; o engine
//! (agendamento, split/merge de regiões, agregação) fica fora.

pub mod cache;
pub mod context;
pub mod error;
pub mod ops;
pub mod paddr;
pub mod region;
pub mod scheme;
pub mod score;
pub mod stats;

#[cfg(test)]
mod tests;

pub use cache::{CacheEntry, FrameCache};
pub use context::{MonitorAttrs, MonitorContext};
pub use error::{DamonError, DamonResult};
pub use ops::MonitorOps;
pub use paddr::{AccessCheck, PaddrConfig, PaddrOps};
pub use region::{AddrRange, Region, Target};
pub use scheme::{Quota, Scheme, SchemeAction};
pub use score::{pageout_score, PageoutScorer, PriorityScorer};
pub use stats::PaddrStats;
