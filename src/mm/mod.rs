//! # Memory Management Subsystem (MM)
//!
//! Tipos de memória física e as primitivas DAMON do espaço físico.
//!
//! ## 🏗️ Arquitetura dos Módulos
//!
//! | Módulo    | Responsabilidade |
//! |-----------|------------------|
//! | `addr`    | `PhysAddr` / `Pfn` type-safe. |
//! | `config`  | Constantes (página, huge page, cache, score). |
//! | `page`    | `PageFlags` e guards RAII de pin/lock de página. |
//! | `rmap`    | Interface de reverse mapping e bits de acesso (backend do kernel). |
//! | `reclaim` | Interface de LRU e despejo em lote de faixas físicas. |
//! | `damon`   | Cache por frame, mark-old, check-young, pageout e score. |
//!
//! ---------------------------------------------------------------------
//! FLUXO DE DEPENDÊNCIA
//! ---------------------------------------------------------------------
//!
//! ```text
//! damon ──▶ reclaim ──▶ page ──▶ rmap (kernel hospedeiro)
//!   │                    ▲
//!   └────────────────────┘
//! ```
//!
//! Nenhum módulo aqui mantém lock entre chamadas. Pins e locks de página
//! vivem apenas durante uma primitiva e são soltos por `Drop`.

pub mod addr;
pub mod config;
pub mod damon;
pub mod page;
pub mod reclaim;
pub mod rmap;

// Re-exports para conveniência
pub use addr::{Pfn, PhysAddr};
pub use page::{PageFlags, PinnedPage};
pub use reclaim::LruOps;
pub use rmap::{MapLevel, Mapping, PhysMemory, WalkControl};
