//! # Interface de Primitivas
//!
//! O engine de monitoramento é agnóstico de espaço de endereço. Cada espaço
//! (físico, virtual, ...) fornece uma implementação de [`MonitorOps`],
//! escolhida no setup do monitor.

use super::context::MonitorContext;
use super::region::{Region, Target};
use super::scheme::Scheme;

/// Callbacks chamados pelo engine a cada round/agregação.
pub trait MonitorOps {
    /// Início de round: escolhe o endereço de amostragem de cada região e
    /// limpa os indicadores de acesso.
    fn prepare_access_checks(&mut self, ctx: &mut MonitorContext);

    /// Fim de round: incrementa `nr_accesses` das regiões acessadas.
    /// Retorna o maior `nr_accesses` entre todas as regiões.
    fn check_accesses(&mut self, ctx: &mut MonitorContext) -> u32;

    /// O alvo ainda pode ser monitorado?
    fn target_valid(&self, _target: &Target) -> bool {
        true
    }

    /// Aplica a ação do esquema na região. Retorna bytes afetados.
    fn apply_scheme(
        &mut self,
        ctx: &MonitorContext,
        target: &Target,
        region: &Region,
        scheme: &Scheme,
    ) -> u64;

    /// Prioridade da região para o esquema, em `[0, DAMOS_MAX_SCORE]`.
    fn scheme_score(
        &self,
        ctx: &MonitorContext,
        target: &Target,
        region: &Region,
        scheme: &Scheme,
    ) -> u32;
}
