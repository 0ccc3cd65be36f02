//! Tipos de Erro do DAMON
//!
//! As primitivas de amostragem e reclaim nunca falham (sempre retornam
//! contagem, bytes ou bool). Estes erros cobrem apenas a validação de
//! parâmetros no setup do monitor.

/// Erros de configuração do DAMON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamonError {
    /// Faixa de endereços vazia ou invertida (start >= end)
    InvalidRange,
    /// Intervalo de amostragem zero
    InvalidSampleInterval,
    /// Intervalo de agregação menor que o de amostragem
    InvalidAggrInterval,
    /// Ação de esquema desconhecida
    UnknownAction,
}

impl DamonError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRange => "Faixa de endereços vazia ou invertida",
            Self::InvalidSampleInterval => "Intervalo de amostragem deve ser > 0",
            Self::InvalidAggrInterval => "Intervalo de agregação menor que o de amostragem",
            Self::UnknownAction => "Ação de esquema desconhecida",
        }
    }
}

impl core::fmt::Display for DamonError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tipo Result específico do DAMON
pub type DamonResult<T> = Result<T, DamonError>;
