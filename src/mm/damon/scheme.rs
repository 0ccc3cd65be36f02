//! # Esquemas (DAMOS)
//!
//! Um esquema associa uma ação de gerenciamento de memória a regiões que
//! atendem um padrão de acesso. A seleção das regiões é do engine; aqui
//! ficam apenas os campos lidos pelas primitivas.

use super::error::{DamonError, DamonResult};

/// Ação de um esquema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeAction {
    Willneed,
    Cold,
    Pageout,
    Hugepage,
    Nohugepage,
    /// Apenas contabiliza
    Stat,
}

impl SchemeAction {
    /// Converte o nome textual (interface de configuração do engine)
    pub fn parse(name: &str) -> DamonResult<Self> {
        match name {
            "willneed" => Ok(Self::Willneed),
            "cold" => Ok(Self::Cold),
            "pageout" => Ok(Self::Pageout),
            "hugepage" => Ok(Self::Hugepage),
            "nohugepage" => Ok(Self::Nohugepage),
            "stat" => Ok(Self::Stat),
            _ => Err(DamonError::UnknownAction),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Willneed => "willneed",
            Self::Cold => "cold",
            Self::Pageout => "pageout",
            Self::Hugepage => "hugepage",
            Self::Nohugepage => "nohugepage",
            Self::Stat => "stat",
        }
    }
}

/// Pesos da priorização sob quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub weight_sz: u32,
    pub weight_nr_accesses: u32,
    pub weight_age: u32,
}

impl Default for Quota {
    fn default() -> Self {
        Self {
            weight_sz: 0,
            weight_nr_accesses: 1,
            weight_age: 1,
        }
    }
}

/// Esquema de gerenciamento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    pub action: SchemeAction,
    pub quota: Quota,
}

impl Scheme {
    pub fn new(action: SchemeAction) -> Self {
        Self {
            action,
            quota: Quota::default(),
        }
    }

    pub fn with_quota(action: SchemeAction, quota: Quota) -> Self {
        Self { action, quota }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parse() {
        assert_eq!(SchemeAction::parse("pageout"), Ok(SchemeAction::Pageout));
        assert_eq!(SchemeAction::parse("stat"), Ok(SchemeAction::Stat));
        assert_eq!(SchemeAction::parse("PAGEOUT"), Err(DamonError::UnknownAction));
        assert_eq!(SchemeAction::parse(""), Err(DamonError::UnknownAction));
    }

    #[test]
    fn test_action_name_roundtrip() {
        for action in [
            SchemeAction::Willneed,
            SchemeAction::Cold,
            SchemeAction::Pageout,
            SchemeAction::Hugepage,
            SchemeAction::Nohugepage,
            SchemeAction::Stat,
        ] {
            assert_eq!(SchemeAction::parse(action.as_str()), Ok(action));
        }
    }
}
