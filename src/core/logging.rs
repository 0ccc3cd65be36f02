// =============================================================================
// DAMON LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging das primitivas DAMON com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - Apenas strings literais + valor hex opcional
// - SEM alocação
// - Escreve no sink serial instalado pelo kernel hospedeiro
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros fatais ou inconsistências de configuração
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal (setup, teardown)
// - DEBUG: Informações por round
// - TRACE: Detalhes extremos (cada amostra)
//
// COMO USAR:
//   kinfo!("(DAMON-PA) Inicializando...");      // Apenas string
//   kinfo!("(DAMON-PA) pfn=", 0x1000);          // String + hex
//
// =============================================================================

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

/// Emite uma linha com prefixo de nível (uso interno dos macros).
#[doc(hidden)]
#[inline]
pub fn emit_line(prefix: &str, msg: &str) {
    crate::drivers::serial::emit_str(prefix);
    crate::drivers::serial::emit_str(msg);
    crate::drivers::serial::emit_nl();
}

/// Emite uma linha com prefixo de nível e valor hex (uso interno dos macros).
#[doc(hidden)]
#[inline]
pub fn emit_line_hex(prefix: &str, msg: &str, val: u64) {
    crate::drivers::serial::emit_str(prefix);
    crate::drivers::serial::emit_str(msg);
    crate::drivers::serial::emit_hex(val);
    crate::drivers::serial::emit_nl();
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_ERROR, $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line_hex($crate::core::logging::P_ERROR, $msg, $val as u64);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_WARN, $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line_hex($crate::core::logging::P_WARN, $msg, $val as u64);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

/// kwarn_once! - Warning emitido apenas na primeira vez que o ponto é atingido.
///
/// Equivalente ao WARN_ON_ONCE: sinaliza inconsistência de configuração
/// para o desenvolvedor sem interromper o round.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn_once {
    ($($arg:expr),+) => {{
        static WARNED: ::core::sync::atomic::AtomicBool =
            ::core::sync::atomic::AtomicBool::new(false);
        if !WARNED.swap(true, ::core::sync::atomic::Ordering::Relaxed) {
            $crate::kwarn!($($arg),+);
        }
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn_once {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(any(feature = "log_info", feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_INFO, $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line_hex($crate::core::logging::P_INFO, $msg, $val as u64);
    }};
}

#[cfg(not(any(feature = "log_info", feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(any(feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_DEBUG, $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line_hex($crate::core::logging::P_DEBUG, $msg, $val as u64);
    }};
}

#[cfg(not(any(feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(feature = "log_trace")]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_TRACE, $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line_hex($crate::core::logging::P_TRACE, $msg, $val as u64);
    }};
}

#[cfg(not(feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}
