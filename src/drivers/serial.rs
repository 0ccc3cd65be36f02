// =============================================================================
// SERIAL SINK - ZERO OVERHEAD
// =============================================================================
//
// Saída de log das primitivas DAMON.
//
// ARQUITETURA:
// A biblioteca não conhece o hardware do kernel que a embute. Quem embute
// instala UMA vez um `SerialSink` (normalmente o driver COM1 do kernel) e
// todos os macros `k*!` escrevem através dele:
// - SEM core::fmt - Apenas strings literais e valores hex
// - SEM alocação - hex é formatado em buffer na stack
// - SEM sink instalado - as funções de escrita viram no-op
//
// FUNÇÕES DISPONÍVEIS:
// - emit(byte)       : Envia um byte
// - emit_str(s)      : Envia string literal
// - emit_hex(v)      : Envia u64 em hexadecimal
// - emit_nl()        : Envia newline (\r\n)
//
// NOTA IMPORTANTE:
// Este módulo NÃO garante exclusão mútua entre CPUs. Em ambiente SMP,
// os logs podem se intercalar. Isso é aceitável para debugging.
//
// =============================================================================

use spin::Once;

/// Destino dos bytes de log (ex.: UART 16550 do kernel hospedeiro).
pub trait SerialSink: Sync {
    /// Escreve os bytes na saída. Não pode bloquear indefinidamente.
    fn write_bytes(&self, bytes: &[u8]);
}

static SINK: Once<&'static dyn SerialSink> = Once::new();

/// Instala o sink de log.
///
/// Apenas a primeira chamada tem efeito; retorna `false` se já havia um
/// sink instalado.
pub fn install(sink: &'static dyn SerialSink) -> bool {
    let mut installed = false;
    SINK.call_once(|| {
        installed = true;
        sink
    });
    installed
}

/// Verifica se existe um sink instalado.
#[inline]
pub fn is_installed() -> bool {
    SINK.is_completed()
}

// =============================================================================
// FUNÇÕES DE ESCRITA - CORE
// =============================================================================

/// Envia um único byte.
#[inline(always)]
pub fn emit(byte: u8) {
    if let Some(sink) = SINK.get() {
        sink.write_bytes(&[byte]);
    }
}

/// Envia uma string.
#[inline]
pub fn emit_str(s: &str) {
    if let Some(sink) = SINK.get() {
        sink.write_bytes(s.as_bytes());
    }
}

/// Envia newline (\r\n).
#[inline]
pub fn emit_nl() {
    if let Some(sink) = SINK.get() {
        sink.write_bytes(b"\r\n");
    }
}

/// Envia um u64 em hexadecimal (`0x` + 16 dígitos).
pub fn emit_hex(value: u64) {
    if let Some(sink) = SINK.get() {
        sink.write_bytes(&format_hex(value));
    }
}

/// Formata `value` como `0x%016x` sem core::fmt.
pub fn format_hex(value: u64) -> [u8; 18] {
    let mut buf = [0u8; 18];
    buf[0] = b'0';
    buf[1] = b'x';
    for i in 0..16 {
        let shift = (15 - i) * 4;
        buf[2 + i] = nibble_to_ascii(((value >> shift) & 0xF) as u8);
    }
    buf
}

#[inline(always)]
fn nibble_to_ascii(nibble: u8) -> u8 {
    match nibble {
        0..=9 => b'0' + nibble,
        _ => b'a' + (nibble - 10),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hex() {
        assert_eq!(&format_hex(0), b"0x0000000000000000");
        assert_eq!(&format_hex(0x1000), b"0x0000000000001000");
        assert_eq!(&format_hex(u64::MAX), b"0xffffffffffffffff");
        assert_eq!(&format_hex(0xDEAD_BEEF), b"0x00000000deadbeef");
    }

    /// Sink que acumula os bytes em memória
    struct CaptureSink(spin::Mutex<alloc::vec::Vec<u8>>);

    impl SerialSink for CaptureSink {
        fn write_bytes(&self, bytes: &[u8]) {
            self.0.lock().extend_from_slice(bytes);
        }
    }

    static CAPTURE: CaptureSink = CaptureSink(spin::Mutex::new(alloc::vec::Vec::new()));

    fn captured_contains(needle: &[u8]) -> bool {
        CAPTURE.0.lock().windows(needle.len()).any(|w| w == needle)
    }

    #[cfg(not(feature = "no_logs"))]
    #[test]
    fn test_log_macros_reach_sink() {
        // Único teste que instala sink (Once global ao binário de teste)
        assert!(install(&CAPTURE));
        assert!(is_installed());
        assert!(!install(&CAPTURE));

        crate::kwarn!("(TEST) warn marker");
        assert!(captured_contains(b"[WARN]"));
        assert!(captured_contains(b"(TEST) warn marker\r\n"));

        crate::kwarn!("(TEST) pfn=", 0x2a5u64);
        assert!(captured_contains(b"(TEST) pfn=0x00000000000002a5"));

        emit(b'#');
        assert!(captured_contains(b"#"));
    }
}
