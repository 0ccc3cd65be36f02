//! # Driver Layer
//!
//! A biblioteca não acessa hardware diretamente. O único "driver" é o sink
//! serial por onde os macros de log escrevem; o kernel hospedeiro instala a
//! implementação concreta (COM1, ring buffer, etc).

pub mod serial;
