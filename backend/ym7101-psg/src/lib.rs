//! Cycle-level model of the PSG embedded in the Yamaha YM7101 (Sega Mega Drive VDP).
//!
//! Three square wave tone channels and one LFSR noise channel, advanced one channel per chip
//! clock. The host supplies register writes and clocks and reads back either the packed 4-bit
//! channel levels or an analog approximation.

mod num;
pub mod psg;

pub use psg::{
    NoisePeriod, NoiseRegisters, NoiseType, PsgCommand, PsgRegisters, ToneRegisters, Ym7101Psg,
};
pub use ym7101_config::{DebugSelector, PsgChannel, PsgConfig};
