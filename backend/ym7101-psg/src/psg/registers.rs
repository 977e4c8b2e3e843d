use crate::num::GetBit;
use ym7101_config::PsgChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Register {
    Tone(usize),
    Noise,
    Volume(usize),
}

impl Register {
    pub(super) fn from_latch(latch: u8) -> Self {
        let channel = (latch >> 1) as usize & 0x03;
        match (channel, latch.bit(0)) {
            (_, true) => Self::Volume(channel),
            (3, false) => Self::Noise,
            (_, false) => Self::Tone(channel),
        }
    }
}

/// Noise shift rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoisePeriod {
    Fixed(u16),
    /// Shift on tone channel 2's square wave instead of the noise channel's own counter
    Tone2,
}

impl NoisePeriod {
    pub(super) fn from_control(value: u8) -> Self {
        match value & 0x03 {
            0x00 => Self::Fixed(0x10),
            0x01 => Self::Fixed(0x20),
            0x02 => Self::Fixed(0x40),
            0x03 => Self::Tone2,
            _ => unreachable!("value & 0x03 is always <= 0x03"),
        }
    }

    /// Value loaded into the noise channel's frequency register. Tone2 mode leaves it at 0.
    #[must_use]
    pub fn reload_value(self) -> u16 {
        match self {
            Self::Fixed(value) => value,
            Self::Tone2 => 0,
        }
    }
}

impl Default for NoisePeriod {
    fn default() -> Self {
        Self::Fixed(0x10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseType {
    #[default]
    Periodic,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneRegisters {
    pub volume: u8,
    pub frequency: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseRegisters {
    pub volume: u8,
    pub period: NoisePeriod,
    pub noise_type: NoiseType,
    pub data: u8,
}

/// Snapshot of the programmed PSG registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsgRegisters {
    pub latch: u8,
    pub tones: [ToneRegisters; 3],
    pub noise: NoiseRegisters,
    pub debug: u8,
}

/// Builder for PSG register bytes.
///
/// `LatchTone` on [`PsgChannel::Noise`] writes the noise control register, which shares the tone
/// register slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsgCommand {
    LatchTone { channel: PsgChannel, data: u8 },
    LatchVolume { channel: PsgChannel, attenuation: u8 },
    /// Data byte without the latch flag: tone high bits, or a repeat of the latched register
    Data(u8),
}

impl PsgCommand {
    fn latch_byte(channel: PsgChannel, volume: bool, data: u8) -> u8 {
        0x80 | ((channel.index() as u8) << 5) | (u8::from(volume) << 4) | (data & 0x0F)
    }
}

impl From<PsgCommand> for u8 {
    fn from(value: PsgCommand) -> Self {
        match value {
            PsgCommand::LatchTone { channel, data } => PsgCommand::latch_byte(channel, false, data),
            PsgCommand::LatchVolume { channel, attenuation } => {
                PsgCommand::latch_byte(channel, true, attenuation)
            }
            PsgCommand::Data(data) => data & 0x7F,
        }
    }
}
