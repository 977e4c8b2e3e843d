//! PSG state record, register interface and the per-cycle state machine
//!
//! The chip visits one channel per clock in a fixed 0-1-2-3 rotation. A period counter that
//! overflows only queues a polarity flip; queued flips are all applied at the next rotation
//! boundary, so channel N's flip becomes visible 4 - N clocks after its overflow.

mod registers;
mod synth;


use crate::num::GetBit;
use ym7101_config::{PsgChannel, PsgConfig};

pub use registers::{
    NoisePeriod, NoiseRegisters, NoiseType, PsgCommand, PsgRegisters, ToneRegisters,
};

use registers::Register;

const SILENT: u8 = 0x0F;
const NOISE_CHANNEL: usize = 3;

#[derive(Debug, Clone)]
struct NoiseGenerator {
    lfsr: u16,
    data: u8,
    reset_delay: u8,
    edge_history: u8,
    period: NoisePeriod,
    noise_type: NoiseType,
}

impl NoiseGenerator {
    fn new() -> Self {
        Self {
            lfsr: 0,
            data: 0,
            reset_delay: 0,
            edge_history: 0,
            period: NoisePeriod::default(),
            noise_type: NoiseType::default(),
        }
    }

    fn write_control(&mut self, data: u8) {
        self.period = NoisePeriod::from_control(data);
        self.noise_type = if data.bit(2) { NoiseType::White } else { NoiseType::Periodic };
        self.data = data & 0x07;
        self.reset_delay |= 0x01;

        log::trace!("Noise control write: {:?} / {:?}", self.period, self.noise_type);
    }

    fn clock(&mut self, sign: u8) {
        // Noise shifts on the rising edge of either its own square wave or tone channel 2's
        let tap = match self.period {
            NoisePeriod::Fixed(_) => 3,
            NoisePeriod::Tone2 => 2,
        };
        self.edge_history = (self.edge_history << 1) | u8::from(sign.bit(tap));
        if self.edge_history & 0x03 == 0x01 {
            self.shift_lfsr();
        }

        if self.reset_delay.bit(1) {
            log::trace!("Clearing noise control data");
            self.data = 0;
        }
    }

    fn shift_lfsr(&mut self) {
        // Shifting in a 1 when the low 15 bits are clear keeps the register from locking up
        let mut input = u16::from(self.lfsr & 0x7FFF == 0);
        if self.noise_type == NoiseType::White {
            input |= u16::from(self.lfsr.bit(15) ^ self.lfsr.bit(12));
        }

        self.lfsr = (self.lfsr << 1) | input;
    }
}

#[derive(Debug, Clone)]
pub struct Ym7101Psg {
    latch: u8,
    volume: [u8; 4],
    output: [u8; 4],
    freq: [u16; 4],
    counter: [u16; 4],
    sign: u8,
    inverse: u8,
    cycle: u8,
    noise: NoiseGenerator,
    debug: u8,
    config: PsgConfig,
}

impl Ym7101Psg {
    #[must_use]
    pub fn new(config: PsgConfig) -> Self {
        let mut psg = Self {
            latch: 0,
            volume: [SILENT; 4],
            output: [SILENT; 4],
            freq: [0; 4],
            counter: [0; 4],
            sign: 0,
            inverse: 0,
            cycle: 0,
            noise: NoiseGenerator::new(),
            debug: 0,
            config,
        };
        psg.reset();

        psg
    }

    /// Restore power-on register state. Host configuration (channel mutes) is retained.
    pub fn reset(&mut self) {
        // Not verified against hardware power-on state
        self.latch = 0x07;
        self.volume = [SILENT; 4];
        self.output = [SILENT; 4];
        self.freq = [0, 0, 0, NoisePeriod::default().reload_value()];
        self.counter = [0; 4];
        self.sign = 0;
        self.inverse = 0x0F;
        self.cycle = 0;
        self.noise = NoiseGenerator::new();
        self.debug = 0;

        log::debug!("PSG reset");
    }

    pub fn write(&mut self, data: u8) {
        if data.bit(7) {
            self.latch = data.bits(4..=6);
        }

        let register = Register::from_latch(self.latch);
        log::trace!("PSG write {data:02X} with latch {} ({register:?})", self.latch);

        match register {
            Register::Volume(channel) => {
                // Applies to data bytes too; the previously latched channel is reused
                self.volume[channel] = data & 0x0F;
            }
            Register::Tone(channel) => {
                let freq = &mut self.freq[channel];
                if data.bit(7) {
                    *freq = (*freq & 0x3F0) | u16::from(data & 0x0F);
                } else {
                    *freq = (*freq & 0x00F) | ((u16::from(data) << 4) & 0x3F0);
                }
            }
            Register::Noise => {
                self.noise.write_control(data);
                self.freq[NOISE_CHANNEL] = self.noise.period.reload_value();
            }
        }
    }

    /// Advance the chip by one clock. Each call steps exactly one channel's period counter.
    pub fn cycle(&mut self) {
        self.noise.clock(self.sign);

        if self.cycle == 0 {
            self.sign ^= self.inverse;
            self.inverse = 0;
        }

        let channel = self.cycle as usize;
        let mut counter = self.counter[channel];
        if counter >= self.freq[channel] {
            counter = 0;
            self.inverse |= 1 << channel;
        }
        self.counter[channel] = counter + 1;

        self.cycle = (self.cycle + 1) & 0x03;
        self.noise.reset_delay <<= 1;
    }

    pub fn reload_config(&mut self, config: &PsgConfig) {
        if self.config != *config {
            log::debug!("Reloading PSG config: {config:?}");
        }
        self.config = *config;
    }

    pub fn set_channel_muted(&mut self, channel: PsgChannel, muted: bool) {
        let config = self.config.with_muted(channel, muted);
        self.reload_config(&config);
    }

    #[inline]
    #[must_use]
    pub fn is_channel_muted(&self, channel: PsgChannel) -> bool {
        self.config.is_muted(channel)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PsgConfig {
        &self.config
    }

    #[must_use]
    pub fn registers(&self) -> PsgRegisters {
        PsgRegisters {
            latch: self.latch,
            tones: std::array::from_fn(|i| ToneRegisters {
                volume: self.volume[i],
                frequency: self.freq[i],
            }),
            noise: NoiseRegisters {
                volume: self.volume[NOISE_CHANNEL],
                period: self.noise.period,
                noise_type: self.noise.noise_type,
                data: self.noise.data,
            },
            debug: self.debug,
        }
    }

    #[inline]
    #[must_use]
    pub fn lfsr(&self) -> u16 {
        self.noise.lfsr
    }
}

impl Default for Ym7101Psg {
    fn default() -> Self {
        Self::new(PsgConfig::default())
    }
}
