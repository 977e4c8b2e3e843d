use super::{NOISE_CHANNEL, SILENT, Ym7101Psg};
use crate::num::GetBit;
use ym7101_config::{DebugSelector, PsgChannel};

// Approximate analog level for attenuation 0-15; index 16 is the level the test mode drives onto
// the three channels that are not being observed
pub(super) const ATTENUATION_TO_VOLUME: [f32; 17] = [
    1.0, 0.772, 0.622, 0.485, 0.382, 0.29, 0.229, 0.174, 0.132, 0.096, 0.072, 0.051, 0.034, 0.019,
    0.009, 0.0, -1.059,
];

const REFERENCE_LEVEL: usize = 16;

impl Ym7101Psg {
    fn update_outputs(&mut self) {
        if self.debug.bit(0) {
            self.output = self.volume;
            return;
        }

        for channel in 0..NOISE_CHANNEL {
            self.output[channel] =
                if self.sign.bit(channel as u8) { self.volume[channel] } else { SILENT };
        }
        self.output[NOISE_CHANNEL] =
            if self.noise.lfsr.bit(14) { self.volume[NOISE_CHANNEL] } else { SILENT };
    }

    /// Digital output: channel 0's level in the highest nibble through the noise channel's in the
    /// lowest. 0 is loudest and 15 is silent.
    #[must_use]
    pub fn read(&mut self) -> u16 {
        self.update_outputs();

        self.output.iter().fold(0, |sample, &level| (sample << 4) | u16::from(level))
    }

    #[must_use]
    pub fn channel_output(&mut self, channel: PsgChannel) -> u8 {
        self.update_outputs();

        self.output[channel.index()]
    }

    /// Analog output: the sum of every channel's volume table entry. In test mode only the
    /// selected channel is summed, on top of three reference level contributions.
    #[must_use]
    pub fn sample(&mut self) -> f32 {
        self.update_outputs();

        if let Some(selector) = self.debug_mode() {
            return 3.0 * ATTENUATION_TO_VOLUME[REFERENCE_LEVEL]
                + ATTENUATION_TO_VOLUME[self.mixed_level(selector.channel())];
        }

        let mut sample = 0.0;
        for channel in PsgChannel::ALL {
            sample += ATTENUATION_TO_VOLUME[self.mixed_level(channel)];
        }
        sample
    }

    fn mixed_level(&self, channel: PsgChannel) -> usize {
        if self.config.is_muted(channel) {
            return SILENT.into();
        }

        self.output[channel.index()].into()
    }

    /// Latch the test mode bits (9-11) of the VDP debug register
    pub fn set_debug_bits(&mut self, data: u16) {
        let debug = data.bits(9..=11) as u8;
        if debug != self.debug {
            log::debug!("PSG debug bits set to {debug:03b}");
        }
        self.debug = debug;
    }

    #[must_use]
    pub fn debug_mode(&self) -> Option<DebugSelector> {
        self.debug.bit(0).then(|| DebugSelector::from_bits(self.debug >> 1))
    }
}
