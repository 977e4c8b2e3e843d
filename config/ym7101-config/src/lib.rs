//! Host-facing configuration types for the YM7101 PSG core

use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PsgChannelError {
    #[error("invalid PSG channel index: {0}")]
    InvalidIndex(u8),
    #[error("invalid PsgChannel string: '{0}'")]
    InvalidName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid PSG debug selector: {0}")]
pub struct DebugSelectorError(pub u8);

/// One of the four PSG channels, in register order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PsgChannel {
    #[default]
    Tone0,
    Tone1,
    Tone2,
    Noise,
}

impl PsgChannel {
    pub const ALL: [Self; 4] = [Self::Tone0, Self::Tone1, Self::Tone2, Self::Noise];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Tone0 => "Tone0",
            Self::Tone1 => "Tone1",
            Self::Tone2 => "Tone2",
            Self::Noise => "Noise",
        }
    }
}

impl Display for PsgChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for PsgChannel {
    type Err = PsgChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tone0" => Ok(Self::Tone0),
            "tone1" => Ok(Self::Tone1),
            "tone2" => Ok(Self::Tone2),
            "noise" => Ok(Self::Noise),
            _ => Err(PsgChannelError::InvalidName(s.into())),
        }
    }
}

impl TryFrom<u8> for PsgChannel {
    type Error = PsgChannelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(PsgChannelError::InvalidIndex(value))
    }
}

pub const DEBUG_CONTROL_SHIFT: u16 = 9;

/// Channel selected for isolation in the manufacturer test mode.
///
/// The 2-bit selector does not follow register order: selectors 0-3 map to channels 0, 2, 1, 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DebugSelector {
    #[default]
    Tone0,
    Tone2,
    Tone1,
    Noise,
}

impl DebugSelector {
    pub const ALL: [Self; 4] = [Self::Tone0, Self::Tone2, Self::Tone1, Self::Noise];

    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x03) as usize]
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn channel(self) -> PsgChannel {
        match self {
            Self::Tone0 => PsgChannel::Tone0,
            Self::Tone2 => PsgChannel::Tone2,
            Self::Tone1 => PsgChannel::Tone1,
            Self::Noise => PsgChannel::Noise,
        }
    }

    /// Debug control word that enables test mode with this selector
    #[must_use]
    pub fn to_control_word(self) -> u16 {
        (u16::from(self.bits() << 1) | 0x01) << DEBUG_CONTROL_SHIFT
    }
}

impl TryFrom<u8> for DebugSelector {
    type Error = DebugSelectorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(DebugSelectorError(value))
    }
}

/// Host-side channel mutes. These only affect the mixed analog sample, never the chip's digital
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsgConfig {
    pub mute_tone_0: bool,
    pub mute_tone_1: bool,
    pub mute_tone_2: bool,
    pub mute_noise: bool,
}

impl PsgConfig {
    #[inline]
    #[must_use]
    pub fn is_muted(&self, channel: PsgChannel) -> bool {
        match channel {
            PsgChannel::Tone0 => self.mute_tone_0,
            PsgChannel::Tone1 => self.mute_tone_1,
            PsgChannel::Tone2 => self.mute_tone_2,
            PsgChannel::Noise => self.mute_noise,
        }
    }

    #[must_use]
    pub fn with_muted(mut self, channel: PsgChannel, muted: bool) -> Self {
        let field = match channel {
            PsgChannel::Tone0 => &mut self.mute_tone_0,
            PsgChannel::Tone1 => &mut self.mute_tone_1,
            PsgChannel::Tone2 => &mut self.mute_tone_2,
            PsgChannel::Noise => &mut self.mute_noise,
        };
        *field = muted;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn channel_from_str() {
        assert_eq!(Ok(PsgChannel::Tone1), "tone1".parse());
        assert_eq!(Ok(PsgChannel::Noise), "NOISE".parse());
        assert_eq!(
            Err(PsgChannelError::InvalidName("tone3".into())),
            "tone3".parse::<PsgChannel>()
        );

        for channel in PsgChannel::ALL {
            assert_eq!(Ok(channel), channel.to_string().parse());
        }
    }

    #[test]
    fn channel_from_index() {
        for (i, channel) in PsgChannel::ALL.into_iter().enumerate() {
            assert_eq!(Ok(channel), PsgChannel::try_from(i as u8));
            assert_eq!(i, channel.index());
        }
        assert_eq!(Err(PsgChannelError::InvalidIndex(4)), PsgChannel::try_from(4));
    }

    #[test]
    fn debug_selector_permutation() {
        let channels: Vec<_> = (0..4).map(|bits| DebugSelector::from_bits(bits).channel()).collect();
        assert_eq!(
            vec![PsgChannel::Tone0, PsgChannel::Tone2, PsgChannel::Tone1, PsgChannel::Noise],
            channels
        );

        // Upper bits are masked
        assert_eq!(DebugSelector::Tone1, DebugSelector::from_bits(0x06));
        assert_eq!(Err(DebugSelectorError(4)), DebugSelector::try_from(4));
    }

    #[test]
    fn debug_control_word() {
        assert_eq!(0x0200, DebugSelector::Tone0.to_control_word());
        assert_eq!(0x0600, DebugSelector::Tone2.to_control_word());
        assert_eq!(0x0A00, DebugSelector::Tone1.to_control_word());
        assert_eq!(0x0E00, DebugSelector::Noise.to_control_word());
    }

    #[test]
    fn mute_config() {
        let config = PsgConfig::default();
        assert!(PsgChannel::ALL.into_iter().all(|channel| !config.is_muted(channel)));

        let config = config.with_muted(PsgChannel::Tone2, true);
        assert!(config.mute_tone_2);
        assert!(config.is_muted(PsgChannel::Tone2));
        assert!(!config.is_muted(PsgChannel::Noise));

        let config = config.with_muted(PsgChannel::Tone2, false);
        assert_eq!(PsgConfig::default(), config);
    }
}
