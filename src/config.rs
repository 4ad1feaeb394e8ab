use crate::constants::{decode_mode, MAX_INTENSITY};

/// PWM brightness, the lower nibble of the intensity register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: Intensity = Intensity(0);
    pub const MAX: Intensity = Intensity(MAX_INTENSITY);

    pub const fn new(level: u8) -> Option<Self> {
        if level > MAX_INTENSITY {
            None
        } else {
            Some(Intensity(level))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity(8)
    }
}

/// Number of digits multiplexed by the scan circuitry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ScanLimit {
    Digits1 = 0,
    Digits2,
    Digits3,
    Digits4,
    Digits5,
    Digits6,
    Digits7,
    #[default]
    Digits8,
}

impl ScanLimit {
    pub const fn from_digit_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(ScanLimit::Digits1),
            2 => Some(ScanLimit::Digits2),
            3 => Some(ScanLimit::Digits3),
            4 => Some(ScanLimit::Digits4),
            5 => Some(ScanLimit::Digits5),
            6 => Some(ScanLimit::Digits6),
            7 => Some(ScanLimit::Digits7),
            8 => Some(ScanLimit::Digits8),
            _ => None,
        }
    }

    pub const fn digit_count(self) -> u8 {
        self as u8 + 1
    }

    /// Raw scan-limit register value, 0..=7.
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Settings written by `configure` / `configure_all`.
///
/// `decode_mode` is passed to the chip verbatim: each set bit enables
/// code B decoding for the matching digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub decode_mode: u8,
    pub intensity: Intensity,
    pub scan_limit: ScanLimit,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            decode_mode: decode_mode::NO_DECODE,
            intensity: Intensity::default(),
            scan_limit: ScanLimit::default(),
        }
    }
}
