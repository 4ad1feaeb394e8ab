pub const DEFAULT_CHAIN_LENGTH: u8 = 1;
pub const NUM_DIGITS: u8 = 8;
pub const MAX_INTENSITY: u8 = 15; // 4 bits
pub const SETTLE_DELAY_US: u32 = 1;

/// Digit and control registers of a MAX7219.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Digit register for a 1-based digit number, `None` outside 1..=8.
    pub const fn digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Register::Digit0),
            2 => Some(Register::Digit1),
            3 => Some(Register::Digit2),
            4 => Some(Register::Digit3),
            5 => Some(Register::Digit4),
            6 => Some(Register::Digit5),
            7 => Some(Register::Digit6),
            8 => Some(Register::Digit7),
            _ => None,
        }
    }
}

pub mod decode_mode {
    pub const NO_DECODE: u8 = 0x00; // no decode for digits 7:0
    pub const DECODE_ALL: u8 = 0xFF; // code B decode for digits 7:0
}

pub mod shutdown {
    pub const SHUTDOWN_MODE: u8 = 0x00;
    pub const NORMAL_OPERATION: u8 = 0x01;
}

pub mod display_test {
    pub const NORMAL_OPERATION: u8 = 0x00;
    pub const DISPLAY_TEST_MODE: u8 = 0x01;
}

pub mod digit_data {
    pub const ALL_OFF: u8 = 0x00;
    pub const ALL_ON: u8 = 0xFF;
}
