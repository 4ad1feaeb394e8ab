#![no_std]

mod config;
mod constants;
mod transport;

pub use config::*;
pub use constants::*;
pub use transport::*;

/// Driver for a daisy chain of MAX7219 devices behind one chip-select line.
///
/// Devices are numbered 1..=N, where device N is the one furthest from the
/// controller. Every device shifts every byte, so writes are framed as:
///
/// * addressed: one frame holding N (register, value) pairs, sent for
///   device N first and device 1 last. Whatever is shifted in first ends up
///   in the furthest device when chip-select latches, so reversing this order
///   addresses the wrong device. Positions other than the target get
///   `(NoOp, 0)` and keep their state.
/// * broadcast: one frame per device holding a single pair, devices 1..N.
///
/// The driver owns its transport, so two frames can never interleave: every
/// operation takes `&mut self` and opens and closes its frames before
/// returning.
pub struct MAX7219Chain<B> {
    bus: B,
    chain_length: u8,
}

impl<B, E> MAX7219Chain<B>
where
    B: BusTransport<Error = E>,
{
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            chain_length: DEFAULT_CHAIN_LENGTH,
        }
    }

    pub fn destroy(self) -> B {
        self.bus
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn chain_length(&self) -> u8 {
        self.chain_length
    }

    /// Sets the number of chained devices and returns it. Zero is rejected.
    pub fn set_chain_length(&mut self, length: u8) -> Result<u8, MAX7219Error<E>> {
        if length == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("rejected chain length 0");
            return Err(MAX7219Error::InvalidDevice(length));
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("chain length {=u8} -> {=u8}", self.chain_length, length);
        self.chain_length = length;
        Ok(length)
    }

    /// Writes `value` to `register` of one device, no-op'ing the rest of the chain.
    pub fn write_register(
        &mut self,
        device_number: u8,
        register: Register,
        value: u8,
    ) -> Result<(), MAX7219Error<E>> {
        self.check_device(device_number)?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "addressed frame: device {=u8}/{=u8} {} = {=u8:#x}",
            device_number,
            self.chain_length,
            register,
            value
        );

        let target = (register.addr(), value);
        let no_op = (Register::NoOp.addr(), 0);
        let positions = (1..=self.chain_length).rev();
        self.frame(positions.map(|position| {
            if position == device_number {
                target
            } else {
                no_op
            }
        }))
    }

    /// Writes `value` to `register` of every device, one frame per device.
    pub fn broadcast(&mut self, register: Register, value: u8) -> Result<(), MAX7219Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "broadcast: {} = {=u8:#x} x{=u8}",
            register,
            value,
            self.chain_length
        );

        for _ in 1..=self.chain_length {
            self.frame(core::iter::once((register.addr(), value)))?;
        }
        Ok(())
    }

    pub fn configure(
        &mut self,
        device_number: u8,
        config: &DeviceConfig,
    ) -> Result<(), MAX7219Error<E>> {
        self.check_device(device_number)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("configure device {=u8}: {}", device_number, config);

        for (register, value) in config_writes(config) {
            self.write_register(device_number, register, value)?;
            self.bus.delay_microseconds(SETTLE_DELAY_US);
        }
        Ok(())
    }

    pub fn configure_all(&mut self, config: &DeviceConfig) -> Result<(), MAX7219Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("configure all {=u8} devices: {}", self.chain_length, config);

        for (register, value) in config_writes(config) {
            self.broadcast(register, value)?;
            self.bus.delay_microseconds(SETTLE_DELAY_US);
        }
        Ok(())
    }

    pub fn set_intensity(
        &mut self,
        device_number: u8,
        intensity: Intensity,
    ) -> Result<(), MAX7219Error<E>> {
        self.write_register(device_number, Register::Intensity, intensity.value())
    }

    pub fn set_intensity_all(&mut self, intensity: Intensity) -> Result<(), MAX7219Error<E>> {
        self.broadcast(Register::Intensity, intensity.value())
    }

    /// Leaves shutdown mode on one device.
    pub fn enable(&mut self, device_number: u8) -> Result<(), MAX7219Error<E>> {
        self.write_register(device_number, Register::Shutdown, shutdown::NORMAL_OPERATION)
    }

    /// Puts one device in shutdown mode. Digit data is retained.
    pub fn disable(&mut self, device_number: u8) -> Result<(), MAX7219Error<E>> {
        self.write_register(device_number, Register::Shutdown, shutdown::SHUTDOWN_MODE)
    }

    pub fn enable_all(&mut self) -> Result<(), MAX7219Error<E>> {
        self.broadcast(Register::Shutdown, shutdown::NORMAL_OPERATION)
    }

    pub fn disable_all(&mut self) -> Result<(), MAX7219Error<E>> {
        self.broadcast(Register::Shutdown, shutdown::SHUTDOWN_MODE)
    }

    /// Lights every segment of every device, overriding shutdown and digit data.
    pub fn set_test_mode(&mut self) -> Result<(), MAX7219Error<E>> {
        self.broadcast(Register::DisplayTest, display_test::DISPLAY_TEST_MODE)
    }

    pub fn clear_test_mode(&mut self) -> Result<(), MAX7219Error<E>> {
        self.broadcast(Register::DisplayTest, display_test::NORMAL_OPERATION)
    }

    /// Writes one digit register. `digit` is 1-based (1..=8 maps to `Digit0..=Digit7`).
    ///
    /// The digit is checked first, so an out-of-range digit reports
    /// `InvalidDigit` whatever the device number.
    pub fn write_digit(
        &mut self,
        device_number: u8,
        digit: u8,
        value: u8,
    ) -> Result<(), MAX7219Error<E>> {
        let register = match Register::digit(digit) {
            Some(register) => register,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("rejected digit {=u8}", digit);
                return Err(MAX7219Error::InvalidDigit(digit));
            }
        };
        self.write_register(device_number, register, value)
    }

    pub fn clear_digit(&mut self, device_number: u8, digit: u8) -> Result<(), MAX7219Error<E>> {
        self.write_digit(device_number, digit, digit_data::ALL_OFF)
    }

    /// Writes eight rows (digits 1..=8) to one device, stopping at the first error.
    pub fn write_rows(
        &mut self,
        device_number: u8,
        rows: &[u8; NUM_DIGITS as usize],
    ) -> Result<(), MAX7219Error<E>> {
        for (digit, &value) in (1..=NUM_DIGITS).zip(rows.iter()) {
            self.write_digit(device_number, digit, value)?;
        }
        Ok(())
    }

    pub fn fill_device(&mut self, device_number: u8) -> Result<(), MAX7219Error<E>> {
        self.write_rows(device_number, &[digit_data::ALL_ON; NUM_DIGITS as usize])
    }

    pub fn clear_device(&mut self, device_number: u8) -> Result<(), MAX7219Error<E>> {
        self.write_rows(device_number, &[digit_data::ALL_OFF; NUM_DIGITS as usize])
    }

    pub fn fill_all(&mut self) -> Result<(), MAX7219Error<E>> {
        for device_number in 1..=self.chain_length {
            self.fill_device(device_number)?;
        }
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), MAX7219Error<E>> {
        for device_number in 1..=self.chain_length {
            self.clear_device(device_number)?;
        }
        Ok(())
    }

    fn check_device(&self, device_number: u8) -> Result<(), MAX7219Error<E>> {
        if device_number == 0 || device_number > self.chain_length {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "rejected device {=u8}, chain length is {=u8}",
                device_number,
                self.chain_length
            );
            return Err(MAX7219Error::InvalidDevice(device_number));
        }
        Ok(())
    }

    /// Sends `pairs` inside one chip-select window.
    ///
    /// Chip-select is released even when a byte fails to go out; the first
    /// error is the one reported.
    fn frame<I>(&mut self, pairs: I) -> Result<(), MAX7219Error<E>>
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        self.bus.select(true)?;
        let bus = &mut self.bus;
        let sent = pairs.into_iter().try_for_each(|(register, value)| {
            bus.transmit_byte(register)?;
            bus.transmit_byte(value)
        });
        let released = self.bus.select(false);
        sent?;
        released?;
        Ok(())
    }
}

fn config_writes(config: &DeviceConfig) -> [(Register, u8); 3] {
    [
        (Register::DecodeMode, config.decode_mode),
        (Register::Intensity, config.intensity.value()),
        (Register::ScanLimit, config.scan_limit.value()),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MAX7219Error<E> {
    Transport(E),
    InvalidDevice(u8),
    InvalidDigit(u8),
}

impl<E> From<E> for MAX7219Error<E> {
    fn from(error: E) -> Self {
        MAX7219Error::Transport(error)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for MAX7219Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(error) => write!(f, "bus transport error: {:?}", error),
            Self::InvalidDevice(device) => write!(f, "device {} is not on the chain", device),
            Self::InvalidDigit(digit) => write!(f, "digit {} is outside 1..=8", digit),
        }
    }
}
