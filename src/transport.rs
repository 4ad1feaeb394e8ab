use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Byte-level access to the chain: one chip-select line, one data bus.
///
/// A frame is everything transmitted between `select(true)` and
/// `select(false)`. Implementations only move bytes; framing is decided by
/// [`crate::MAX7219Chain`].
pub trait BusTransport {
    type Error;

    /// Drive chip-select. `true` opens a frame (line low), `false` latches it.
    fn select(&mut self, active: bool) -> Result<(), Self::Error>;

    /// Send one byte, blocking until the bus has accepted it.
    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    fn delay_microseconds(&mut self, us: u32);
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    type Error = T::Error;

    fn select(&mut self, active: bool) -> Result<(), Self::Error> {
        (**self).select(active)
    }

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).transmit_byte(byte)
    }

    fn delay_microseconds(&mut self, us: u32) {
        (**self).delay_microseconds(us)
    }
}

/// [`BusTransport`] over an embedded-hal SPI bus with a GPIO chip-select.
///
/// The bus must not manage CS itself (use a `SpiBus`, not a `SpiDevice`):
/// an addressed write keeps the line low across the pairs of every device
/// in the chain.
pub struct SpiTransport<SPI, CS, D> {
    spi: SPI,
    cs: CS,
    delay: D,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<S, P> {
    Spi(S),
    Pin(P),
}

impl<SPI, CS, D> SpiTransport<SPI, CS, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
{
    /// Takes the bus parts and parks chip-select high.
    ///
    /// The parts are consumed either way: if the pin refuses to go high,
    /// `spi`, `cs` and `delay` are dropped along with the error.
    pub fn new(
        spi: SPI,
        mut cs: CS,
        delay: D,
    ) -> Result<Self, TransportError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(TransportError::Pin)?;
        Ok(Self { spi, cs, delay })
    }

    pub fn release(self) -> (SPI, CS, D) {
        (self.spi, self.cs, self.delay)
    }
}

impl<SPI, CS, D> BusTransport for SpiTransport<SPI, CS, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
{
    type Error = TransportError<SPI::Error, CS::Error>;

    fn select(&mut self, active: bool) -> Result<(), Self::Error> {
        if active {
            self.cs.set_low().map_err(TransportError::Pin)
        } else {
            // CS goes high even when the flush fails; the flush error wins
            let flushed = self.spi.flush().map_err(TransportError::Spi);
            self.cs.set_high().map_err(TransportError::Pin)?;
            flushed
        }
    }

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.spi.write(&[byte]).map_err(TransportError::Spi)
    }

    fn delay_microseconds(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
