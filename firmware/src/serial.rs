//! Helpers for using the serial port.

use embedded_hal::serial::Write;

use crate::errors::Error;

/// Line rate of the measurement stream
pub const BAUD_RATE: u32 = 9600;

/// Wrapper for a serial transmitter that supports ufmt
pub struct SerialWriter<'a, W>(pub &'a mut W);

impl<'a, W> ufmt::uWrite for SerialWriter<'a, W>
where
    W: Write<u8>,
{
    type Error = Error;
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            nb::block!(self.0.write(byte)).map_err(|_| Error::UfmtSerialWriteError)?;
        }
        Ok(())
    }
}
