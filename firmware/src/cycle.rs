//! One pass of the measurement loop.

use embedded_hal::blocking::i2c::{Write, WriteRead};
use ufmt::uWrite;

use crate::{
    errors::Error,
    gain::GainController,
    report::Reading,
    tsl2591::{Channel, Tsl2591},
};

/// Read both channels, adjust the gain and write one line to `out`.
///
/// Both channels are read before the gain is touched. If a read fails the
/// gain is left alone and nothing is written.
pub fn run<I2C, E, W>(
    sensor: &mut Tsl2591<I2C>,
    controller: &GainController,
    out: &mut W,
    elapsed_ms: u64,
) -> Result<Reading, Error>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    W: uWrite<Error = Error>,
{
    let full = sensor
        .luminosity(Channel::FullSpectrum)
        .map_err(|_| Error::SensorReadFailed)?;
    let ir = sensor
        .luminosity(Channel::Infrared)
        .map_err(|_| Error::SensorReadFailed)?;
    let gain = controller
        .update(sensor, full)
        .map_err(|_| Error::GainSetFailed)?;

    let reading = Reading { full, ir, gain };
    reading.write_line(out, elapsed_ms)?;
    Ok(reading)
}
