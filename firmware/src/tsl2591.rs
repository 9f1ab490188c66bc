//! Minimal blocking driver for the TSL2591 light-to-digital converter.
//!
//! Only what the gain loop needs: power-up, raw channel counts and the
//! gain / integration time bits of the CONTROL register.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::gain::{GainControl, GainLevel};

/// The I²C address of the TSL2591.
pub const ADDRESS: u8 = 0x29;

/// Command bit plus "normal operation" transaction type.
const COMMAND: u8 = 0xA0;

/// Value of the ID register.
const DEVICE_ID: u8 = 0x50;

const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

const CONTROL_AGAIN_MASK: u8 = 0b0011_0000;
const CONTROL_ATIME_MASK: u8 = 0b0000_0111;

#[derive(Copy, Clone)]
#[repr(u8)]
enum Register {
    Enable = 0x00,
    Control = 0x01,
    Id = 0x12,
    C0DataL = 0x14,
    C1DataL = 0x16,
}

/// ADC channels of the sensor.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Channel {
    /// Channel 0, visible plus infrared light
    FullSpectrum,
    /// Channel 1, infrared light only
    Infrared,
}

impl Channel {
    fn register(self) -> Register {
        match self {
            Self::FullSpectrum => Register::C0DataL,
            Self::Infrared => Register::C1DataL,
        }
    }
}

/// ADC integration time.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum IntegrationTime {
    Ms100 = 0b000,
    Ms200 = 0b001,
    Ms300 = 0b010,
    Ms400 = 0b011,
    Ms500 = 0b100,
    Ms600 = 0b101,
}

/// All possible errors in this module
#[derive(Debug, PartialEq, Clone)]
pub enum Tsl2591Error<E> {
    /// I²C bus error
    I2c(E),
    /// The ID register did not contain the expected value
    InvalidId(u8),
}

pub struct Tsl2591<I2C> {
    i2c: I2C,
}

impl<I2C, E> Tsl2591<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Destroy the driver and return the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Check the device ID, power up the ADCs and apply initial settings.
    pub fn init(
        &mut self,
        gain: GainLevel,
        integration_time: IntegrationTime,
    ) -> Result<(), Tsl2591Error<E>> {
        let id = self.read_register(Register::Id)?;
        if id != DEVICE_ID {
            return Err(Tsl2591Error::InvalidId(id));
        }
        self.write_register(Register::Control, gain.code() | integration_time as u8)?;
        self.write_register(Register::Enable, ENABLE_PON | ENABLE_AEN)
    }

    /// Read the raw 16 bit count of a channel.
    pub fn luminosity(&mut self, channel: Channel) -> Result<u16, Tsl2591Error<E>> {
        let mut buf = [0; 2];
        self.i2c
            .write_read(ADDRESS, &[COMMAND | channel.register() as u8], &mut buf)
            .map_err(Tsl2591Error::I2c)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read the currently configured gain.
    pub fn gain(&mut self) -> Result<GainLevel, Tsl2591Error<E>> {
        let control = self.read_register(Register::Control)?;
        Ok(GainLevel::from_bits(control))
    }

    pub fn set_gain(&mut self, gain: GainLevel) -> Result<(), Tsl2591Error<E>> {
        let control = self.read_register(Register::Control)?;
        self.write_register(
            Register::Control,
            (control & !CONTROL_AGAIN_MASK) | gain.code(),
        )
    }

    pub fn set_integration_time(
        &mut self,
        integration_time: IntegrationTime,
    ) -> Result<(), Tsl2591Error<E>> {
        let control = self.read_register(Register::Control)?;
        self.write_register(
            Register::Control,
            (control & !CONTROL_ATIME_MASK) | integration_time as u8,
        )
    }

    fn read_register(&mut self, register: Register) -> Result<u8, Tsl2591Error<E>> {
        let mut buf = [0; 1];
        self.i2c
            .write_read(ADDRESS, &[COMMAND | register as u8], &mut buf)
            .map_err(Tsl2591Error::I2c)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<(), Tsl2591Error<E>> {
        self.i2c
            .write(ADDRESS, &[COMMAND | register as u8, value])
            .map_err(Tsl2591Error::I2c)
    }
}

impl<I2C, E> GainControl for Tsl2591<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    type Error = Tsl2591Error<E>;

    fn read_gain(&mut self) -> Result<GainLevel, Self::Error> {
        self.gain()
    }

    fn write_gain(&mut self, gain: GainLevel) -> Result<(), Self::Error> {
        self.set_gain(gain)
    }
}
