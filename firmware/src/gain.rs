//! Automatic gain adjustment for the light sensor.
//!
//! The gain level itself is owned by the sensor. The controller only reads
//! it and requests a step to a neighbouring level, one step per reading.

/// Analog gain of the sensor, ordered from lowest to highest amplification.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub enum GainLevel {
    Low,
    Medium,
    High,
    Maximum,
}

impl GainLevel {
    /// Decode the gain from the AGAIN bits (5:4) of the CONTROL register.
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 4) & 0b11 {
            0b00 => Self::Low,
            0b01 => Self::Medium,
            0b10 => Self::High,
            _ => Self::Maximum,
        }
    }

    /// The gain as it is encoded in the CONTROL register.
    ///
    /// This is also the gain code that is written to the serial stream.
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 0x00,
            Self::Medium => 0x10,
            Self::High => 0x20,
            Self::Maximum => 0x30,
        }
    }

    /// The next lower gain level, if any.
    pub fn step_down(self) -> Option<Self> {
        match self {
            Self::Low => None,
            Self::Medium => Some(Self::Low),
            Self::High => Some(Self::Medium),
            Self::Maximum => Some(Self::High),
        }
    }

    /// The next higher gain level, if any.
    pub fn step_up(self) -> Option<Self> {
        match self {
            Self::Low => Some(Self::Medium),
            Self::Medium => Some(Self::High),
            Self::High => Some(Self::Maximum),
            Self::Maximum => None,
        }
    }
}

/// Access to the gain setting held by a sensor.
pub trait GainControl {
    type Error;

    fn read_gain(&mut self) -> Result<GainLevel, Self::Error>;
    fn write_gain(&mut self, gain: GainLevel) -> Result<(), Self::Error>;
}

/// Closed-loop gain controller.
pub struct GainController {
    /// Full spectrum counts above this value are considered saturated
    threshold_high: u16,
    /// Full spectrum counts below this value are considered under-ranged
    threshold_low: u16,
}

impl GainController {
    pub fn new(threshold_high: u16, threshold_low: u16) -> Self {
        Self {
            threshold_high,
            threshold_low,
        }
    }

    /// Decide which gain level should follow `current` after reading `full`.
    ///
    /// Returns `None` if the gain should be left alone.
    pub fn next_gain(&self, full: u16, current: GainLevel) -> Option<GainLevel> {
        if full > self.threshold_high {
            current.step_down()
        } else if full < self.threshold_low {
            current.step_up()
        } else {
            None
        }
    }

    /// Adjust the sensor gain based on the latest full spectrum reading.
    ///
    /// The gain is only written if a step is taken. The returned level is
    /// read back from the sensor afterwards, so it reflects what is actually
    /// configured for the next reading.
    pub fn update<S: GainControl>(&self, sensor: &mut S, full: u16) -> Result<GainLevel, S::Error> {
        let current = sensor.read_gain()?;
        match self.next_gain(full, current) {
            Some(next) => {
                sensor.write_gain(next)?;
                sensor.read_gain()
            }
            None => Ok(current),
        }
    }
}
