//! Measurement lines written to the serial stream.
//!
//! One line per reading: `<full> <ir> <elapsed ms> <gain code>`.

use ufmt::{uWrite, uwriteln};

use crate::gain::GainLevel;

/// A single measurement.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Reading {
    /// Full spectrum counts
    pub full: u16,
    /// Infrared counts
    pub ir: u16,
    /// Gain that will apply to the next reading
    pub gain: GainLevel,
}

impl Reading {
    pub fn write_line<W: uWrite>(&self, w: &mut W, elapsed_ms: u64) -> Result<(), W::Error> {
        uwriteln!(w, "{} {} {} {}", self.full, self.ir, elapsed_ms, self.gain.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line(String);

    impl uWrite for Line {
        type Error = ();
        fn write_str(&mut self, s: &str) -> Result<(), ()> {
            self.0.push_str(s);
            Ok(())
        }
    }

    fn line(reading: Reading, elapsed_ms: u64) -> String {
        let mut out = Line(String::new());
        reading.write_line(&mut out, elapsed_ms).unwrap();
        out.0
    }

    #[test]
    fn test_in_band_line() {
        let reading = Reading {
            full: 15000,
            ir: 4200,
            gain: GainLevel::Medium,
        };
        assert_eq!(line(reading, 1234), "15000 4200 1234 16\n");
    }

    #[test]
    fn test_gain_codes_in_line() {
        let reading = Reading {
            full: 40000,
            ir: 9000,
            gain: GainLevel::Low,
        };
        assert_eq!(line(reading, 0), "40000 9000 0 0\n");

        let reading = Reading {
            full: 0,
            ir: 0,
            gain: GainLevel::Maximum,
        };
        assert_eq!(line(reading, 4_294_967_296), "0 0 4294967296 48\n");
    }
}
