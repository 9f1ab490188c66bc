//! Error handling.

use heapless::spsc::Queue;

/// All possible error types
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Error {
    SensorInitFailed,
    SensorReadFailed,
    GainSetFailed,
    UfmtSerialWriteError,
}

impl Error {
    pub fn log<const N: usize>(&self, queue: &mut Queue<Self, N>) {
        match queue.enqueue(*self) {
            Ok(()) => { /* Enqueued */ }
            Err(e) => {
                // Queue full, drop the oldest value and try again
                queue.dequeue();
                queue.enqueue(e).ok();
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::SensorInitFailed => "TSL2591: Initialization failed",
            Self::SensorReadFailed => "TSL2591: Reading luminosity failed",
            Self::GainSetFailed => "TSL2591: Adjusting gain failed",
            Self::UfmtSerialWriteError => "Write serial line using ufmt failed",
        }
    }
}
