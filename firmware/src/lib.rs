// This module is only used as an entry point for unit testing.
#![cfg_attr(not(test), no_std)]

#[cfg(test)]
mod cycle;
#[cfg(test)]
mod errors;
#[cfg(test)]
mod gain;
#[cfg(test)]
mod report;
#[cfg(test)]
mod serial;
#[cfg(test)]
mod tsl2591;
