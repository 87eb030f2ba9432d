//! # PCA9685 Driver
//!
//! This is a driver for the NXP PCA9685 16-channel, 12-bit PWM controller.
//!
//! Specifically, this driver turns duty cycles, phase delays and PWM
//! frequencies into PCA9685 register values, writes them over I²C and reads
//! them back to check the chip took them. It does not manage the bus itself;
//! anything implementing [`Transport`] will do, and [`I2cTransport`] wraps
//! any `embedded-hal` blocking I²C peripheral.
//!
//! Each channel has a 12-bit on counter and off counter within a 4096-tick
//! period:
//!
//! * the duty cycle is the distance from the on tick to the off tick
//! * the phase delay is where the on tick sits within the period
//! * a flag bit on either counter forces the output fully on or fully off
//!
//! The period is set by an 8-bit prescale divisor of the 25 MHz internal
//! oscillator, giving 24 Hz to 1526 Hz.
//!
//! A [`Pca9685Builder`] describes where the chip is. Setting it up yields a
//! [`Pca9685`], which owns the bus and is the only way to drive the chip.
//! Call [`software_reset`] or [`software_reset_bus`] first to put every
//! PCA9685 on the bus back to its power-on state.
//!
//! # Example
//!
//! You might drive a board like this:
//!
//! ```rust
//! # use embedded_hal::blocking::i2c::{Read, Write, WriteRead};
//! # struct I2c;
//! # impl Write for I2c {
//! #     type Error = ();
//! #     fn write(&mut self, _address: u8, _bytes: &[u8]) -> Result<(), ()> {
//! #         Ok(())
//! #     }
//! # }
//! # impl WriteRead for I2c {
//! #     type Error = ();
//! #     fn write_read(&mut self, _address: u8, _bytes: &[u8], _buffer: &mut [u8]) -> Result<(), ()> {
//! #         Ok(())
//! #     }
//! # }
//! # impl Read for I2c {
//! #     type Error = ();
//! #     fn read(&mut self, _address: u8, _buffer: &mut [u8]) -> Result<(), ()> {
//! #         Ok(())
//! #     }
//! # }
//! # struct Delay;
//! # impl embedded_hal::blocking::delay::DelayMs<u8> for Delay {
//! #     fn delay_ms(&mut self, _ms: u8) {}
//! # }
//! # let i2c = I2c;
//! # let mut delay = Delay;
//! let mut bus = pca9685::I2cTransport::new(i2c);
//! if let Err(e) = pca9685::software_reset_bus(&mut bus) {
//!     // Bus can't do plain I²C
//! }
//! let mut builder = pca9685::Pca9685Builder::new("i2c1", pca9685::registers::DEFAULT_ADDRESS);
//! let mut board = match builder.attach(bus) {
//!     Ok(board) => board,
//!     Err(e) => return,
//! };
//! if let Err(e) = board.set_frequency(50, &mut delay) {
//!     // Chip didn't take the new prescale
//! }
//! if let Err(e) = board.set_phased_duty_cycle(0, 10, 20) {
//!     // Put the output somewhere safe
//!     let _ = board.set_full_off(0);
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]

mod board;
mod bus;
mod duty;
mod error;
mod prescale;
pub mod registers;
mod reset;
#[cfg(test)]
mod sim;

pub use board::{Pca9685, Pca9685Builder};
pub use bus::{
    verify_functionality, I2cTransport, Open, Transport, I2C_FUNC_I2C, I2C_FUNC_SMBUS_READ_BYTE,
    I2C_FUNC_SMBUS_READ_BYTE_DATA, I2C_FUNC_SMBUS_WRITE_BYTE, I2C_FUNC_SMBUS_WRITE_BYTE_DATA,
};
pub use duty::{encode, percent_to_ticks, ticks_to_percent, Counters, PERCENT_MAX};
pub use error::{Error, RangeError, VerificationError};
pub use prescale::{
    frequency_to_prescale, validate_prescale, FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ, PRESCALE_MAX,
    PRESCALE_MIN,
};
pub use reset::{software_reset, software_reset_bus};

//
// End of file
//
