//! One PCA9685 on one bus.
//!
//! A board starts life as a [`Pca9685Builder`], which only knows where the
//! chip is. [`Pca9685Builder::setup`] opens and checks the bus and hands back
//! a [`Pca9685`], the only type that can talk to the chip.

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::{verify_functionality, Open, Transport, I2C_FUNC_I2C};
use crate::duty::{self, Counters};
use crate::error::{Error, RangeError, VerificationError};
use crate::prescale::{frequency_to_prescale, validate_prescale};
use crate::registers::{
    led_register, LedRegister, Register, CHANNEL_COUNT, MAX_ADDRESS, MODE1_RESTART, MODE1_SLEEP,
    PRESCALE_SETTLE_MS,
};

//
// Public Types
//

/// A PCA9685 which has not been set up yet.
#[derive(Debug)]
pub struct Pca9685Builder<'a> {
    bus_path: &'a str,
    address: u8,
    functionality: Option<u64>,
}

/// A PCA9685 with an open, verified bus.
///
/// Owns the bus handle for as long as it lives. Use [`Pca9685::release`] to
/// get the bus back.
pub struct Pca9685<B> {
    bus: B,
    address: u8,
    functionality: u64,
}

//
// Private Functions
//

fn check_channel(channel: u8) -> Result<u8, RangeError> {
    if channel < CHANNEL_COUNT {
        Ok(channel)
    } else {
        Err(RangeError::Channel(channel))
    }
}

//
// impls on Public Types
//

impl<'a> Pca9685Builder<'a> {
    /// Describe a PCA9685 at 7-bit `address` on the bus at `bus_path`.
    ///
    /// Nothing is opened until [`Pca9685Builder::setup`].
    pub fn new(bus_path: &'a str, address: u8) -> Pca9685Builder<'a> {
        Pca9685Builder {
            bus_path,
            address,
            functionality: None,
        }
    }

    /// The bus this board lives on
    pub fn bus_path(&self) -> &'a str {
        self.bus_path
    }

    /// The device address of this board
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Whether this builder has already produced a board
    pub fn is_configured(&self) -> bool {
        self.functionality.is_some()
    }

    /// The capability bitmask probed during setup, if setup has happened.
    pub fn functionality(&self) -> Option<u64> {
        if self.functionality.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("PCA9685 functionality queried before setup");
        }
        self.functionality
    }

    /// Open the bus, check it and start talking to the chip.
    ///
    /// Fails with [`Error::Configuration`] if this builder already produced
    /// a board, and with [`Error::Capability`] if the bus cannot do plain
    /// I²C.
    pub fn setup<O>(
        &mut self,
        opener: &mut O,
    ) -> Result<Pca9685<O::Bus>, Error<<O::Bus as Transport>::Error>>
    where
        O: Open,
    {
        if self.is_configured() {
            return Err(Error::Configuration);
        }
        let bus = opener.open(self.bus_path).map_err(Error::Bus)?;
        self.attach(bus)
    }

    /// As [`Pca9685Builder::setup`], for a bus which is already open.
    pub fn attach<B>(&mut self, mut bus: B) -> Result<Pca9685<B>, Error<B::Error>>
    where
        B: Transport,
    {
        if self.is_configured() {
            return Err(Error::Configuration);
        }
        if self.address > MAX_ADDRESS {
            return Err(RangeError::Address(self.address).into());
        }
        let functionality = bus.functionality().map_err(Error::Bus)?;
        if !verify_functionality(functionality, I2C_FUNC_I2C) {
            return Err(Error::Capability { functionality });
        }
        bus.init_comms(self.address).map_err(Error::Bus)?;
        self.functionality = Some(functionality);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "PCA9685 at 0x{:02x} on {} set up",
            self.address,
            self.bus_path
        );
        Ok(Pca9685 {
            bus,
            address: self.address,
            functionality,
        })
    }
}

impl<B> Pca9685<B>
where
    B: Transport,
{
    /// Open the bus at `bus_path` and set up the PCA9685 at `address`.
    pub fn open<O>(opener: &mut O, bus_path: &str, address: u8) -> Result<Self, Error<B::Error>>
    where
        O: Open<Bus = B>,
    {
        Pca9685Builder::new(bus_path, address).setup(opener)
    }

    /// The bus handle
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// The bus handle, mutably. Raw transfers here bypass all checks.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// The device address of this board
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The capability bitmask the bus reported during setup
    pub fn functionality(&self) -> u64 {
        self.functionality
    }

    /// Give back the bus handle.
    pub fn release(self) -> B {
        self.bus
    }

    /// Write one register
    fn write(&mut self, register: u8, value: u8) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Setting PCA9685 0x{:02x} to 0x{:02x}", register, value);
        self.bus.write_register(register, value).map_err(Error::Bus)
    }

    /// Read one register
    fn read(&mut self, register: u8) -> Result<u8, Error<B::Error>> {
        self.bus.read_register(register).map_err(Error::Bus)
    }

    /// Write the four counter registers of a channel, low byte first.
    fn write_counters(&mut self, channel: u8, counters: Counters) -> Result<(), Error<B::Error>> {
        for (role, byte) in LedRegister::ALL.iter().zip(counters.to_registers()) {
            self.write(led_register(channel, *role), byte)?;
        }
        Ok(())
    }

    /// Set the PWM frequency, in Hz.
    ///
    /// The chip can only approximate most frequencies. Returns the prescale
    /// that was committed; use [`Pca9685::set_prescale`] directly if you need
    /// exact control.
    pub fn set_frequency<D>(&mut self, hz: u16, delay: &mut D) -> Result<u8, Error<B::Error>>
    where
        D: DelayMs<u8>,
    {
        let prescale = frequency_to_prescale(hz)?;
        self.set_prescale(prescale, delay)?;
        Ok(prescale)
    }

    /// Set the prescale divisor and check the chip took it.
    ///
    /// The chip only accepts a new prescale while asleep, so this sleeps the
    /// chip, writes the prescale, waits for the oscillator and restarts.
    pub fn set_prescale<D>(&mut self, prescale: u8, delay: &mut D) -> Result<(), Error<B::Error>>
    where
        D: DelayMs<u8>,
    {
        let prescale = validate_prescale(prescale)?;
        self.write(Register::Mode1.into(), MODE1_SLEEP)?;
        self.write(Register::Prescale.into(), prescale)?;
        delay.delay_ms(PRESCALE_SETTLE_MS);
        self.write(Register::Mode1.into(), MODE1_RESTART)?;

        let actual = self.get_prescale()?;
        if actual != prescale {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "PCA9685 prescale is 0x{:02x}, wanted 0x{:02x}",
                actual,
                prescale
            );
            return Err(VerificationError::Prescale {
                expected: prescale,
                actual,
            }
            .into());
        }
        Ok(())
    }

    /// Read the prescale register.
    pub fn get_prescale(&mut self) -> Result<u8, Error<B::Error>> {
        let prescale = self.read(Register::Prescale.into())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 prescale is 0x{:02x}", prescale);
        Ok(prescale)
    }

    /// Set a channel's duty cycle, in percent, with the output going high at
    /// the start of the period.
    pub fn set_duty_cycle(&mut self, channel: u8, duty: u8) -> Result<(), Error<B::Error>> {
        self.set_phased_duty_cycle(channel, 0, duty)
    }

    /// Set a channel's duty cycle, with the output going high `delay`
    /// percent into the period.
    ///
    /// `(0, 0)` turns the channel fully off and `(0, 100)` fully on. Other
    /// combinations must fit inside one period (`0 < delay + duty < 100`).
    /// The counters are read back afterwards, and a mismatch is reported as
    /// [`VerificationError::DutyCycle`].
    pub fn set_phased_duty_cycle(
        &mut self,
        channel: u8,
        delay: u8,
        duty: u8,
    ) -> Result<(), Error<B::Error>> {
        let channel = check_channel(channel)?;
        let counters = duty::encode(delay, duty)?;
        if counters.full_off {
            return self.set_full_off(channel);
        }
        if counters.full_on {
            return self.set_full_on(channel);
        }

        self.write_counters(channel, counters)?;
        let actual = self.get_duty_cycle(channel)?;
        if actual != duty {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "PCA9685 channel {} duty is {}%, wanted {}%",
                channel,
                actual,
                duty
            );
            return Err(VerificationError::DutyCycle {
                channel,
                expected: duty,
                actual,
            }
            .into());
        }
        Ok(())
    }

    /// Force a channel's output permanently high.
    pub fn set_full_on(&mut self, channel: u8) -> Result<(), Error<B::Error>> {
        let channel = check_channel(channel)?;
        self.write_counters(channel, Counters::FULL_ON)
    }

    /// Force a channel's output permanently low.
    ///
    /// Needs nothing but a working bus, so it is safe to call after any
    /// other operation failed.
    pub fn set_full_off(&mut self, channel: u8) -> Result<(), Error<B::Error>> {
        let channel = check_channel(channel)?;
        self.write_counters(channel, Counters::FULL_OFF)
    }

    /// Force every channel's output permanently low, through the all-channel
    /// registers.
    pub fn set_all_full_off(&mut self) -> Result<(), Error<B::Error>> {
        let registers = [
            Register::AllLedOnLow,
            Register::AllLedOnHigh,
            Register::AllLedOffLow,
            Register::AllLedOffHigh,
        ];
        for (register, byte) in registers.iter().zip(Counters::FULL_OFF.to_registers()) {
            self.write((*register).into(), byte)?;
        }
        Ok(())
    }

    /// Read a channel's raw counters.
    pub fn read_counters(&mut self, channel: u8) -> Result<Counters, Error<B::Error>> {
        let channel = check_channel(channel)?;
        let mut bytes = [0u8; 4];
        for (role, byte) in LedRegister::ALL.iter().zip(bytes.iter_mut()) {
            *byte = self.read(led_register(channel, *role))?;
        }
        Ok(Counters::from_registers(bytes))
    }

    /// Read a channel's duty cycle, rounded to a whole percent.
    pub fn get_duty_cycle(&mut self, channel: u8) -> Result<u8, Error<B::Error>> {
        let counters = self.read_counters(channel)?;
        let duty = counters.duty_percent();
        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 channel {} duty is {}%", channel, duty);
        Ok(duty)
    }
}


//
// End of file
//
