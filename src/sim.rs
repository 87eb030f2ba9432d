//! A simulated PCA9685 register file, for tests.

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::{Open, Transport, I2C_FUNC_I2C};
use crate::registers::{
    led_register, LedRegister, Register, CHANNEL_COUNT, DEFAULT_ADDRESS, GENERAL_CALL_ADDRESS,
    LED_FULL, MODE1_DEFAULT, MODE1_SLEEP, MODE2_DEFAULT, PRESCALE_DEFAULT, SOFTWARE_RESET,
};

/// Bus failure injected by a test
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct SimError;

/// One call made on the simulated bus
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    Probe,
    Init(u8),
    WriteByte(u8),
    Write(u8, u8),
    ReadByte,
    Read(u8),
}

pub(crate) struct SimulatedChip {
    pub registers: [u8; 256],
    pub address: u8,
    pub functionality: u64,
    pub target: Option<u8>,
    pub log: Vec<Op>,
    /// Registers which silently ignore writes
    pub stuck: Vec<u8>,
    pub fail: bool,
}

impl SimulatedChip {
    pub fn new() -> Self {
        let mut chip = SimulatedChip {
            registers: [0; 256],
            address: DEFAULT_ADDRESS,
            functionality: I2C_FUNC_I2C,
            target: None,
            log: Vec::new(),
            stuck: Vec::new(),
            fail: false,
        };
        chip.power_on();
        chip
    }

    fn power_on(&mut self) {
        self.registers = [0; 256];
        self.registers[Register::Mode1 as usize] = MODE1_DEFAULT;
        self.registers[Register::Mode2 as usize] = MODE2_DEFAULT;
        self.registers[Register::Prescale as usize] = PRESCALE_DEFAULT;
        for channel in 0..CHANNEL_COUNT {
            self.registers[led_register(channel, LedRegister::OffHigh) as usize] = LED_FULL;
        }
    }

    /// Scribble over every channel, so a reset is observable.
    pub fn scramble(&mut self) {
        self.registers[Register::Prescale as usize] = 0x03;
        self.registers[Register::Mode1 as usize] = 0x00;
        for channel in 0..CHANNEL_COUNT {
            self.registers[led_register(channel, LedRegister::OffLow) as usize] = 0x55;
            self.registers[led_register(channel, LedRegister::OffHigh) as usize] = 0x05;
        }
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|op| match op {
                Op::Write(register, byte) => Some((*register, *byte)),
                _ => None,
            })
            .collect()
    }

    fn check(&self) -> Result<(), SimError> {
        if self.fail {
            Err(SimError)
        } else {
            Ok(())
        }
    }

    fn store(&mut self, register: u8, byte: u8) {
        if self.stuck.contains(&register) {
            return;
        }
        let sleeping = self.registers[Register::Mode1 as usize] & MODE1_SLEEP != 0;
        match register {
            // only latched while the oscillator is off
            r if r == Register::Prescale as u8 && !sleeping => {}
            r if (Register::AllLedOnLow as u8..=Register::AllLedOffHigh as u8).contains(&r) => {
                let offset = r - Register::AllLedOnLow as u8;
                for channel in 0..CHANNEL_COUNT {
                    let target = led_register(channel, LedRegister::OnLow) + offset;
                    self.registers[target as usize] = byte;
                }
            }
            _ => self.registers[register as usize] = byte,
        }
    }
}

impl Transport for SimulatedChip {
    type Error = SimError;

    fn functionality(&mut self) -> Result<u64, SimError> {
        self.check()?;
        self.log.push(Op::Probe);
        Ok(self.functionality)
    }

    fn init_comms(&mut self, address: u8) -> Result<(), SimError> {
        self.check()?;
        self.log.push(Op::Init(address));
        self.target = Some(address);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SimError> {
        self.check()?;
        self.log.push(Op::WriteByte(byte));
        if self.target == Some(GENERAL_CALL_ADDRESS) && byte == SOFTWARE_RESET {
            self.power_on();
        }
        Ok(())
    }

    fn write_register(&mut self, register: u8, byte: u8) -> Result<(), SimError> {
        self.check()?;
        self.log.push(Op::Write(register, byte));
        if self.target == Some(self.address) {
            self.store(register, byte);
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, SimError> {
        self.check()?;
        self.log.push(Op::ReadByte);
        Ok(0)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, SimError> {
        self.check()?;
        self.log.push(Op::Read(register));
        let write_only =
            (Register::AllLedOnLow as u8..=Register::AllLedOffHigh as u8).contains(&register);
        if self.target != Some(self.address) || write_only {
            return Ok(0);
        }
        Ok(self.registers[register as usize])
    }
}

/// Hands out one simulated chip, remembering which paths were opened
pub(crate) struct SimOpener {
    pub chip: Option<SimulatedChip>,
    pub opened: Vec<String>,
}

impl SimOpener {
    pub fn new(chip: SimulatedChip) -> Self {
        SimOpener {
            chip: Some(chip),
            opened: Vec::new(),
        }
    }
}

impl Open for SimOpener {
    type Bus = SimulatedChip;

    fn open(&mut self, path: &str) -> Result<SimulatedChip, SimError> {
        self.opened.push(path.to_string());
        self.chip.take().ok_or(SimError)
    }
}

/// Records requested delays without sleeping
#[derive(Default)]
pub(crate) struct NoDelay {
    pub total_ms: u32,
}

impl DelayMs<u8> for NoDelay {
    fn delay_ms(&mut self, ms: u8) {
        self.total_ms += u32::from(ms);
    }
}

//
// End of file
//
