// Register-addressed transactions on an I2C bus
//
// Devices behind the bus expose registers addressed by 1..=4 bytes,
// sent MSB first. Reads are one write-read (repeated start), writes
// are one frame: register address followed by payload.
// No retries here; a failed transaction is returned as is.

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

// register address bytes + payload in a single write frame
pub const MAX_WRITE_LEN: usize = 32;
const MAX_REG_WIDTH: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Device or data byte not acknowledged.
    NoAcknowledge,
    Timeout,
    /// Empty transfer, bad register width or payload over MAX_WRITE_LEN.
    InvalidLength,
    /// Any other transport failure reported by the bus driver.
    Bus(ErrorKind),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::NoAcknowledge => f.write_str("no acknowledge"),
            BusError::Timeout => f.write_str("timeout"),
            BusError::InvalidLength => f.write_str("invalid transaction length"),
            BusError::Bus(kind) => write!(f, "bus error: {}", kind),
        }
    }
}

impl core::error::Error for BusError {}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
            other => BusError::Bus(other),
        }
    }
}

/// A register on an external bus device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralAddress {
    /// 7-bit device address
    pub device: u8,
    pub register: u32,
    /// register address width in bytes
    pub width: u8,
}

impl PeripheralAddress {
    pub const fn new(device: u8, register: u32, width: u8) -> Self {
        Self {
            device,
            register,
            width,
        }
    }

    // big-endian register address, `width` bytes long
    fn encode(&self, out: &mut [u8; MAX_REG_WIDTH as usize]) -> Result<usize, BusError> {
        if self.width == 0 || self.width > MAX_REG_WIDTH {
            return Err(BusError::InvalidLength);
        }
        let w = self.width as usize;
        if w < 4 && self.register >> (8 * w) != 0 {
            return Err(BusError::InvalidLength);
        }

        let be = self.register.to_be_bytes();
        out[..w].copy_from_slice(&be[4 - w..]);
        Ok(w)
    }
}

pub trait PeripheralBus {
    /// Read `buf.len()` bytes starting at `addr`.
    fn read(&mut self, addr: &PeripheralAddress, buf: &mut [u8]) -> Result<(), BusError>;

    /// Write `data` starting at `addr`.
    fn write(&mut self, data: &[u8], addr: &PeripheralAddress) -> Result<(), BusError>;
}

impl<B: PeripheralBus + ?Sized> PeripheralBus for &mut B {
    fn read(&mut self, addr: &PeripheralAddress, buf: &mut [u8]) -> Result<(), BusError> {
        (**self).read(addr, buf)
    }

    fn write(&mut self, data: &[u8], addr: &PeripheralAddress) -> Result<(), BusError> {
        (**self).write(data, addr)
    }
}

/// PeripheralBus over any embedded-hal I2C master.
pub struct I2cBus<I> {
    i2c: I,
}

impl<I: I2c> I2cBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I: I2c> PeripheralBus for I2cBus<I> {
    fn read(&mut self, addr: &PeripheralAddress, buf: &mut [u8]) -> Result<(), BusError> {
        if buf.is_empty() {
            return Err(BusError::InvalidLength);
        }
        let mut reg = [0u8; MAX_REG_WIDTH as usize];
        let n = addr.encode(&mut reg)?;

        self.i2c
            .write_read(addr.device, &reg[..n], buf)
            .map_err(|e| BusError::from(e.kind()))
    }

    fn write(&mut self, data: &[u8], addr: &PeripheralAddress) -> Result<(), BusError> {
        if data.is_empty() {
            return Err(BusError::InvalidLength);
        }
        let mut frame = [0u8; MAX_WRITE_LEN];
        let mut reg = [0u8; MAX_REG_WIDTH as usize];
        let n = addr.encode(&mut reg)?;
        let len = n + data.len();
        if len > MAX_WRITE_LEN {
            return Err(BusError::InvalidLength);
        }

        frame[..n].copy_from_slice(&reg[..n]);
        frame[n..len].copy_from_slice(data);

        self.i2c
            .write(addr.device, &frame[..len])
            .map_err(|e| BusError::from(e.kind()))
    }
}
