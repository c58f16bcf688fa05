// FUSB303 USB Type-C port controller
//
// Only the debug accessory detection switch is driven here. CONTROL1
// bit 3 (ENABLE) turns on accessory detection, which routes the debug
// signals (serial console included) to the receptacle once a debug
// accessory is plugged in. Other CONTROL1 bits are preserved.

use log::debug;

use super::i2c::{BusError, PeripheralAddress, PeripheralBus};

/// 7-bit I2C address
pub const FUSB303_ADDR: u8 = 0x31;

pub const CONTROL1: u32 = 0x05;
pub const CONTROL1_ENABLE: u8 = 3;

const CONTROL1_REG: PeripheralAddress = PeripheralAddress::new(FUSB303_ADDR, CONTROL1, 1);

pub struct Fusb303<B> {
    bus: B,
}

impl<B: PeripheralBus> Fusb303<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Read-modify-write CONTROL1 setting ENABLE. A failed read is
    /// returned without writing anything.
    pub fn enable_debug_accessory(&mut self) -> Result<(), BusError> {
        let mut ctl = [0u8; 1];
        self.bus.read(&CONTROL1_REG, &mut ctl)?;

        let val = ctl[0] | (1 << CONTROL1_ENABLE);
        debug!("fusb303: CONTROL1 {:#04x} -> {:#04x}", ctl[0], val);

        self.bus.write(&[val], &CONTROL1_REG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::i2c::I2cBus;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    // scripted bus: canned read result, every write recorded
    struct ScriptedBus {
        read: Result<u8, BusError>,
        write: Result<(), BusError>,
        writes: Vec<(u8, u32, Vec<u8>)>,
    }

    impl ScriptedBus {
        fn new(read: Result<u8, BusError>) -> Self {
            Self {
                read,
                write: Ok(()),
                writes: Vec::new(),
            }
        }
    }

    impl PeripheralBus for ScriptedBus {
        fn read(&mut self, addr: &PeripheralAddress, buf: &mut [u8]) -> Result<(), BusError> {
            assert_eq!(*addr, PeripheralAddress::new(0x31, 0x05, 1));
            assert_eq!(buf.len(), 1);
            buf[0] = self.read?;
            Ok(())
        }

        fn write(&mut self, data: &[u8], addr: &PeripheralAddress) -> Result<(), BusError> {
            self.writes.push((addr.device, addr.register, data.to_vec()));
            self.write
        }
    }

    #[test]
    fn sets_enable_on_cleared_register() {
        let mut fusb = Fusb303::new(ScriptedBus::new(Ok(0x00)));
        fusb.enable_debug_accessory().unwrap();
        assert_eq!(fusb.into_inner().writes, [(0x31, 0x05, vec![0x08])]);
    }

    #[test]
    fn preserves_unrelated_bits() {
        let mut fusb = Fusb303::new(ScriptedBus::new(Ok(0x10)));
        fusb.enable_debug_accessory().unwrap();
        assert_eq!(fusb.into_inner().writes, [(0x31, 0x05, vec![0x18])]);
    }

    #[test]
    fn already_enabled_is_written_back_unchanged() {
        let mut fusb = Fusb303::new(ScriptedBus::new(Ok(0xff)));
        fusb.enable_debug_accessory().unwrap();
        assert_eq!(fusb.into_inner().writes, [(0x31, 0x05, vec![0xff])]);
    }

    #[test]
    fn failed_read_skips_write() {
        let mut fusb = Fusb303::new(ScriptedBus::new(Err(BusError::Timeout)));
        assert_eq!(fusb.enable_debug_accessory(), Err(BusError::Timeout));
        assert!(fusb.into_inner().writes.is_empty());
    }

    #[test]
    fn failed_write_is_returned() {
        let mut bus = ScriptedBus::new(Ok(0x00));
        bus.write = Err(BusError::NoAcknowledge);
        let mut fusb = Fusb303::new(bus);
        assert_eq!(fusb.enable_debug_accessory(), Err(BusError::NoAcknowledge));
        assert_eq!(fusb.into_inner().writes.len(), 1);
    }

    #[test]
    fn over_i2c() {
        let expectations = [
            I2cTransaction::write_read(0x31, vec![0x05], vec![0x10]),
            I2cTransaction::write(0x31, vec![0x05, 0x18]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        Fusb303::new(I2cBus::new(&mut i2c))
            .enable_debug_accessory()
            .unwrap();

        i2c.done();
    }

    #[test]
    fn over_i2c_bus_fault() {
        let expectations = [I2cTransaction::write_read(0x31, vec![0x05], vec![0x00])
            .with_error(ErrorKind::Overrun)];
        let mut i2c = I2cMock::new(&expectations);

        let res = Fusb303::new(I2cBus::new(&mut i2c)).enable_debug_accessory();
        assert_eq!(res, Err(BusError::Bus(ErrorKind::Overrun)));

        i2c.done();
    }
}
