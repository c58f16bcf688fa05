//! Raspberry Pi Zero
//!
//! Nothing board specific beyond the BCM2835 peripheral base, which differs
//! from the later Pi models.

use super::{Board, SocInit, UartPort, early_init};

pub const PERIPHERAL_BASE: u32 = 0x2000_0000;

pub struct PiZero;

impl Board for PiZero {
    const NAME: &'static str = "Raspberry Pi Zero";
    const PERIPHERAL_BASE: u32 = PERIPHERAL_BASE;
    const RAM_START: u32 = 0;
    // shared with the VideoCore
    const RAM_SIZE: u32 = 0x2000_0000;
    const CONSOLE: Option<UartPort> = None;
}

/// Generic BCM2835 init at the Pi Zero peripheral base.
pub fn init_soc<S: SocInit>(soc: &mut S) {
    early_init::<PiZero, S>(soc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::{Call, Soc};

    #[test]
    fn defers_to_bcm2835_at_pi_zero_base() {
        let mut soc = Soc::default();
        init_soc(&mut soc);
        assert_eq!(soc.calls, [Call::Soc(0x2000_0000)]);
    }
}
