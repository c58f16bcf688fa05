// uSDHC storage interface handle
//
// The electrical/protocol bring-up (CMD0, voltage negotiation, ...)
// belongs to the host driver behind UsdhcHost. This layer owns the
// slot's write-protect pad, its bus width and the low-voltage
// capability the board wires up for it.

use core::fmt;

use super::iomuxc::Pad;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusWidth {
    One = 1,
    Four = 4,
    Eight = 8,
}

impl BusWidth {
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for BusWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// SD/eMMC host controller driver, external to this crate.
pub trait UsdhcHost {
    fn init(&mut self, width: BusWidth);
}

impl<H: UsdhcHost + ?Sized> UsdhcHost for &mut H {
    fn init(&mut self, width: BusWidth) {
        (**self).init(width)
    }
}

/// Whether a slot can switch its signalling to 1.8V at runtime.
pub trait LowVoltage {
    fn supported(&self) -> bool;
}

/// Conservative default: no 1.8V switching.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl LowVoltage for Unsupported {
    #[inline]
    fn supported(&self) -> bool {
        false
    }
}

pub struct StorageInterface<H> {
    host: H,
    width: BusWidth,
    wp: Pad,
    initialized: bool,
    low_voltage: &'static dyn LowVoltage,
}

impl<H: UsdhcHost> StorageInterface<H> {
    pub fn new(host: H, width: BusWidth, wp: Pad) -> Self {
        Self {
            host,
            width,
            wp,
            initialized: false,
            low_voltage: &Unsupported,
        }
    }

    /// Run the host driver's bus bring-up at the configured width.
    pub fn init(&mut self) {
        self.host.init(self.width);
        self.initialized = true;
    }

    pub fn set_low_voltage(&mut self, lv: &'static dyn LowVoltage) {
        self.low_voltage = lv;
    }

    pub fn low_voltage(&self) -> bool {
        self.low_voltage.supported()
    }

    pub fn width(&self) -> BusWidth {
        self.width
    }

    pub fn write_protect_pad(&self) -> &Pad {
        &self.wp
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
