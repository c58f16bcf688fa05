// i.MX IOMUXC pad configuration
//
// A pad is driven by three registers: SW_MUX_CTL (mux mode),
// SW_PAD_CTL (pull/keeper/drive flags) and a *_SELECT_INPUT daisy
// register that routes the pad to a peripheral input. Writes are
// plain stores, no read-modify-write: the last value written wins.

use core::fmt;

use log::debug;

use super::mmio::RegisterSpace;

// SW_PAD_CTL bit positions
pub const SW_PAD_CTL_HYS: u32 = 16;
pub const SW_PAD_CTL_PUS: u32 = 14;
pub const SW_PAD_CTL_PUE: u32 = 13;
pub const SW_PAD_CTL_PKE: u32 = 12;
pub const SW_PAD_CTL_ODE: u32 = 11;
pub const SW_PAD_CTL_SPEED: u32 = 6;
pub const SW_PAD_CTL_DSE: u32 = 3;
pub const SW_PAD_CTL_SRE: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegKind {
    Mux,
    Ctl,
    Select,
}

impl RegKind {
    pub fn name(self) -> &'static str {
        match self {
            RegKind::Mux => "SW_MUX_CTL",
            RegKind::Ctl => "SW_PAD_CTL",
            RegKind::Select => "SELECT_INPUT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadError {
    /// Address outside the board's window for this register kind.
    Unrecognized { kind: RegKind, addr: u32 },
    /// Inside the window but misaligned or reserved on this board.
    Reserved { kind: RegKind, addr: u32 },
}

impl fmt::Display for PadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PadError::Unrecognized { kind, addr } => {
                write!(f, "invalid IOMUXC {} register {:#010x}", kind.name(), addr)
            }
            PadError::Reserved { kind, addr } => {
                write!(f, "reserved IOMUXC {} register {:#010x}", kind.name(), addr)
            }
        }
    }
}

impl core::error::Error for PadError {}

/// Inclusive register address window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u32,
    pub end: u32,
}

impl Window {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn contains(&self, addr: u32) -> bool {
        addr >= self.start && addr <= self.end
    }
}

/// Pad registers a board recognizes, per register kind.
#[derive(Debug, Clone, Copy)]
pub struct PadMap {
    pub mux: Window,
    pub ctl: Window,
    pub select: Window,
    pub reserved: &'static [u32],
}

impl PadMap {
    /// i.MX6ULL IOMUXC (JTAG_MOD .. CSI_DATA07, daisy inputs up to USDHC2_WP).
    pub const IMX6ULL: Self = Self {
        mux: Window::new(0x020e_0044, 0x020e_0200),
        ctl: Window::new(0x020e_02d0, 0x020e_048c),
        select: Window::new(0x020e_04d0, 0x020e_06a4),
        reserved: &[],
    };

    pub fn check(&self, kind: RegKind, addr: u32) -> Result<(), PadError> {
        let window = match kind {
            RegKind::Mux => self.mux,
            RegKind::Ctl => self.ctl,
            RegKind::Select => self.select,
        };

        if !window.contains(addr) {
            return Err(PadError::Unrecognized { kind, addr });
        }
        if addr % 4 != 0 || self.reserved.contains(&addr) {
            return Err(PadError::Reserved { kind, addr });
        }
        Ok(())
    }
}

/// Values written to a pad in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadSettings {
    pub mode: u32,
    pub daisy: u32,
    pub ctl: u32,
}

/// An acquired pad: its three register addresses and what was last
/// written to each. Owned by exactly one user; not Clone.
#[derive(Debug, PartialEq, Eq)]
pub struct Pad {
    mux: u32,
    ctl: u32,
    select: u32,
    mode: Option<u32>,
    daisy: Option<u32>,
    control: Option<u32>,
}

impl Pad {
    /// Unconfigured pad bound to `mux`, `ctl` and `select`.
    /// Address validation is the configurator's job.
    pub const fn new(mux: u32, ctl: u32, select: u32) -> Self {
        Self {
            mux,
            ctl,
            select,
            mode: None,
            daisy: None,
            control: None,
        }
    }

    pub fn mux_addr(&self) -> u32 {
        self.mux
    }

    pub fn ctl_addr(&self) -> u32 {
        self.ctl
    }

    pub fn select_addr(&self) -> u32 {
        self.select
    }

    pub fn mode(&self) -> Option<u32> {
        self.mode
    }

    pub fn daisy(&self) -> Option<u32> {
        self.daisy
    }

    pub fn control(&self) -> Option<u32> {
        self.control
    }

    // all three registers written at least once
    pub fn is_configured(&self) -> bool {
        self.mode.is_some() && self.daisy.is_some() && self.control.is_some()
    }
}

/// Acquires pads and programs their registers.
///
/// Implementors supply validation and the raw register store; the
/// recording of written values is shared so every configurator keeps
/// the same last-write-wins bookkeeping.
pub trait PadConfigurator {
    fn acquire(&mut self, mux: u32, ctl: u32, select: u32) -> Result<Pad, PadError>;

    fn write(&mut self, addr: u32, val: u32);

    fn set_mode(&mut self, pad: &mut Pad, mode: u32) {
        self.write(pad.mux, mode);
        pad.mode = Some(mode);
    }

    fn set_daisy(&mut self, pad: &mut Pad, select: u32) {
        self.write(pad.select, select);
        pad.daisy = Some(select);
    }

    fn set_control(&mut self, pad: &mut Pad, ctl: u32) {
        self.write(pad.ctl, ctl);
        pad.control = Some(ctl);
    }

    // pull/keeper first so the pin sits at a defined level before the
    // daisy chain and mux route it to the peripheral
    fn configure(&mut self, pad: &mut Pad, settings: &PadSettings) {
        self.set_control(pad, settings.ctl);
        self.set_daisy(pad, settings.daisy);
        self.set_mode(pad, settings.mode);
    }
}

impl<P: PadConfigurator + ?Sized> PadConfigurator for &mut P {
    fn acquire(&mut self, mux: u32, ctl: u32, select: u32) -> Result<Pad, PadError> {
        (**self).acquire(mux, ctl, select)
    }

    fn write(&mut self, addr: u32, val: u32) {
        (**self).write(addr, val)
    }
}

/// IOMUXC controller over a register space.
pub struct Iomuxc<R> {
    regs: R,
    map: PadMap,
}

impl<R: RegisterSpace> Iomuxc<R> {
    pub fn new(regs: R, map: PadMap) -> Self {
        Self { regs, map }
    }

    pub fn map(&self) -> &PadMap {
        &self.map
    }

    pub fn into_inner(self) -> R {
        self.regs
    }
}

impl<R: RegisterSpace> PadConfigurator for Iomuxc<R> {
    fn acquire(&mut self, mux: u32, ctl: u32, select: u32) -> Result<Pad, PadError> {
        self.map.check(RegKind::Mux, mux)?;
        self.map.check(RegKind::Ctl, ctl)?;
        self.map.check(RegKind::Select, select)?;

        debug!("iomuxc: pad mux={:#010x} ctl={:#010x} sel={:#010x}", mux, ctl, select);
        Ok(Pad::new(mux, ctl, select))
    }

    #[inline]
    fn write(&mut self, addr: u32, val: u32) {
        self.regs.write32(addr, val);
    }
}
