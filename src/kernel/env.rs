// Native hardware vs emulated execution
//
// Under emulation (qemu without the full IOMUXC model, host tests)
// register writes must not be issued at all. The process-wide flag
// is latched once by startup code; later latches are rejected so
// the answer cannot change mid bring-up.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

static NATIVE: AtomicBool = AtomicBool::new(false);
static LATCHED: AtomicBool = AtomicBool::new(false);

/// Answers whether bring-up runs on real silicon.
pub trait ExecutionEnvironment {
    fn is_native(&self) -> bool;
}

/// Real hardware: register writes have physical effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct Native;

/// Simulated or emulated context: register writes are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Emulated;

impl ExecutionEnvironment for Native {
    #[inline]
    fn is_native(&self) -> bool {
        true
    }
}

impl ExecutionEnvironment for Emulated {
    #[inline]
    fn is_native(&self) -> bool {
        false
    }
}

/// Reads the process-wide flag set by [`latch`].
///
/// Reports emulated until something latches native.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ExecutionEnvironment for ProcessEnv {
    #[inline]
    fn is_native(&self) -> bool {
        NATIVE.load(Ordering::Acquire)
    }
}

impl<E: ExecutionEnvironment + ?Sized> ExecutionEnvironment for &E {
    #[inline]
    fn is_native(&self) -> bool {
        (**self).is_native()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyLatched {
    pub native: bool,
}

impl fmt::Display for AlreadyLatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "execution environment already latched as {}",
            if self.native { "native" } else { "emulated" }
        )
    }
}

impl core::error::Error for AlreadyLatched {}

/// Record the execution environment for the rest of the process.
///
/// Single-threaded startup only; the swap is not a compare-exchange so
/// it also builds on targets without atomic RMW.
pub fn latch(native: bool) -> Result<(), AlreadyLatched> {
    if LATCHED.load(Ordering::Acquire) {
        return Err(AlreadyLatched {
            native: NATIVE.load(Ordering::Acquire),
        });
    }
    NATIVE.store(native, Ordering::Release);
    LATCHED.store(true, Ordering::Release);
    log::info!("env: {}", if native { "native" } else { "emulated" });
    Ok(())
}
