// Console logger over a single-byte transmit sink
//
// Each board binds its console to one UART (printk style); whatever
// transmits a byte on it implements ByteSink. Records are formatted
// as "LEVEL target: message\r\n" straight into the sink, no buffer.
// The sink sits behind a critical-section mutex so the logger is Sync.

use core::cell::RefCell;
use core::fmt::{self, Write};

use critical_section::Mutex;
use log::{LevelFilter, Log, Metadata, Record};
use static_cell::StaticCell;

pub trait ByteSink: Send {
    fn tx(&mut self, c: u8);
}

// plain transmit function, e.g. `|c| uart1.tx(c)` behind a static
impl ByteSink for fn(u8) {
    #[inline]
    fn tx(&mut self, c: u8) {
        (*self)(c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// The StaticCell already holds a logger.
    AlreadyInstalled,
    /// Another logger owns the `log` facade.
    LoggerTaken,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::AlreadyInstalled => f.write_str("console logger already installed"),
            ConsoleError::LoggerTaken => f.write_str("a different logger is already set"),
        }
    }
}

impl core::error::Error for ConsoleError {}

struct Tx<'a, S>(&'a mut S);

impl<S: ByteSink> Write for Tx<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.0.tx(b);
        }
        Ok(())
    }
}

pub struct ConsoleLogger<S> {
    sink: Mutex<RefCell<S>>,
    level: LevelFilter,
}

impl<S: ByteSink> ConsoleLogger<S> {
    pub const fn new(sink: S, level: LevelFilter) -> Self {
        Self {
            sink: Mutex::new(RefCell::new(sink)),
            level,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn with_sink<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        critical_section::with(|cs| {
            let mut sink = self.sink.borrow_ref_mut(cs);
            f(&mut *sink)
        })
    }
}

impl<S: ByteSink> Log for ConsoleLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.with_sink(|sink| {
            let _ = write!(
                Tx(sink),
                "{} {}: {}\r\n",
                record.level(),
                record.target(),
                record.args()
            );
        });
    }

    fn flush(&self) {}
}

/// Place the logger in `cell` and register it with the `log` facade.
pub fn install<S: ByteSink + 'static>(
    cell: &'static StaticCell<ConsoleLogger<S>>,
    sink: S,
    level: LevelFilter,
) -> Result<&'static ConsoleLogger<S>, ConsoleError> {
    let logger: &'static ConsoleLogger<S> = cell
        .try_init(ConsoleLogger::new(sink, level))
        .ok_or(ConsoleError::AlreadyInstalled)?;

    log::set_logger(logger).map_err(|_| ConsoleError::LoggerTaken)?;
    log::set_max_level(level);
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use log::Level;

    #[derive(Default)]
    struct Capture(Vec<u8>);

    impl ByteSink for Capture {
        fn tx(&mut self, c: u8) {
            self.0.push(c);
        }
    }

    fn emit<S: ByteSink>(logger: &ConsoleLogger<S>, level: Level, msg: fmt::Arguments) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("usdhc")
                .args(msg)
                .build(),
        );
    }

    #[test]
    fn formats_one_line_per_record() {
        let logger = ConsoleLogger::new(Capture::default(), LevelFilter::Info);
        emit(&logger, Level::Info, format_args!("SD1 {}-bit", 4));

        let out = logger.with_sink(|s| String::from_utf8(s.0.clone()).unwrap());
        assert_eq!(out, "INFO usdhc: SD1 4-bit\r\n");
    }

    #[test]
    fn drops_records_above_level() {
        let logger = ConsoleLogger::new(Capture::default(), LevelFilter::Warn);
        emit(&logger, Level::Info, format_args!("quiet"));
        emit(&logger, Level::Debug, format_args!("quiet"));
        emit(&logger, Level::Error, format_args!("loud"));

        let out = logger.with_sink(|s| String::from_utf8(s.0.clone()).unwrap());
        assert_eq!(out, "ERROR usdhc: loud\r\n");
    }

    static TX_COUNT: AtomicUsize = AtomicUsize::new(0);

    fn uart_tx(_c: u8) {
        TX_COUNT.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn fn_pointer_sink() {
        let logger = ConsoleLogger::new(uart_tx as fn(u8), LevelFilter::Trace);
        emit(&logger, Level::Trace, format_args!("x"));
        // "TRACE usdhc: x\r\n"
        assert_eq!(TX_COUNT.load(Ordering::Relaxed), 16);
    }

    // the only test registering with the log facade
    #[test]
    fn install_once() {
        static CONSOLE: StaticCell<ConsoleLogger<Capture>> = StaticCell::new();
        static OTHER: StaticCell<ConsoleLogger<Capture>> = StaticCell::new();

        let logger = install(&CONSOLE, Capture::default(), LevelFilter::Info).unwrap();
        assert_eq!(logger.level(), LevelFilter::Info);
        assert_eq!(
            install(&CONSOLE, Capture::default(), LevelFilter::Info).err(),
            Some(ConsoleError::AlreadyInstalled)
        );
        assert_eq!(
            install(&OTHER, Capture::default(), LevelFilter::Info).err(),
            Some(ConsoleError::LoggerTaken)
        );
    }
}
