// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
use crate::uart::Uart;

// Log records carry `core::fmt::Arguments`, which ufmt cannot format.
use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` backend that prints every record on a [`Uart`].
///
/// Lines look like `WARN | src/accelerator.rs:97 - message`. The source
/// location is only printed for records at or below `display_source`.
pub struct UartLogger {
    uart: Uart,
    level: LevelFilter,
    display_source: LevelFilter,
}

impl UartLogger {
    pub const fn new(uart: Uart, level: LevelFilter) -> UartLogger {
        UartLogger {
            uart,
            level,
            display_source: LevelFilter::Off,
        }
    }

    pub const fn with_source(mut self, display_source: LevelFilter) -> UartLogger {
        self.display_source = display_source;
        self
    }

    /// Register this logger with the `log` facade.
    ///
    /// # Safety
    ///
    /// Must not race with any other call into the `log` crate. In practice:
    /// call it once, early, on a single-hart system.
    pub unsafe fn install(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger_racy(self)?;
        log::set_max_level_racy(self.level);
        Ok(())
    }
}

impl Log for UartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut uart = self.uart;
        let _ = write!(uart, "{} | ", record.level());
        if record.level() <= self.display_source {
            if let (Some(file), Some(line)) = (record.file(), record.line()) {
                let _ = write!(uart, "{}:{} - ", file, line);
            }
        }
        let _ = writeln!(uart, "{}", record.args());
    }

    fn flush(&self) {}
}

// SAFETY: only sound with a single thread of execution. `Uart` holds raw
// pointers to a device and is neither `Send` nor `Sync` by itself.
unsafe impl Send for UartLogger {}
unsafe impl Sync for UartLogger {}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn filters_by_level() {
        let mut regs = [0u8; 8];
        let logger = UartLogger::new(unsafe { Uart::new(regs.as_mut_ptr()) }, LevelFilter::Info);

        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Info).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
    }

    #[test]
    fn writes_enabled_records_only() {
        let mut regs = [0u8; 8];
        let logger = UartLogger::new(unsafe { Uart::new(regs.as_mut_ptr()) }, LevelFilter::Warn)
            .with_source(LevelFilter::Error);

        logger.log(
            &Record::builder()
                .args(format_args!("ignored"))
                .level(Level::Info)
                .build(),
        );
        assert_eq!(regs[0], 0);

        logger.log(
            &Record::builder()
                .args(format_args!("stuck"))
                .level(Level::Warn)
                .file(Some("accelerator.rs"))
                .line(Some(1))
                .build(),
        );
        assert_eq!(regs[0], b'\n');
    }
}
