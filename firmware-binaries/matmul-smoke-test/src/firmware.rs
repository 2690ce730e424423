// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use core::fmt::Write;
use core::panic::PanicInfo;

use accel_sys::uart::log::UartLogger;
use accel_sys::uart::Uart;
use accel_sys::{regs, Accelerator, Mmio, PollStrategy};
use log::LevelFilter;
use riscv_rt::entry;

const ACCEL_ADDR: *mut u8 = regs::ACCEL_BASE as *mut u8;
const UART_ADDR: *mut u8 = (0b010 << 29) as *mut u8;
#[cfg(feature = "poll-timeout")]
const TIMER_ADDR: *mut u8 = (0b011 << 29) as *mut u8;

#[cfg(feature = "poll-timeout")]
const POLL_TIMEOUT: accel_sys::time::Duration = accel_sys::time::Duration::from_millis(100);

static LOGGER: UartLogger =
    UartLogger::new(unsafe { Uart::new(UART_ADDR) }, LevelFilter::Debug)
        .with_source(LevelFilter::Warn);

#[entry]
fn main() -> ! {
    let mut uart = unsafe { Uart::new(UART_ADDR) };
    unsafe { LOGGER.install() }.ok();

    let mut accel = unsafe { Accelerator::new(ACCEL_ADDR) };

    #[cfg(feature = "poll-timeout")]
    let clock = unsafe { accel_sys::time::Clock::new(TIMER_ADDR) };
    #[cfg(feature = "poll-timeout")]
    let strategy = PollStrategy::Deadline {
        clock: &clock,
        timeout: POLL_TIMEOUT,
    };
    #[cfg(not(feature = "poll-timeout"))]
    let strategy = PollStrategy::Unbounded;

    exercise(&mut accel, strategy, &mut uart);
    halt()
}

#[cfg(not(feature = "self-test"))]
fn exercise(accel: &mut Accelerator<Mmio>, strategy: PollStrategy<'_>, uart: &mut Uart) {
    match accel.run(strategy) {
        Ok(polls) => log::info!("matrix multiply done after {} status reads", polls),
        Err(err) => log::error!("matrix multiply did not complete: {:?}", err),
    }
    ufmt::uwriteln!(uart, "Done").ok();
}

#[cfg(feature = "self-test")]
fn exercise(accel: &mut Accelerator<Mmio>, strategy: PollStrategy<'_>, uart: &mut Uart) {
    use accel_sys::self_test::{report, self_test};

    let results = self_test(accel, strategy);
    report(uart, &results).ok();
}

/// There is nothing left to do and nobody to return to.
fn halt() -> ! {
    loop {
        unsafe { riscv::asm::wfi() };
    }
}

#[panic_handler]
fn panic_handler(info: &PanicInfo) -> ! {
    let mut uart = unsafe { Uart::new(UART_ADDR) };
    writeln!(uart, "Panicked! {info}").ok();
    halt()
}
