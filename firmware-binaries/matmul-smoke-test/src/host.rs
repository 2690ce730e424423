// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use accel_sys::self_test::{passed, self_test};
use accel_sys::sim::{Completion, SimulatedAccelerator};
use accel_sys::{regs, Accelerator, PollStrategy};

/// Status reads before the simulated accelerator reports completion.
const SIMULATED_LATENCY: u32 = 8;

pub fn main() -> ExitCode {
    let sim = SimulatedAccelerator::new(Completion::AfterReads(SIMULATED_LATENCY));
    let mut accel = Accelerator::with_registers(&sim);

    if cfg!(feature = "self-test") {
        let results = self_test(&mut accel, PollStrategy::Unbounded);
        for (name, result) in &results {
            println!("{name}: {result:?}");
        }
        return if passed(&results) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match accel.run(PollStrategy::Unbounded) {
        Ok(polls) => {
            println!("matrix multiply done after {polls} status reads");
            println!("MATRIX_C = {}", sim.peek_matrix(regs::MATRIX_C));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("matrix multiply did not complete: {err:?}");
            ExitCode::FAILURE
        }
    }
}
