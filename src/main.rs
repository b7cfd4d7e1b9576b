use std::process::ExitCode;

use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod fetch;
pub mod pipeline;
pub mod tags;

fn main() -> ExitCode {
    run()
}
