//! CLI module

pub mod commands;
pub mod output;

pub fn run() -> anyhow::Result<std::process::ExitCode> {
    commands::run()
}
