use std::process::ExitCode;

fn main() -> ExitCode {
    recastd::run(std::env::args_os())
}
