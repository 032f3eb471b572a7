use std::process::ExitCode;

mod app;
mod tile;

fn main() -> ExitCode {
    app::start()
}
