mod audio;
mod config;
mod controller;
mod eq;
mod error;
mod library;
mod playlist;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()?;
    Ok(())
}
