//! Main entry point for the backlight controller

use anyhow::{bail, Context};
use backlight_ctl::{
    args::Args, logging, BrightnessAdjuster, Config, MemoryDevice, SysfsDevice,
};
use clap::Parser;
use log::{debug, info, warn};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Help, version and usage errors all go to stderr with status 1
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprint!("{}", err.render());
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {:#}", env!("CARGO_PKG_NAME"), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    logging::setup(args.verbose).context("failed to set up logging")?;
    debug!(
        "{} v{} (git {}) built {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_HASH").unwrap_or("unknown"),
        option_env!("BUILD_TIME").unwrap_or("unknown")
    );

    if let Some(time) = args.time.filter(|t| !t.is_zero()) {
        warn!(
            "Fading is not supported, ignoring --time {}ms",
            time.as_millis()
        );
    }

    let config = Config::resolve(args.device.as_deref())
        .context("failed to resolve backlight configuration")?;
    let device = SysfsDevice::from_config(&config);
    if !device.exists() {
        bail!("backlight device not found at {}", device.path().display());
    }
    info!("Using backlight device {}", device.path().display());

    let adjuster = BrightnessAdjuster::new(device);
    if args.dry_run {
        let state = adjuster.read_state()?;
        let preview = BrightnessAdjuster::new(MemoryDevice::new(state.current, state.max));
        let adjustment = preview.apply_request(args.value)?;
        info!(
            "Dry run: {} would become {}",
            adjustment.previous, adjustment.written
        );
        println!("{}", adjustment.written);
        return Ok(());
    }

    let adjustment = adjuster.apply_request(args.value)?;
    info!(
        "Brightness {} -> {}",
        adjustment.previous, adjustment.written
    );
    Ok(())
}
