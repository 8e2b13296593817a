mod app;

use anyhow::{Context, Result};

use pendule_clock::{ClockConfig, Controller, SystemTimeSource};
use pendule_engine::device::GpuInit;
use pendule_engine::logging::{init_logging, LoggingConfig};
use pendule_engine::window::{Runtime, RuntimeConfig};

use app::ClockApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let controller = Controller::new(ClockConfig::default(), SystemTimeSource)
        .context("invalid clock configuration")?;
    let app = ClockApp::new(controller)?;

    log::info!("starting pendule {}", env!("CARGO_PKG_VERSION"));

    Runtime::run(RuntimeConfig::overlay("pendule"), GpuInit::transparent(), app)
}
