mod config;
#[cfg(target_os = "linux")]
mod dump;
mod tags;
mod touch;
#[cfg(target_os = "linux")]
mod xinput;

use clap::Parser;

use config::{Cli, Command, Config};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let default_filter = if matches!(cli.command, Some(Command::Dump)) {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(&cli);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    run(&cli, &config)
}

#[cfg(target_os = "linux")]
fn run(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Some(Command::Dump) => dump::run_dump(config),
        None => run_bridge(config),
    }
}

#[cfg(not(target_os = "linux"))]
fn run(_cli: &Cli, _config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    log::error!("XInput2 touch input requires a Linux host; nothing to do");
    Ok(())
}

#[cfg(target_os = "linux")]
fn run_bridge(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use std::collections::VecDeque;
    use std::thread;
    use std::time::Duration;

    log::info!("Connecting to display {}", config.display);
    let mut source = xinput::XiTouchSource::open(&config.display)?;

    let surface_height = config
        .surface_height
        .unwrap_or_else(|| source.screen_height() as f64);
    let mut bridge = touch::TouchBridge::new(surface_height, config.tags.clone());
    let mut sink = MonitorSink::default();

    let mut queue: VecDeque<touch::TouchEvent> = VecDeque::with_capacity(32);
    let tick = Duration::from_millis(config.tick_ms);

    log::info!(
        "Touch forwarding started (surface height {}, tags [{}])",
        surface_height,
        config.tags
    );

    let mut last_active = 0;
    loop {
        source.drain(&mut queue);
        bridge.forward(&mut queue, &mut sink);

        let active = bridge.active();
        if active != last_active {
            log::debug!("Active touches: {}", active);
            last_active = active;
        }

        thread::sleep(tick);
    }
}

/// Stand-in touch pipeline: allocates sequential handles and logs the
/// lifecycle of every forwarded touch.
#[cfg(target_os = "linux")]
#[derive(Default)]
struct MonitorSink {
    next_handle: touch::TouchHandle,
    forwarded: u64,
}

#[cfg(target_os = "linux")]
impl touch::TouchSink for MonitorSink {
    fn begin_touch(&mut self, position: (f64, f64), tags: &tags::Tags) -> touch::TouchHandle {
        self.next_handle += 1;
        if self.forwarded == 0 {
            log::info!("First touch received (events are flowing)");
        }
        self.forwarded += 1;
        log::info!(
            "Touch {} began at ({:.1}, {:.1}) [{}]",
            self.next_handle,
            position.0,
            position.1,
            tags
        );
        self.next_handle
    }

    fn move_touch(&mut self, handle: touch::TouchHandle, position: (f64, f64)) {
        log::debug!(
            "Touch {} moved to ({:.1}, {:.1})",
            handle,
            position.0,
            position.1
        );
    }

    fn end_touch(&mut self, handle: touch::TouchHandle) {
        log::info!("Touch {} ended", handle);
    }
}
