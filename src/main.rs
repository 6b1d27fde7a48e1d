#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use wahdar_radar::core::alerts::model::AlertFrequencyMode;
use wahdar_radar::core::config::{ConfigManager, Settings};
use wahdar_radar::core::error::Result;
use wahdar_radar::core::notify::{LogSink, NotificationSink};
use wahdar_radar::core::sim::SimulatedWorld;
use wahdar_radar::core::tracker::object_list;
use wahdar_radar::core::world::SystemClock;
use wahdar_radar::{AlertScheduler, RadarCoordinator};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    OnlyOnce,
    EveryInterval,
    EnterLeave,
}

impl From<ModeArg> for AlertFrequencyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::OnlyOnce => Self::OnlyOnce,
            ModeArg::EveryInterval => Self::EveryInterval,
            ModeArg::EnterLeave => Self::OnEnterLeaveReenter,
        }
    }
}

#[derive(Parser)]
#[command(name = "wahdar-radar")]
#[command(about = "Player proximity radar, driven by a simulated world")]
struct Args {
    /// Directory holding settings.json
    #[arg(short, long, default_value = ".")]
    config_dir: PathBuf,

    /// Simulation length in seconds
    #[arg(short, long, default_value_t = 20)]
    seconds: u64,

    /// Override the configured alert frequency
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Turn proximity alerts on regardless of settings
    #[arg(long)]
    enable_alerts: bool,

    /// Write the effective settings back to settings.json
    #[arg(long)]
    save: bool,
}

#[cfg(feature = "audio")]
fn make_sink(settings: &Settings) -> Box<dyn NotificationSink> {
    use wahdar_radar::core::notify::AudioSink;
    match &settings.sound_dir {
        Some(dir) => Box::new(AudioSink::new(dir.clone())),
        None => Box::new(LogSink),
    }
}

#[cfg(not(feature = "audio"))]
fn make_sink(settings: &Settings) -> Box<dyn NotificationSink> {
    if settings.sound_dir.is_some() {
        log::warn!("sound_dir is set but audio support is not compiled in");
    }
    Box::new(LogSink)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let manager = ConfigManager::new(args.config_dir.clone());
    let mut settings = manager.load();
    if let Some(mode) = args.mode {
        settings.alerts.mode = mode.into();
    }
    if args.enable_alerts {
        settings.alerts.enabled = true;
    }
    if args.save {
        manager.save(&settings)?;
        log::info!("Saved settings to {:?}", manager.path());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let mut scheduler = AlertScheduler::new(settings.check_interval());
    scheduler.start_on(runtime.handle());

    let mut coordinator = RadarCoordinator::new(
        SimulatedWorld::demo(),
        &settings,
        scheduler.signal(),
        make_sink(&settings),
        SystemClock,
    );

    let nearby = object_list(coordinator.snapshot()?, &settings.categories);
    log::info!(
        "Radar up: {} objects within {:.0} yalms, alerts {} ({}), alert ring {}",
        nearby.len(),
        settings.detection_radius,
        if settings.alerts.enabled { "on" } else { "off" },
        settings.alerts.mode.display_name(),
        if settings.alerts.show_alert_ring { "shown" } else { "hidden" }
    );
    for entity in &nearby {
        let category = entity.category;
        let [r, g, b, _] = settings.categories.color(category);
        log::info!(
            "  {:<16} {} [#{:02x}{:02x}{:02x}{}{}]",
            category.display_name(),
            entity.describe(),
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            if settings.categories.draws_tether(category) { ", tether" } else { "" },
            if settings.categories.alerts_on(category) { ", alert" } else { "" }
        );
    }

    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    let mut alerts = 0;
    while Instant::now() < deadline {
        coordinator.tracker_mut().source_mut().advance(FRAME);
        if coordinator.on_frame().outcome.fired {
            alerts += 1;
        }
        thread::sleep(FRAME);
    }

    scheduler.stop();
    log::info!(
        "Simulation finished: {} alerts from {} checks over {}s",
        alerts,
        coordinator.checks_run(),
        args.seconds
    );
    Ok(())
}
