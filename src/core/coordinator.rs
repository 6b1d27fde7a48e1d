use std::time::Instant;

use super::alerts::engine::ProximityAlertEngine;
use super::alerts::model::AlertOutcome;
use super::config::Settings;
use super::error::Result;
use super::model::TrackedEntity;
use super::notify::NotificationSink;
use super::scheduler::AlertSignal;
use super::tracker::ObjectTracker;
use super::world::{Clock, WorldObjectSource};

#[derive(Debug, Default)]
pub struct FrameOutput {
    /// A pending alert check was drained this frame
    pub checked: bool,
    pub outcome: AlertOutcome,
}

/// Frame-thread side of the radar: drains the alert signal, snapshots the
/// world, runs the engine and hands results to the notification sink.
pub struct RadarCoordinator<S, C> {
    tracker: ObjectTracker<S>,
    engine: ProximityAlertEngine,
    signal: AlertSignal,
    sink: Box<dyn NotificationSink>,
    clock: C,
    checks_run: u64,
}

impl<S: WorldObjectSource, C: Clock> RadarCoordinator<S, C> {
    pub fn new(
        source: S,
        settings: &Settings,
        signal: AlertSignal,
        sink: Box<dyn NotificationSink>,
        clock: C,
    ) -> Self {
        Self {
            tracker: ObjectTracker::new(source, settings.snapshot_filter()),
            engine: ProximityAlertEngine::new(settings.alerts.clone()),
            signal,
            sink,
            clock,
            checks_run: 0,
        }
    }

    /// Hot-reload settings. Mode or alert distance changes reset alert history.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.tracker.update_filter(settings.snapshot_filter());
        self.engine.update_settings(settings.alerts.clone());
    }

    /// Call once per host frame. Errors are logged here and never returned;
    /// the next pending check simply tries again.
    pub fn on_frame(&mut self) -> FrameOutput {
        let now = self.clock.now();
        self.engine.purge_expired(now);

        if !self.signal.take() {
            return FrameOutput::default();
        }

        if self.checks_run == 0 {
            log::debug!("Alert system running");
        }
        self.checks_run += 1;

        match self.check_proximity(now) {
            Ok(outcome) => FrameOutput {
                checked: true,
                outcome,
            },
            Err(e) => {
                log::error!("Error checking player proximity: {}", e);
                FrameOutput {
                    checked: true,
                    outcome: AlertOutcome::none(),
                }
            }
        }
    }

    fn check_proximity(&mut self, now: Instant) -> Result<AlertOutcome> {
        if !self.engine.settings().enabled || !self.tracker.has_local_player() {
            return Ok(AlertOutcome::none());
        }

        let snapshot = self.tracker.tracked_objects()?;
        let outcome = self.engine.evaluate(&snapshot, now);

        if outcome.fired {
            let settings = self.engine.settings();
            if settings.sound_enabled {
                self.sink.play_sound(settings.sound);
            }
            let message = outcome.chat_message();
            log::debug!("Alert triggered by: {}", message);
            self.sink.print_chat(&message);
        }

        Ok(outcome)
    }

    /// Current radar contents for the render layer
    pub fn snapshot(&self) -> Result<Vec<TrackedEntity>> {
        self.tracker.tracked_objects()
    }

    pub fn clear_alert_data(&mut self) {
        self.engine.clear_alert_data();
    }

    pub fn engine(&self) -> &ProximityAlertEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ProximityAlertEngine {
        &mut self.engine
    }

    pub fn tracker(&self) -> &ObjectTracker<S> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ObjectTracker<S> {
        &mut self.tracker
    }

    pub fn signal(&self) -> &AlertSignal {
        &self.signal
    }

    pub fn checks_run(&self) -> u64 {
        self.checks_run
    }
}
