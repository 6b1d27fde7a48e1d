// Alert engine - decides when nearby players fire a proximity alert.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use super::model::{
    AlertFrequencyMode, AlertOutcome, AlertSettings, HighlightEntry, HIGHLIGHT_DURATION,
};
use crate::core::model::{EntityId, ObjectCategory, TrackedEntity};

/// Proximity alert state.
///
/// Not thread safe: evaluate, clear and highlight reads all happen on the
/// frame thread. Sounds and chat output are left to the caller.
pub struct ProximityAlertEngine {
    settings: AlertSettings,
    /// Ids that already fired under the current mode
    alerted: HashSet<EntityId>,
    /// Ids in alert range at the last evaluation (enter/leave mode only)
    in_range: HashSet<EntityId>,
    highlights: HashMap<EntityId, HighlightEntry>,
    last_alert: Option<Instant>,
}

impl ProximityAlertEngine {
    pub fn new(settings: AlertSettings) -> Self {
        Self {
            settings,
            alerted: HashSet::new(),
            in_range: HashSet::new(),
            highlights: HashMap::new(),
            last_alert: None,
        }
    }

    pub fn settings(&self) -> &AlertSettings {
        &self.settings
    }

    /// Update the engine settings (hot-reload friendly).
    /// Changing the mode or the alert distance drops all alert history.
    pub fn update_settings(&mut self, settings: AlertSettings) {
        let invalidates = settings.mode != self.settings.mode
            || settings.alert_distance != self.settings.alert_distance;
        self.settings = settings;
        if invalidates {
            self.clear_alert_data();
        }
    }

    pub fn set_mode(&mut self, mode: AlertFrequencyMode) {
        if mode != self.settings.mode {
            self.settings.mode = mode;
            self.clear_alert_data();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    /// Forget every alerted id, the in-range set and all highlights.
    /// The cooldown clock is kept.
    pub fn clear_alert_data(&mut self) {
        self.alerted.clear();
        self.in_range.clear();
        self.highlights.clear();
        log::debug!("Alert tracking data cleared");
    }

    /// Evaluate one snapshot. Callers must only pass snapshots taken while a
    /// local player exists.
    pub fn evaluate(&mut self, snapshot: &[TrackedEntity], now: Instant) -> AlertOutcome {
        self.purge_expired(now);

        if !self.settings.enabled {
            return AlertOutcome::none();
        }

        if let Some(last) = self.last_alert {
            if now.saturating_duration_since(last) < self.settings.cooldown() {
                return AlertOutcome::none();
            }
        }

        let mode = self.settings.mode;
        if mode == AlertFrequencyMode::EveryInterval {
            self.alerted.clear();
        }

        let mut currently_in_range = HashSet::new();
        let mut triggering = Vec::new();

        for entity in snapshot {
            if entity.category != ObjectCategory::Player
                || entity.distance > self.settings.alert_distance
            {
                continue;
            }

            // Duplicate ids within one snapshot only count once
            if !currently_in_range.insert(entity.id.clone()) {
                continue;
            }

            let should_fire = match mode {
                AlertFrequencyMode::OnEnterLeaveReenter => !self.in_range.contains(&entity.id),
                AlertFrequencyMode::OnlyOnce | AlertFrequencyMode::EveryInterval => {
                    !self.alerted.contains(&entity.id)
                }
            };

            if should_fire {
                self.alerted.insert(entity.id.clone());
                triggering.push(entity.clone());
            }
        }

        if mode == AlertFrequencyMode::OnEnterLeaveReenter {
            // Leaving range re-arms the alert for that id
            for id in self.in_range.difference(&currently_in_range) {
                self.alerted.remove(id);
            }
            self.in_range = currently_in_range;
        }

        if triggering.is_empty() {
            return AlertOutcome::none();
        }

        self.last_alert = Some(now);
        for entity in &triggering {
            self.highlights
                .insert(entity.id.clone(), HighlightEntry { triggered_at: now });
        }

        AlertOutcome {
            fired: true,
            triggering,
        }
    }

    /// Drop highlights that are 5 seconds old or older
    pub fn purge_expired(&mut self, now: Instant) {
        self.highlights.retain(|_, entry| entry.is_live(now));
    }

    /// Live highlights only, regardless of when the last purge ran
    pub fn highlights(&self, now: Instant) -> impl Iterator<Item = (&EntityId, &HighlightEntry)> {
        self.highlights
            .iter()
            .filter(move |(_, entry)| entry.is_live(now))
    }

    pub fn is_highlighted(&self, id: &str, now: Instant) -> bool {
        self.highlights
            .get(id)
            .is_some_and(|entry| entry.is_live(now))
    }

    /// 1.0 right after the alert, falling linearly towards 0.0 at expiry
    pub fn highlight_fade(&self, id: &str, now: Instant) -> Option<f32> {
        let entry = self.highlights.get(id).filter(|e| e.is_live(now))?;
        let elapsed = now.saturating_duration_since(entry.triggered_at);
        Some(1.0 - elapsed.as_secs_f32() / HIGHLIGHT_DURATION.as_secs_f32())
    }

    pub fn last_alert(&self) -> Option<Instant> {
        self.last_alert
    }

    pub fn alerted_count(&self) -> usize {
        self.alerted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Position;
    use std::time::Duration;

    fn player(id: &str, distance: f32) -> TrackedEntity {
        TrackedEntity {
            id: id.to_string(),
            name: format!("Player {}", id),
            category: ObjectCategory::Player,
            position: Position::new(distance, 0.0, 0.0),
            distance,
        }
    }

    fn settings(mode: AlertFrequencyMode, cooldown_seconds: f32) -> AlertSettings {
        AlertSettings {
            enabled: true,
            cooldown_seconds,
            mode,
            ..AlertSettings::default()
        }
    }

    #[test]
    fn test_engine_disabled_never_fires() {
        let mut engine = ProximityAlertEngine::new(AlertSettings::default());
        let outcome = engine.evaluate(&[player("a", 5.0)], Instant::now());
        assert!(!outcome.fired);
        assert!(outcome.triggering.is_empty());
    }

    #[test]
    fn test_engine_fires_on_player_in_range() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::EveryInterval, 5.0));
        let t0 = Instant::now();

        let outcome = engine.evaluate(&[player("a", 20.0)], t0);
        assert!(outcome.fired);
        assert_eq!(outcome.triggering.len(), 1);
        assert_eq!(engine.last_alert(), Some(t0));
        assert!(engine.is_highlighted("a", t0));
    }

    #[test]
    fn test_engine_ignores_other_categories() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::EveryInterval, 0.0));
        let mut npc = player("n", 2.0);
        npc.category = ObjectCategory::NPC;

        let outcome = engine.evaluate(&[npc], Instant::now());
        assert!(!outcome.fired);
    }

    #[test]
    fn test_alert_distance_is_inclusive() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::EveryInterval, 0.0));
        let outcome = engine.evaluate(&[player("edge", 25.0), player("out", 25.5)], Instant::now());
        let ids: Vec<&EntityId> = outcome.triggering_ids().collect();
        assert_eq!(ids, vec!["edge"]);
    }

    #[test]
    fn test_engine_cooldown_respected() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::EveryInterval, 5.0));
        let t0 = Instant::now();

        assert!(engine.evaluate(&[player("a", 10.0)], t0).fired);
        // A different player inside the cooldown is still held back
        let blocked = engine.evaluate(&[player("b", 10.0)], t0 + Duration::from_secs(1));
        assert!(!blocked.fired);

        let later = engine.evaluate(&[player("b", 10.0)], t0 + Duration::from_secs(5));
        assert!(later.fired);
    }

    #[test]
    fn test_cooldown_not_refreshed_without_fire() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::OnlyOnce, 5.0));
        let t0 = Instant::now();

        assert!(engine.evaluate(&[player("a", 10.0)], t0).fired);
        // Passes the cooldown but "a" already alerted: nothing fires
        assert!(!engine.evaluate(&[player("a", 10.0)], t0 + Duration::from_secs(6)).fired);
        // New arrival one second later is not blocked by the quiet evaluation
        let outcome = engine.evaluate(
            &[player("a", 10.0), player("b", 10.0)],
            t0 + Duration::from_secs(7),
        );
        assert!(outcome.fired);
        assert_eq!(outcome.triggering.len(), 1);
        assert_eq!(outcome.triggering[0].id, "b");
    }

    #[test]
    fn test_only_once_fires_once() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::OnlyOnce, 0.0));
        let t0 = Instant::now();
        let fires = (0..100u64)
            .filter(|i| {
                engine
                    .evaluate(&[player("a", 10.0)], t0 + Duration::from_millis(50 * *i))
                    .fired
            })
            .count();
        assert_eq!(fires, 1);
    }

    #[test]
    fn test_only_once_survives_leaving() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::OnlyOnce, 0.0));
        let t0 = Instant::now();
        assert!(engine.evaluate(&[player("a", 10.0)], t0).fired);
        assert!(!engine.evaluate(&[], t0 + Duration::from_secs(1)).fired);
        assert!(!engine.evaluate(&[player("a", 10.0)], t0 + Duration::from_secs(2)).fired);
    }

    #[test]
    fn test_enter_leave_reenter_sequence() {
        let mut engine =
            ProximityAlertEngine::new(settings(AlertFrequencyMode::OnEnterLeaveReenter, 0.0));
        let t0 = Instant::now();
        let step = |n: u64| t0 + Duration::from_millis(50 * n);

        let mut fires = 0;
        // enter
        fires += engine.evaluate(&[player("a", 10.0)], step(0)).fired as usize;
        // stay
        for n in 1..10 {
            fires += engine.evaluate(&[player("a", 10.0)], step(n)).fired as usize;
        }
        // leave the alert distance but stay on the radar
        fires += engine.evaluate(&[player("a", 40.0)], step(10)).fired as usize;
        assert_eq!(engine.alerted_count(), 0);
        // re-enter
        fires += engine.evaluate(&[player("a", 10.0)], step(11)).fired as usize;
        fires += engine.evaluate(&[player("a", 10.0)], step(12)).fired as usize;

        assert_eq!(fires, 2);
    }

    #[test]
    fn test_enter_leave_tracks_empty_snapshot() {
        let mut engine =
            ProximityAlertEngine::new(settings(AlertFrequencyMode::OnEnterLeaveReenter, 0.0));
        let t0 = Instant::now();
        assert!(engine.evaluate(&[player("a", 10.0)], t0).fired);
        assert!(!engine.evaluate(&[], t0 + Duration::from_secs(1)).fired);
        assert!(engine.evaluate(&[player("a", 10.0)], t0 + Duration::from_secs(2)).fired);
    }

    #[test]
    fn test_duplicate_ids_fire_once() {
        let mut engine =
            ProximityAlertEngine::new(settings(AlertFrequencyMode::OnEnterLeaveReenter, 0.0));
        let outcome = engine.evaluate(&[player("a", 10.0), player("a", 11.0)], Instant::now());
        assert_eq!(outcome.triggering.len(), 1);
    }

    #[test]
    fn test_highlight_expiry_boundary() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::OnlyOnce, 0.0));
        let t0 = Instant::now();
        engine.evaluate(&[player("a", 10.0)], t0);

        let almost = t0 + Duration::from_millis(4999);
        assert!(engine.is_highlighted("a", almost));
        assert_eq!(engine.highlights(almost).count(), 1);

        let expired = t0 + HIGHLIGHT_DURATION;
        assert!(!engine.is_highlighted("a", expired));
        assert_eq!(engine.highlights(expired).count(), 0);

        engine.purge_expired(expired);
        assert_eq!(engine.highlights(t0).count(), 0);
    }

    #[test]
    fn test_highlight_fade() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::OnlyOnce, 0.0));
        let t0 = Instant::now();
        engine.evaluate(&[player("a", 10.0)], t0);

        assert_eq!(engine.highlight_fade("a", t0), Some(1.0));
        let half = engine
            .highlight_fade("a", t0 + Duration::from_millis(2500))
            .unwrap();
        assert!((half - 0.5).abs() < 1e-4);
        assert_eq!(engine.highlight_fade("a", t0 + HIGHLIGHT_DURATION), None);
        assert_eq!(engine.highlight_fade("missing", t0), None);
    }

    #[test]
    fn test_refire_refreshes_highlight() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::EveryInterval, 3.0));
        let t0 = Instant::now();
        engine.evaluate(&[player("a", 10.0)], t0);
        engine.evaluate(&[player("a", 10.0)], t0 + Duration::from_secs(3));

        assert!(engine.is_highlighted("a", t0 + Duration::from_secs(7)));
    }

    #[test]
    fn test_mode_switch_clears_state() {
        let mut engine =
            ProximityAlertEngine::new(settings(AlertFrequencyMode::OnEnterLeaveReenter, 0.0));
        let t0 = Instant::now();
        assert!(engine.evaluate(&[player("a", 10.0)], t0).fired);
        assert!(!engine.evaluate(&[player("a", 10.0)], t0 + Duration::from_secs(1)).fired);

        engine.set_mode(AlertFrequencyMode::OnlyOnce);
        assert_eq!(engine.highlights(t0).count(), 0);
        assert!(engine.evaluate(&[player("a", 10.0)], t0 + Duration::from_secs(2)).fired);

        engine.set_mode(AlertFrequencyMode::OnEnterLeaveReenter);
        assert!(engine.evaluate(&[player("a", 10.0)], t0 + Duration::from_secs(3)).fired);
    }

    #[test]
    fn test_update_settings_only_clears_on_relevant_change() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::OnlyOnce, 0.0));
        let t0 = Instant::now();
        engine.evaluate(&[player("a", 10.0)], t0);
        assert_eq!(engine.alerted_count(), 1);

        let mut next = engine.settings().clone();
        next.sound_enabled = false;
        engine.update_settings(next.clone());
        assert_eq!(engine.alerted_count(), 1);

        next.alert_distance = 15.0;
        engine.update_settings(next);
        assert_eq!(engine.alerted_count(), 0);
    }

    #[test]
    fn test_disabled_evaluation_still_purges_highlights() {
        let mut engine = ProximityAlertEngine::new(settings(AlertFrequencyMode::OnlyOnce, 0.0));
        let t0 = Instant::now();
        engine.evaluate(&[player("a", 10.0)], t0);
        engine.set_enabled(false);

        engine.evaluate(&[], t0 + Duration::from_secs(6));
        assert_eq!(engine.highlights(t0).count(), 0);
    }

    #[test]
    fn test_huge_cooldown_from_json_blocks_refire() {
        let loaded: AlertSettings =
            serde_json::from_str(r#"{"enabled":true,"cooldown_seconds":1e20}"#).unwrap();
        let mut engine = ProximityAlertEngine::new(loaded);
        let t0 = Instant::now();

        assert!(engine.evaluate(&[player("a", 10.0)], t0).fired);
        let later = engine.evaluate(&[player("b", 12.0)], t0 + Duration::from_secs(1));
        assert!(!later.fired);
    }
}
