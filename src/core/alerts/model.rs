// Alert model types for configuration and results.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::core::model::{EntityId, TrackedEntity};

/// How long a triggering entity stays highlighted after an alert
pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(5);

/// When an entity that stays in range may alert again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AlertFrequencyMode {
    /// Alert once per entity until the alert data is cleared
    OnlyOnce,
    /// Alert on every evaluation that passes the cooldown
    #[default]
    EveryInterval,
    /// Alert on entering range, then again only after leaving and coming back
    OnEnterLeaveReenter,
}

impl AlertFrequencyMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OnlyOnce => "Only once",
            Self::EveryInterval => "Every interval",
            Self::OnEnterLeaveReenter => "On enter, leave and re-enter",
        }
    }

    pub fn all() -> &'static [AlertFrequencyMode] {
        &[Self::OnlyOnce, Self::EveryInterval, Self::OnEnterLeaveReenter]
    }
}

/// Sound options for proximity alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AlertSound {
    #[default]
    Ping,
    Alert,
    Notification,
    Alarm,
}

impl AlertSound {
    /// Map a numeric sound id; anything unrecognised plays the ping
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Self::Alert,
            2 => Self::Notification,
            3 => Self::Alarm,
            _ => Self::Ping,
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Self::Ping => 0,
            Self::Alert => 1,
            Self::Notification => 2,
            Self::Alarm => 3,
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            Self::Ping => "ping.wav",
            Self::Alert => "alert.wav",
            Self::Notification => "notification.wav",
            Self::Alarm => "alarm.wav",
        }
    }
}

/// Proximity alert configuration - persisted in settings.json
///
/// `alert_distance` is expected to be no larger than the detection radius and
/// `cooldown_seconds` to be non-negative. Neither is validated; see
/// [`AlertSettings::cooldown`] for how out-of-range cooldowns are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub enabled: bool,
    pub sound_enabled: bool,
    pub alert_distance: f32,
    pub cooldown_seconds: f32,
    pub sound: AlertSound,
    pub mode: AlertFrequencyMode,
    pub show_alert_ring: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            sound_enabled: true,
            alert_distance: 25.0,
            cooldown_seconds: 5.0,
            sound: AlertSound::Ping,
            mode: AlertFrequencyMode::EveryInterval,
            show_alert_ring: true,
        }
    }
}

impl AlertSettings {
    /// NaN and negative values mean no cooldown; values too large for a
    /// `Duration` (including infinity) saturate to `Duration::MAX`.
    pub fn cooldown(&self) -> Duration {
        if self.cooldown_seconds > 0.0 {
            Duration::try_from_secs_f32(self.cooldown_seconds).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }
}

/// A recently alerted entity, kept around for the radar's fading ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightEntry {
    pub triggered_at: Instant,
}

impl HighlightEntry {
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.triggered_at) < HIGHLIGHT_DURATION
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertOutcome {
    pub fired: bool,
    pub triggering: Vec<TrackedEntity>,
}

impl AlertOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn triggering_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.triggering.iter().map(|e| &e.id)
    }

    /// "Player proximity alert: A (20.0 yalms), B (3.5 yalms)"
    pub fn chat_message(&self) -> String {
        let names: Vec<String> = self.triggering.iter().map(TrackedEntity::describe).collect();
        format!("Player proximity alert: {}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ObjectCategory, Position};

    #[test]
    fn test_sound_filenames() {
        assert_eq!(AlertSound::Ping.filename(), "ping.wav");
        assert_eq!(AlertSound::Alarm.filename(), "alarm.wav");
        assert_eq!(AlertSound::from_id(2), AlertSound::Notification);
        assert_eq!(AlertSound::from_id(42), AlertSound::Ping);
        for id in 0..4 {
            assert_eq!(AlertSound::from_id(id).id(), id);
        }
    }

    #[test]
    fn test_cooldown_clamps_bad_values() {
        let mut settings = AlertSettings::default();
        assert_eq!(settings.cooldown(), Duration::from_secs(5));

        settings.cooldown_seconds = -3.0;
        assert_eq!(settings.cooldown(), Duration::ZERO);

        settings.cooldown_seconds = f32::NAN;
        assert_eq!(settings.cooldown(), Duration::ZERO);
    }

    #[test]
    fn test_cooldown_saturates_huge_values() {
        let mut settings = AlertSettings::default();
        settings.cooldown_seconds = 1e20;
        assert_eq!(settings.cooldown(), Duration::MAX);

        settings.cooldown_seconds = f32::INFINITY;
        assert_eq!(settings.cooldown(), Duration::MAX);

        settings.cooldown_seconds = f32::NEG_INFINITY;
        assert_eq!(settings.cooldown(), Duration::ZERO);
    }

    #[test]
    fn test_highlight_liveness_boundary() {
        let t0 = Instant::now();
        let entry = HighlightEntry { triggered_at: t0 };
        assert!(entry.is_live(t0));
        assert!(entry.is_live(t0 + Duration::from_millis(4999)));
        assert!(!entry.is_live(t0 + HIGHLIGHT_DURATION));
        assert!(!entry.is_live(t0 + Duration::from_secs(6)));
    }

    #[test]
    fn test_chat_message() {
        let outcome = AlertOutcome {
            fired: true,
            triggering: vec![TrackedEntity {
                id: "1".to_string(),
                name: "Wandering Minstrel".to_string(),
                category: ObjectCategory::Player,
                position: Position::new(20.0, 0.0, 0.0),
                distance: 20.0,
            }],
        };
        assert_eq!(
            outcome.chat_message(),
            "Player proximity alert: Wandering Minstrel (20.0 yalms)"
        );
    }

    #[test]
    fn test_all_modes_have_names() {
        for mode in AlertFrequencyMode::all() {
            assert!(!mode.display_name().is_empty());
        }
    }
}
