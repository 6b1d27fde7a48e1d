// Per-category capabilities: radar visibility, object list membership, tether
// lines, alert opt-in and draw color, looked up from one table instead of
// per-feature matches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::model::ObjectCategory;

pub type Rgba = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Shown on the radar and in snapshots
    pub visible: bool,
    /// Shown in the nearest-first object list
    #[serde(default)]
    pub listed: bool,
    /// Draw a line from the player to the object
    pub tether: bool,
    /// Opt-in flag for alerting on this category
    pub alert: bool,
    pub color: Rgba,
}

impl CategoryRule {
    const fn new(visible: bool, listed: bool, color: Rgba) -> Self {
        Self {
            visible,
            listed,
            tether: false,
            alert: false,
            color,
        }
    }

    /// Rule used for a category missing from a hand-edited settings file
    pub const HIDDEN: CategoryRule = CategoryRule::new(false, false, [1.0, 1.0, 1.0, 1.0]);
}

/// Capability table - persisted in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRules {
    rules: HashMap<ObjectCategory, CategoryRule>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        let rules = ObjectCategory::all()
            .iter()
            .map(|category| (*category, default_rule(*category)))
            .collect();
        Self { rules }
    }
}

fn default_rule(category: ObjectCategory) -> CategoryRule {
    use ObjectCategory::*;
    match category {
        Player => CategoryRule::new(true, true, [0.0, 0.0, 1.0, 1.0]),
        NPC | FriendlyNPC => CategoryRule::new(true, true, [1.0, 1.0, 0.0, 1.0]),
        Treasure => CategoryRule::new(true, true, [1.0, 0.8, 0.0, 1.0]),
        GatheringPoint => CategoryRule::new(true, true, [0.0, 1.0, 0.0, 1.0]),
        Aetheryte => CategoryRule::new(true, true, [0.5, 0.5, 1.0, 1.0]),
        EventObject => CategoryRule::new(false, true, [1.0, 0.5, 0.0, 1.0]),
        Mount => CategoryRule::new(false, false, [0.8, 0.4, 0.2, 1.0]),
        Companion => CategoryRule::new(false, false, [1.0, 0.7, 1.0, 1.0]),
        Retainer => CategoryRule::new(false, false, [0.7, 0.7, 0.7, 1.0]),
        HousingObject => CategoryRule::new(false, false, [0.6, 0.3, 0.1, 1.0]),
        AreaObject => CategoryRule::new(false, false, [0.5, 0.8, 0.5, 1.0]),
        CutsceneObject => CategoryRule::new(false, false, [1.0, 0.0, 1.0, 1.0]),
        CardStand => CategoryRule::new(false, false, [0.9, 0.9, 0.1, 1.0]),
        Ornament => CategoryRule::new(false, false, [0.8, 0.2, 0.8, 1.0]),
        IslandSanctuaryObject => CategoryRule::new(true, true, [0.2, 0.8, 0.6, 1.0]),
        Unknown => CategoryRule::HIDDEN,
    }
}

impl CategoryRules {
    pub fn rule(&self, category: ObjectCategory) -> CategoryRule {
        self.rules
            .get(&category)
            .copied()
            .unwrap_or(CategoryRule::HIDDEN)
    }

    pub fn rule_mut(&mut self, category: ObjectCategory) -> &mut CategoryRule {
        self.rules.entry(category).or_insert(CategoryRule::HIDDEN)
    }

    pub fn is_visible(&self, category: ObjectCategory) -> bool {
        self.rule(category).visible
    }

    pub fn is_listed(&self, category: ObjectCategory) -> bool {
        self.rule(category).listed
    }

    pub fn draws_tether(&self, category: ObjectCategory) -> bool {
        self.rule(category).tether
    }

    pub fn alerts_on(&self, category: ObjectCategory) -> bool {
        self.rule(category).alert
    }

    pub fn color(&self, category: ObjectCategory) -> Rgba {
        self.rule(category).color
    }

    pub fn set_visible(&mut self, category: ObjectCategory, visible: bool) {
        self.rule_mut(category).visible = visible;
    }

    pub fn contains(&self, category: ObjectCategory) -> bool {
        self.rules.contains_key(&category)
    }
}
