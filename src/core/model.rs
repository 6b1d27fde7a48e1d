use nalgebra::Point3;
use serde::{Deserialize, Serialize};

pub type EntityId = String;
pub type Position = Point3<f32>;

/// Raw kind code for island sanctuary objects, which the host exposes
/// without a named kind.
pub const ISLAND_SANCTUARY_KIND: u8 = 14;

/// Radar-facing category of a world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    Player,
    NPC,
    FriendlyNPC,
    Treasure,
    GatheringPoint,
    Aetheryte,
    EventObject,
    Mount,
    Companion,
    Retainer,
    HousingObject,
    AreaObject,
    CutsceneObject,
    CardStand,
    Ornament,
    IslandSanctuaryObject,
    Unknown,
}

impl ObjectCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::NPC => "NPC",
            Self::FriendlyNPC => "Friendly NPC",
            Self::Treasure => "Treasure",
            Self::GatheringPoint => "Gathering Point",
            Self::Aetheryte => "Aetheryte",
            Self::EventObject => "Event Object",
            Self::Mount => "Mount",
            Self::Companion => "Companion",
            Self::Retainer => "Retainer",
            Self::HousingObject => "Housing Object",
            Self::AreaObject => "Area Object",
            Self::CutsceneObject => "Cutscene Object",
            Self::CardStand => "Card Stand",
            Self::Ornament => "Ornament",
            Self::IslandSanctuaryObject => "Island Sanctuary",
            Self::Unknown => "Unknown",
        }
    }

    pub fn all() -> &'static [ObjectCategory] {
        &[
            Self::Player,
            Self::NPC,
            Self::FriendlyNPC,
            Self::Treasure,
            Self::GatheringPoint,
            Self::Aetheryte,
            Self::EventObject,
            Self::Mount,
            Self::Companion,
            Self::Retainer,
            Self::HousingObject,
            Self::AreaObject,
            Self::CutsceneObject,
            Self::CardStand,
            Self::Ornament,
            Self::IslandSanctuaryObject,
            Self::Unknown,
        ]
    }
}

/// Object kind as reported by the host's object table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Player,
    BattleNpc,
    EventNpc,
    Treasure,
    Aetheryte,
    GatheringPoint,
    EventObj,
    MountType,
    Companion,
    Retainer,
    Area,
    Housing,
    Cutscene,
    CardStand,
    Ornament,
    /// Any kind code without a named variant
    Other(u8),
}

impl ObjectKind {
    pub fn category(self) -> ObjectCategory {
        match self {
            Self::Player => ObjectCategory::Player,
            Self::BattleNpc => ObjectCategory::NPC,
            Self::EventNpc => ObjectCategory::FriendlyNPC,
            Self::Treasure => ObjectCategory::Treasure,
            Self::GatheringPoint => ObjectCategory::GatheringPoint,
            Self::Aetheryte => ObjectCategory::Aetheryte,
            Self::EventObj => ObjectCategory::EventObject,
            Self::MountType => ObjectCategory::Mount,
            Self::Companion => ObjectCategory::Companion,
            Self::Retainer => ObjectCategory::Retainer,
            Self::Housing => ObjectCategory::HousingObject,
            Self::Area => ObjectCategory::AreaObject,
            Self::Cutscene => ObjectCategory::CutsceneObject,
            Self::CardStand => ObjectCategory::CardStand,
            Self::Ornament => ObjectCategory::Ornament,
            Self::Other(ISLAND_SANCTUARY_KIND) => ObjectCategory::IslandSanctuaryObject,
            Self::Other(_) => ObjectCategory::Unknown,
        }
    }
}

/// One object as enumerated from the world, before any filtering
#[derive(Debug, Clone)]
pub struct WorldObject {
    pub id: EntityId,
    pub name: String,
    pub kind: ObjectKind,
    pub position: Position,
}

/// A nearby object that survived radius and category filtering.
/// Built fresh for every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
    pub id: EntityId,
    pub name: String,
    pub category: ObjectCategory,
    pub position: Position,
    /// Distance from the local player in yalms
    pub distance: f32,
}

impl TrackedEntity {
    /// "Name (12.3 yalms)", as used in chat lines and logs
    pub fn describe(&self) -> String {
        format!("{} ({:.1} yalms)", self.name, self.distance)
    }
}
