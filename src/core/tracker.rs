use super::alerts::categories::CategoryRules;
use super::error::Result;
use super::model::TrackedEntity;
use super::world::WorldObjectSource;

/// Which objects make it into a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotFilter {
    /// Inclusive radius in yalms, expected to be positive
    pub detection_radius: f32,
    pub hide_unnamed: bool,
    pub categories: CategoryRules,
}

impl Default for SnapshotFilter {
    fn default() -> Self {
        Self {
            detection_radius: 50.0,
            hide_unnamed: true,
            categories: CategoryRules::default(),
        }
    }
}

/// Builds snapshots of nearby objects from a world source.
pub struct ObjectTracker<S> {
    source: S,
    filter: SnapshotFilter,
}

impl<S: WorldObjectSource> ObjectTracker<S> {
    pub fn new(source: S, filter: SnapshotFilter) -> Self {
        Self { source, filter }
    }

    pub fn update_filter(&mut self, filter: SnapshotFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &SnapshotFilter {
        &self.filter
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn has_local_player(&self) -> bool {
        self.source.local_player().is_some()
    }

    /// Objects within the detection radius whose category is visible.
    /// Empty when there is no local player. Order follows the source.
    pub fn tracked_objects(&self) -> Result<Vec<TrackedEntity>> {
        let Some(player) = self.source.local_player() else {
            return Ok(Vec::new());
        };

        let mut result = Vec::new();
        for obj in self.source.enumerate()? {
            if obj.id == player.id {
                continue;
            }

            let distance = nalgebra::distance(&player.position, &obj.position);
            if distance > self.filter.detection_radius {
                continue;
            }

            let category = obj.kind.category();
            if !self.filter.categories.is_visible(category) {
                continue;
            }

            if self.filter.hide_unnamed && obj.name.trim().is_empty() {
                continue;
            }

            result.push(TrackedEntity {
                id: obj.id,
                name: obj.name,
                category,
                position: obj.position,
                distance,
            });
        }

        Ok(result)
    }
}

/// Nearest first, for object lists
pub fn sort_by_distance(entities: &mut [TrackedEntity]) {
    entities.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Object list view of a snapshot: listed categories only, nearest first
pub fn object_list(mut entities: Vec<TrackedEntity>, rules: &CategoryRules) -> Vec<TrackedEntity> {
    entities.retain(|entity| rules.is_listed(entity.category));
    sort_by_distance(&mut entities);
    entities
}
