//! Registry of bonuses placed on the map and their pickup state.

use trophy_chase_core::{Aabb, BonusId, BonusKind, BonusSnapshot, TileKind};

use crate::TileMap;

#[derive(Clone, Debug)]
struct Bonus {
    id: BonusId,
    kind: BonusKind,
    bounds: Aabb,
    collected: bool,
}

impl Bonus {
    fn snapshot(&self) -> BonusSnapshot {
        BonusSnapshot {
            id: self.id,
            kind: self.kind,
            bounds: self.bounds,
            collected: self.collected,
        }
    }
}

/// Active and collected bonuses, in registry insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct CollectibleRegistry {
    active: Vec<Bonus>,
    collected: Vec<Bonus>,
}

impl CollectibleRegistry {
    /// Places a trophy on every bonus spawn tile of the map.
    pub(crate) fn from_map(map: &TileMap) -> Self {
        let edge = map.tile_length();
        let active = map
            .cells_of(TileKind::BonusSpawn)
            .enumerate()
            .map(|(index, origin)| Bonus {
                id: BonusId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                kind: BonusKind::Trophy,
                bounds: Aabb::new(origin, edge, edge),
                collected: false,
            })
            .collect();
        Self {
            active,
            collected: Vec::new(),
        }
    }

    /// Collects the first active bonus overlapping `area`, if any.
    ///
    /// At most one bonus is collected per call. A collected bonus leaves the
    /// active set permanently, so repeated calls never report it again.
    pub(crate) fn collect_overlapping(&mut self, area: &Aabb) -> Option<BonusId> {
        let index = self
            .active
            .iter()
            .position(|bonus| bonus.bounds.overlaps(area))?;
        let mut bonus = self.active.remove(index);
        debug_assert!(!bonus.collected, "active bonus already marked collected");
        bonus.collected = true;
        let id = bonus.id;
        self.collected.push(bonus);
        Some(id)
    }

    /// Number of bonuses still waiting to be collected.
    pub(crate) fn remaining(&self) -> usize {
        self.active.len()
    }

    /// Number of bonuses registered when the level was loaded.
    pub(crate) fn total(&self) -> usize {
        self.active.len() + self.collected.len()
    }

    /// Reports whether every bonus has been collected.
    pub(crate) fn all_collected(&self) -> bool {
        self.active.is_empty()
    }

    /// Snapshots of every bonus, collected or not, ordered by identifier.
    pub(crate) fn snapshots(&self) -> Vec<BonusSnapshot> {
        let mut snapshots: Vec<BonusSnapshot> = self
            .active
            .iter()
            .chain(self.collected.iter())
            .map(Bonus::snapshot)
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trophy_chase_core::WorldPoint;

    #[test]
    fn registers_one_trophy_per_marker() {
        let map = TileMap::parse("b0\n0b", 1.0);
        let registry = CollectibleRegistry::from_map(&map);

        assert_eq!(registry.total(), 2);
        assert_eq!(registry.remaining(), 2);
        assert!(!registry.all_collected());
    }

    #[test]
    fn collects_first_match_only() {
        let map = TileMap::parse("bb", 1.0);
        let mut registry = CollectibleRegistry::from_map(&map);
        let spanning = Aabb::new(WorldPoint::new(0.5, 0.0), 1.0, 1.0);

        assert_eq!(registry.collect_overlapping(&spanning), Some(BonusId::new(0)));
        assert_eq!(registry.remaining(), 1);
        assert_eq!(registry.collect_overlapping(&spanning), Some(BonusId::new(1)));
        assert_eq!(registry.collect_overlapping(&spanning), None);
        assert!(registry.all_collected());
    }

    #[test]
    fn collected_bonus_never_reenters_active_set() {
        let map = TileMap::parse("0b", 1.0);
        let mut registry = CollectibleRegistry::from_map(&map);
        let on_bonus = Aabb::new(WorldPoint::new(1.0, 0.0), 0.8, 1.0);

        assert!(registry.collect_overlapping(&on_bonus).is_some());
        assert!(registry.collect_overlapping(&on_bonus).is_none());

        let snapshots = registry.snapshots();
        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0].collected);
        assert_eq!(registry.total(), 1);
    }

    #[test]
    fn map_without_markers_is_immediately_complete() {
        let map = TileMap::parse("000", 1.0);
        let registry = CollectibleRegistry::from_map(&map);
        assert!(registry.all_collected());
        assert_eq!(registry.total(), 0);
    }
}
