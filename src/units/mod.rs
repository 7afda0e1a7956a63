use bevy::prelude::*;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier for a colonist unit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitKind {
    #[default]
    FreeColonist,
    IndenturedServant,
    ExpertFarmer,
    Soldier,
    Pioneer,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::FreeColonist => write!(f, "Free Colonist"),
            UnitKind::IndenturedServant => write!(f, "Indentured Servant"),
            UnitKind::ExpertFarmer => write!(f, "Expert Farmer"),
            UnitKind::Soldier => write!(f, "Soldier"),
            UnitKind::Pioneer => write!(f, "Pioneer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
}

/// Registry of all colonist units, keyed by id.
///
/// Where a unit currently *is* (on the dock, aboard a ship) is owned by the
/// dock roster and the cargo holds; this registry only answers "does this
/// unit still exist and what is it".
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitRegistry {
    units: BTreeMap<UnitId, Unit>,
    next_id: u32,
}

impl UnitRegistry {
    pub fn register(&mut self, kind: UnitKind) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.insert(id, Unit { kind });
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Remove a unit from the game entirely (starvation, combat, etc.)
    pub fn discharge(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }
}

/// Units currently standing at the harbor dock, in arrival order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct DockRoster {
    units: Vec<UnitId>,
}

impl DockRoster {
    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains(&id)
    }

    pub fn add(&mut self, id: UnitId) {
        if !self.units.contains(&id) {
            self.units.push(id);
        }
    }

    /// Returns false if the unit was not on the dock
    pub fn remove(&mut self, id: UnitId) -> bool {
        let before = self.units.len();
        self.units.retain(|u| *u != id);
        self.units.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_assigns_fresh_ids() {
        let mut registry = UnitRegistry::default();
        let a = registry.register(UnitKind::FreeColonist);
        let b = registry.register(UnitKind::Soldier);
        assert_ne!(a, b);
        assert_eq!(registry.get(b).unwrap().kind, UnitKind::Soldier);
    }

    #[test]
    fn discharge_removes_the_unit() {
        let mut registry = UnitRegistry::default();
        let id = registry.register(UnitKind::Pioneer);
        assert!(registry.contains(id));
        registry.discharge(id);
        assert!(!registry.contains(id));
    }

    #[test]
    fn dock_roster_add_remove() {
        let mut dock = DockRoster::default();
        let id = UnitId(7);
        dock.add(id);
        dock.add(id); // idempotent
        assert_eq!(dock.len(), 1);
        assert!(dock.remove(id));
        assert!(!dock.remove(id));
        assert!(dock.is_empty());
    }
}
