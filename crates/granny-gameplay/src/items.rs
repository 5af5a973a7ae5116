//! Collectible items, per-run placement and the player's inventory.

use glam::Vec3;
use granny_common::{Aabb, ItemId, LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::spatial::{HouseLayout, RoomType};

/// Item types hidden around the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Opens the front door
    MasterKey,
    /// Cuts wires
    Pliers,
    /// Distracts animals
    Meat,
    /// Breaks boards
    Hammer,
    /// Loosens bolts
    Wrench,
    /// Opens the padlock
    PadlockKey,
    /// Opens the weapon case
    WeaponKey,
    /// Shotgun
    Shotgun,
    /// Crossbow
    Crossbow,
    /// Teddy bear
    Teddy,
}

impl ItemType {
    /// All item types, in id order.
    pub const ALL: [Self; 10] = [
        Self::MasterKey,
        Self::Pliers,
        Self::Meat,
        Self::Hammer,
        Self::Wrench,
        Self::PadlockKey,
        Self::WeaponKey,
        Self::Shotgun,
        Self::Crossbow,
        Self::Teddy,
    ];

    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::MasterKey => "Master Key",
            Self::Pliers => "Pliers",
            Self::Meat => "Meat",
            Self::Hammer => "Hammer",
            Self::Wrench => "Wrench",
            Self::PadlockKey => "Padlock Key",
            Self::WeaponKey => "Weapon Key",
            Self::Shotgun => "Shotgun",
            Self::Crossbow => "Crossbow",
            Self::Teddy => "Teddy",
        }
    }

    /// Check if this item unlocks the exit.
    #[must_use]
    pub fn opens_exit(self) -> bool {
        matches!(self, Self::MasterKey)
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An item placed in the house for the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    /// Run-scoped id
    pub id: ItemId,
    /// What the item is
    pub item_type: ItemType,
    /// World position
    pub position: Vec3,
    /// Room the item was placed in
    pub room: RoomType,
    /// Whether the player has picked it up
    collected: bool,
}

impl ItemSpawn {
    /// Edge length of the pickup volume.
    pub const PICKUP_SIZE: f32 = 1.5;

    /// Creates an uncollected spawn.
    #[must_use]
    pub const fn new(id: ItemId, item_type: ItemType, position: Vec3, room: RoomType) -> Self {
        Self {
            id,
            item_type,
            position,
            room,
            collected: false,
        }
    }

    /// Whether the item has been picked up.
    #[must_use]
    pub const fn is_collected(&self) -> bool {
        self.collected
    }

    /// Marks the item collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }

    /// Pickup volume around the item.
    #[must_use]
    pub fn pickup_volume(&self) -> Aabb {
        Aabb::from_center(self.position, Vec3::splat(Self::PICKUP_SIZE))
    }
}

/// Places every item type in a distinct, randomly chosen slot.
pub fn randomize_items(layout: &HouseLayout, rng: &mut fastrand::Rng) -> LayoutResult<Vec<ItemSpawn>> {
    let slots = layout.item_slots();
    if slots.len() < ItemType::ALL.len() {
        return Err(LayoutError::NotEnoughSpawnSlots {
            items: ItemType::ALL.len(),
            slots: slots.len(),
        });
    }

    let mut shuffled = slots.to_vec();
    rng.shuffle(&mut shuffled);

    let spawns: Vec<ItemSpawn> = ItemType::ALL
        .iter()
        .zip(shuffled)
        .enumerate()
        .map(|(index, (&item_type, slot))| {
            ItemSpawn::new(ItemId::new(index as u32), item_type, slot.position(), slot.room)
        })
        .collect();

    for spawn in &spawns {
        debug!("{} ({}) placed in {}", spawn.item_type, spawn.id, spawn.room);
    }

    Ok(spawns)
}

/// Ordered list of collected items plus the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<ItemType>,
    selected: Option<ItemType>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collected item.
    pub fn add(&mut self, item: ItemType) {
        self.items.push(item);
    }

    /// Checks if the inventory holds the item.
    #[must_use]
    pub fn contains(&self, item: ItemType) -> bool {
        self.items.contains(&item)
    }

    /// Checks if the inventory holds an item that opens the exit.
    #[must_use]
    pub fn has_exit_key(&self) -> bool {
        self.items.iter().any(|item| item.opens_exit())
    }

    /// Number of collected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Collected items in pickup order.
    #[must_use]
    pub fn items(&self) -> &[ItemType] {
        &self.items
    }

    /// Selects an item for use. Returns false if it isn't held.
    pub fn select(&mut self, item: ItemType) -> bool {
        if !self.contains(item) {
            return false;
        }
        self.selected = Some(item);
        true
    }

    /// The item currently selected for use.
    #[must_use]
    pub const fn selected(&self) -> Option<ItemType> {
        self.selected
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Empties the inventory and the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::ItemSlot;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_one_spawn_per_item_type() {
        let layout = HouseLayout::standard();
        let mut rng = fastrand::Rng::with_seed(7);
        let spawns = randomize_items(&layout, &mut rng);
        assert!(spawns.is_ok());
        let spawns = spawns.unwrap_or_default();
        assert_eq!(spawns.len(), ItemType::ALL.len());
        let types: HashSet<_> = spawns.iter().map(|s| s.item_type).collect();
        assert_eq!(types.len(), ItemType::ALL.len());
        assert!(spawns.iter().all(|s| !s.is_collected()));
    }

    #[test]
    fn test_ids_follow_item_order() {
        let layout = HouseLayout::standard();
        let mut rng = fastrand::Rng::with_seed(1);
        let spawns = randomize_items(&layout, &mut rng).unwrap_or_default();
        assert_eq!(spawns[0].id.to_string(), "item-0");
        assert_eq!(spawns[0].item_type, ItemType::MasterKey);
        assert_eq!(spawns[9].item_type, ItemType::Teddy);
    }

    #[test]
    fn test_not_enough_slots() {
        let layout = HouseLayout::standard()
            .with_item_slots(vec![ItemSlot::new(RoomType::Foyer, Vec3::ZERO)]);
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(
            randomize_items(&layout, &mut rng),
            Err(LayoutError::NotEnoughSpawnSlots { items: 10, slots: 1 })
        );
    }

    #[test]
    fn test_collect_once() {
        let mut spawn = ItemSpawn::new(ItemId::new(0), ItemType::Hammer, Vec3::ZERO, RoomType::Study);
        assert!(spawn.collect());
        assert!(!spawn.collect());
        assert!(spawn.is_collected());
    }

    #[test]
    fn test_inventory_selection() {
        let mut inv = Inventory::new();
        assert!(!inv.select(ItemType::MasterKey));
        inv.add(ItemType::MasterKey);
        assert!(inv.select(ItemType::MasterKey));
        assert_eq!(inv.selected(), Some(ItemType::MasterKey));
        assert!(inv.has_exit_key());
        inv.clear();
        assert!(inv.is_empty());
        assert_eq!(inv.selected(), None);
    }

    proptest! {
        #[test]
        fn test_spawns_use_distinct_slots(seed in any::<u64>()) {
            let layout = HouseLayout::standard();
            let mut rng = fastrand::Rng::with_seed(seed);
            let spawns = randomize_items(&layout, &mut rng);
            prop_assert!(spawns.is_ok());
            let spawns = spawns.unwrap_or_default();

            let mut used = HashSet::new();
            for spawn in &spawns {
                let slot = layout
                    .item_slots()
                    .iter()
                    .position(|slot| slot.room == spawn.room && slot.position() == spawn.position);
                prop_assert!(slot.is_some());
                if let Some(index) = slot {
                    prop_assert!(used.insert(index));
                    let expected = spawn.room.bounds().origin() + layout.item_slots()[index].offset;
                    prop_assert_eq!(spawn.position, expected);
                }
            }
        }
    }
}
