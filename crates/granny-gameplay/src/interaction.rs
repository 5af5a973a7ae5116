//! Look-and-use interaction.
//!
//! Interactable things are kept in an explicit index of typed volumes. On an
//! interact press the player's eye ray is tested against the index and the
//! nearest hit that still means something wins.

use granny_common::{Aabb, ItemId, Ray};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::{SimEvent, SoundCue};
use crate::items::{Inventory, ItemSpawn};
use crate::player::PlayerKinematics;
use crate::spatial::HouseLayout;

/// Maximum reach of the interaction ray.
pub const INTERACT_DISTANCE: f32 = 10.0;

/// What an interactable volume belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractableKind {
    /// A collectible item
    Item(ItemId),
    /// A hiding spot, by catalog index
    HidingSpot(usize),
    /// The front door
    ExitDoor,
}

/// A volume the player can interact with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interactable {
    /// Owner of the volume
    pub kind: InteractableKind,
    /// Hit volume
    pub volume: Aabb,
}

/// All interactable volumes for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractableIndex {
    entries: Vec<Interactable>,
}

impl InteractableIndex {
    /// Builds the index from the house catalogs and this run's items.
    #[must_use]
    pub fn build(layout: &HouseLayout, items: &[ItemSpawn]) -> Self {
        let mut entries = Vec::with_capacity(items.len() + layout.hiding_spots().len() + 1);
        entries.extend(items.iter().map(|item| Interactable {
            kind: InteractableKind::Item(item.id),
            volume: item.pickup_volume(),
        }));
        entries.extend(
            layout
                .hiding_spots()
                .iter()
                .enumerate()
                .map(|(index, spot)| Interactable {
                    kind: InteractableKind::HidingSpot(index),
                    volume: spot.trigger_volume(),
                }),
        );
        entries.push(Interactable {
            kind: InteractableKind::ExitDoor,
            volume: layout.exit_door(),
        });
        Self { entries }
    }

    /// Number of indexed volumes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every volume hit by `ray` within `max_distance`, nearest first.
    #[must_use]
    pub fn cast(&self, ray: &Ray, max_distance: f32) -> Vec<(f32, Interactable)> {
        let mut hits: Vec<(f32, Interactable)> = self
            .entries
            .iter()
            .filter_map(|entry| entry.volume.ray_distance(ray).map(|t| (t, *entry)))
            .filter(|(t, _)| *t <= max_distance)
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits
    }
}

/// What an interact press did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionOutcome {
    /// Nothing meaningful was in reach
    Nothing,
    /// The player left a hiding spot
    Unhid,
    /// An item was picked up
    Collected(ItemId),
    /// The player hid
    Hid(String),
    /// The exit was used with an item selected
    UsedExit,
    /// The exit was tried with nothing selected
    ExitLocked,
}

/// Mutable run state an interaction can touch.
#[derive(Debug)]
pub struct InteractionContext<'a> {
    /// The player
    pub player: &'a mut PlayerKinematics,
    /// This run's items
    pub items: &'a mut [ItemSpawn],
    /// The player's inventory
    pub inventory: &'a mut Inventory,
    /// Static house catalogs
    pub layout: &'a HouseLayout,
    /// Interactable volumes
    pub index: &'a InteractableIndex,
}

/// Resolves one interact press.
pub fn interact(ctx: &mut InteractionContext<'_>, events: &mut Vec<SimEvent>) -> InteractionOutcome {
    if ctx.player.is_hidden() {
        ctx.player.unhide();
        debug!("Player left hiding spot");
        events.push(SimEvent::PlayerUnhid);
        return InteractionOutcome::Unhid;
    }

    let ray = ctx.player.eye_ray();
    for (distance, hit) in ctx.index.cast(&ray, INTERACT_DISTANCE) {
        match hit.kind {
            InteractableKind::Item(id) => {
                let Some(item) = ctx.items.iter_mut().find(|item| item.id == id) else {
                    continue;
                };
                if !item.collect() {
                    continue;
                }
                info!("Collected {} ({:.1} away)", item.item_type, distance);
                ctx.inventory.add(item.item_type);
                events.push(SimEvent::ItemCollected {
                    id,
                    item_type: item.item_type,
                });
                events.push(SimEvent::Sound(SoundCue::Pickup));
                return InteractionOutcome::Collected(id);
            }
            InteractableKind::HidingSpot(index) => {
                let Some(spot) = ctx.layout.hiding_spots().get(index) else {
                    continue;
                };
                ctx.player.hide(spot);
                info!("Player hid in {}", spot.id);
                events.push(SimEvent::PlayerHid {
                    spot: spot.id.to_string(),
                });
                return InteractionOutcome::Hid(spot.id.to_string());
            }
            InteractableKind::ExitDoor => {
                return match ctx.inventory.selected() {
                    Some(item) => {
                        debug!("Used {item} on the exit");
                        events.push(SimEvent::UsedExitWithItem { item });
                        InteractionOutcome::UsedExit
                    }
                    None => {
                        debug!("Exit is locked");
                        events.push(SimEvent::ExitLocked);
                        InteractionOutcome::ExitLocked
                    }
                };
            }
        }
    }

    InteractionOutcome::Nothing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemType;
    use crate::spatial::RoomType;
    use glam::Vec3;

    struct Fixture {
        layout: HouseLayout,
        player: PlayerKinematics,
        items: Vec<ItemSpawn>,
        inventory: Inventory,
        index: InteractableIndex,
    }

    impl Fixture {
        /// Player on the ground floor of the foyer facing -Z, with one item
        /// placed a few units ahead.
        fn new() -> Self {
            let layout = HouseLayout::standard();
            let player = PlayerKinematics::new(Vec3::new(0.0, 5.0, 0.0), &layout);
            let items = vec![ItemSpawn::new(
                ItemId::new(0),
                ItemType::MasterKey,
                Vec3::new(0.0, 5.0, -4.0),
                RoomType::Foyer,
            )];
            let index = InteractableIndex::build(&layout, &items);
            Self {
                layout,
                player,
                items,
                inventory: Inventory::new(),
                index,
            }
        }

        fn interact(&mut self) -> (InteractionOutcome, Vec<SimEvent>) {
            let mut events = Vec::new();
            let mut ctx = InteractionContext {
                player: &mut self.player,
                items: &mut self.items,
                inventory: &mut self.inventory,
                layout: &self.layout,
                index: &self.index,
            };
            let outcome = interact(&mut ctx, &mut events);
            (outcome, events)
        }
    }

    #[test]
    fn test_index_contents() {
        let fixture = Fixture::new();
        assert_eq!(fixture.index.len(), 1 + fixture.layout.hiding_spots().len() + 1);
    }

    #[test]
    fn test_collect_item_once() {
        let mut fixture = Fixture::new();
        let (outcome, events) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::Collected(ItemId::new(0)));
        assert!(events.contains(&SimEvent::Sound(SoundCue::Pickup)));
        assert!(fixture.items[0].is_collected());
        assert_eq!(fixture.inventory.items(), &[ItemType::MasterKey]);

        let (outcome, _) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::Nothing);
        assert_eq!(fixture.inventory.len(), 1);
    }

    #[test]
    fn test_out_of_reach() {
        let mut fixture = Fixture::new();
        fixture.items[0].position = Vec3::new(0.0, 5.0, -15.0);
        fixture.index = InteractableIndex::build(&fixture.layout, &fixture.items);
        let (outcome, events) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::Nothing);
        assert!(events.is_empty());
        assert!(!fixture.items[0].is_collected());
    }

    #[test]
    fn test_hide_and_unhide() {
        let mut fixture = Fixture::new();
        // Stand in the kitchen facing the cabinet at (-40, 0, 15)
        fixture.player = PlayerKinematics::new(Vec3::new(-40.0, 5.0, 8.0), &fixture.layout);
        fixture.player.look(std::f32::consts::PI, 0.0);
        let (outcome, events) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::Hid("cabinet-kitchen".to_string()));
        assert!(fixture.player.is_hidden());
        assert_eq!(fixture.player.position, Vec3::new(-40.0, 4.0, 15.0));
        assert_eq!(
            events,
            vec![SimEvent::PlayerHid {
                spot: "cabinet-kitchen".to_string()
            }]
        );

        let (outcome, _) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::Unhid);
        assert!(!fixture.player.is_hidden());
        assert_eq!(fixture.player.position, Vec3::new(-35.0, 0.0, 15.0));
    }

    #[test]
    fn test_hidden_player_cannot_collect() {
        let mut fixture = Fixture::new();
        let spot = fixture.layout.hiding_spots()[0].clone();
        fixture.player.hide(&spot);
        let (outcome, _) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::Unhid);
        assert!(!fixture.items[0].is_collected());
    }

    #[test]
    fn test_exit_door() {
        let mut fixture = Fixture::new();
        fixture.items.clear();
        fixture.index = InteractableIndex::build(&fixture.layout, &fixture.items);
        // Face +Z towards the door at z = 20
        fixture.player = PlayerKinematics::new(Vec3::new(0.0, 5.0, 14.0), &fixture.layout);
        fixture.player.look(std::f32::consts::PI, 0.0);

        let (outcome, events) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::ExitLocked);
        assert_eq!(events, vec![SimEvent::ExitLocked]);

        fixture.inventory.add(ItemType::Teddy);
        fixture.inventory.select(ItemType::Teddy);
        let (outcome, events) = fixture.interact();
        assert_eq!(outcome, InteractionOutcome::UsedExit);
        assert_eq!(events, vec![SimEvent::UsedExitWithItem { item: ItemType::Teddy }]);
    }
}
