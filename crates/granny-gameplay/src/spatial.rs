//! Static house layout.
//!
//! This module provides:
//! - The room table and room membership queries
//! - Floor-level bands used for vertical snapping
//! - Hiding-spot, creaking-floor and item-slot catalogs
//!
//! Everything here is immutable once built; other systems only query it.

use glam::Vec3;
use granny_common::{horizontal_distance, Aabb, LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;

// ============================================================================
// Rooms
// ============================================================================

/// Every room of the house, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Where the player wakes up
    StartingBedroom,
    /// First guest bedroom
    Bedroom1,
    /// Second guest bedroom
    Bedroom2,
    /// Third guest bedroom
    Bedroom3,
    /// Nursery
    Nursery,
    /// Upstairs bathroom
    Bathroom,
    /// Walk-in closet
    WalkInCloset,
    /// Attic room full of mannequins
    MannequinRoom,
    /// Attic
    Attic,
    /// Attic bedroom
    Bedroom4,
    /// Jail cell
    Jail,
    /// Crawlspace vent
    VentTunnel,
    /// Locked special room
    SpecialRoom,
    /// Entrance hall with the exit door
    Foyer,
    /// Living room
    LivingRoom,
    /// Dining room
    DiningRoom,
    /// Kitchen
    Kitchen,
    /// Study
    Study,
    /// Basement, where Granny wakes up
    Basement,
    /// Garage
    Garage,
    /// Hidden basement area
    SecretArea,
    /// Sewer below the house
    Sewer,
    /// Backyard
    Backyard,
}

impl RoomType {
    /// All rooms in catalog order. Later entries win overlapping lookups.
    pub const ALL: [Self; 23] = [
        Self::StartingBedroom,
        Self::Bedroom1,
        Self::Bedroom2,
        Self::Bedroom3,
        Self::Nursery,
        Self::Bathroom,
        Self::WalkInCloset,
        Self::MannequinRoom,
        Self::Attic,
        Self::Bedroom4,
        Self::Jail,
        Self::VentTunnel,
        Self::SpecialRoom,
        Self::Foyer,
        Self::LivingRoom,
        Self::DiningRoom,
        Self::Kitchen,
        Self::Study,
        Self::Basement,
        Self::Garage,
        Self::SecretArea,
        Self::Sewer,
        Self::Backyard,
    ];

    /// Room reported when a position matches no room.
    pub const FALLBACK: Self = Self::Sewer;

    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::StartingBedroom => "Starting Bedroom",
            Self::Bedroom1 => "Bedroom 1",
            Self::Bedroom2 => "Bedroom 2",
            Self::Bedroom3 => "Bedroom 3",
            Self::Nursery => "Nursery",
            Self::Bathroom => "Bathroom",
            Self::WalkInCloset => "Walk-in Closet",
            Self::MannequinRoom => "Mannequin Room",
            Self::Attic => "Attic",
            Self::Bedroom4 => "Bedroom 4",
            Self::Jail => "Jail",
            Self::VentTunnel => "Vent Tunnel",
            Self::SpecialRoom => "Special Room",
            Self::Foyer => "Foyer",
            Self::LivingRoom => "Living Room",
            Self::DiningRoom => "Dining Room",
            Self::Kitchen => "Kitchen",
            Self::Study => "Study",
            Self::Basement => "Basement",
            Self::Garage => "Garage",
            Self::SecretArea => "Secret Area",
            Self::Sewer => "Sewer",
            Self::Backyard => "Backyard",
        }
    }

    /// Returns the room's box.
    #[must_use]
    pub const fn bounds(self) -> RoomBounds {
        match self {
            Self::StartingBedroom => RoomBounds::new(-20.0, 10.0, -10.0, 15.0, 9.0, 20.0),
            Self::Bedroom1 => RoomBounds::new(20.0, 10.0, -10.0, 20.0, 9.0, 20.0),
            Self::Bedroom2 => RoomBounds::new(20.0, 10.0, 15.0, 20.0, 9.0, 20.0),
            Self::Bedroom3 => RoomBounds::new(0.0, 10.0, 25.0, 15.0, 9.0, 15.0),
            Self::Nursery => RoomBounds::new(-20.0, 10.0, 25.0, 15.0, 9.0, 15.0),
            Self::Bathroom => RoomBounds::new(-20.0, 10.0, 10.0, 12.0, 9.0, 12.0),
            Self::WalkInCloset => RoomBounds::new(32.0, 10.0, 2.0, 6.0, 9.0, 15.0),
            Self::MannequinRoom => RoomBounds::new(0.0, 20.0, 0.0, 30.0, 8.0, 30.0),
            Self::Attic => RoomBounds::new(-20.0, 20.0, 0.0, 20.0, 8.0, 30.0),
            Self::Bedroom4 => RoomBounds::new(25.0, 20.0, -15.0, 15.0, 8.0, 15.0),
            Self::Jail => RoomBounds::new(25.0, 20.0, 10.0, 15.0, 8.0, 15.0),
            Self::VentTunnel => RoomBounds::new(-20.0, 21.0, 10.0, 8.0, 3.0, 8.0),
            Self::SpecialRoom => RoomBounds::new(0.0, 20.0, 25.0, 15.0, 8.0, 15.0),
            Self::Foyer => RoomBounds::new(0.0, 0.0, 0.0, 20.0, 9.0, 40.0),
            Self::LivingRoom => RoomBounds::new(-20.0, 0.0, -10.0, 20.0, 9.0, 20.0),
            Self::DiningRoom => RoomBounds::new(-20.0, 0.0, 10.0, 20.0, 9.0, 20.0),
            Self::Kitchen => RoomBounds::new(-40.0, 0.0, 10.0, 15.0, 9.0, 20.0),
            Self::Study => RoomBounds::new(20.0, 0.0, 0.0, 15.0, 9.0, 15.0),
            Self::Basement => RoomBounds::new(0.0, -10.0, 0.0, 30.0, 9.0, 30.0),
            Self::Garage => RoomBounds::new(25.0, -10.0, 0.0, 20.0, 9.0, 25.0),
            Self::SecretArea => RoomBounds::new(-25.0, -10.0, 0.0, 15.0, 9.0, 40.0),
            Self::Sewer => RoomBounds::new(0.0, -20.0, 0.0, 60.0, 8.0, 60.0),
            Self::Backyard => RoomBounds::new(-50.0, 0.0, 0.0, 40.0, 20.0, 60.0),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Axis-aligned room box.
///
/// `x`/`z` locate the centre of the footprint, `y` is the floor height and the
/// box spans `[y, y + h]` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    /// Footprint centre X
    pub x: f32,
    /// Floor height
    pub y: f32,
    /// Footprint centre Z
    pub z: f32,
    /// Width along X
    pub w: f32,
    /// Height along Y
    pub h: f32,
    /// Depth along Z
    pub d: f32,
}

impl RoomBounds {
    /// Creates room bounds.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32, h: f32, d: f32) -> Self {
        Self { x, y, z, w, h, d }
    }

    /// Returns the room origin (footprint centre at floor height).
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Checks whether a point lies inside the room.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        (point.x - self.x).abs() < self.w / 2.0
            && (point.z - self.z).abs() < self.d / 2.0
            && self.spans_height(point.y)
    }

    /// Checks whether height `y` lies within the room's vertical span.
    #[must_use]
    pub fn spans_height(&self, y: f32) -> bool {
        y >= self.y && y <= self.y + self.h
    }

    /// Returns the box as an [`Aabb`].
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_base(self.origin(), Vec3::new(self.w, self.h, self.d))
    }
}

// ============================================================================
// Floor levels
// ============================================================================

/// Fixed floor heights of the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FloorLevel {
    /// Sewer (-20)
    Sewer,
    /// Basement (-10)
    Basement,
    /// Ground floor (0)
    #[default]
    Ground,
    /// Upper floor (10)
    Upper,
    /// Attic (20)
    Attic,
}

impl FloorLevel {
    /// All levels from lowest to highest.
    pub const ALL: [Self; 5] = [
        Self::Sewer,
        Self::Basement,
        Self::Ground,
        Self::Upper,
        Self::Attic,
    ];

    /// Maximum distance from a level's height for a position to belong to it.
    pub const BAND_TOLERANCE: f32 = 8.0;

    /// Returns the floor height.
    #[must_use]
    pub const fn height(self) -> f32 {
        match self {
            Self::Sewer => -20.0,
            Self::Basement => -10.0,
            Self::Ground => 0.0,
            Self::Upper => 10.0,
            Self::Attic => 20.0,
        }
    }

    /// Returns the level nearest to a feet height, or Ground if none is
    /// within [`Self::BAND_TOLERANCE`]. Ties go to the higher level.
    #[must_use]
    pub fn band_for(feet_y: f32) -> Self {
        let mut best: Option<(Self, f32)> = None;
        for level in Self::ALL {
            let gap = (feet_y - level.height()).abs();
            if gap > Self::BAND_TOLERANCE {
                continue;
            }
            if best.map_or(true, |(_, best_gap)| gap <= best_gap) {
                best = Some((level, gap));
            }
        }
        best.map_or(Self::Ground, |(level, _)| level)
    }
}

// ============================================================================
// Hiding spots
// ============================================================================

/// Kinds of hiding furniture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HidingSpotType {
    /// Under a bed or crib
    Bed,
    /// Inside a wardrobe or cabinet
    Wardrobe,
    /// Inside a chest
    Chest,
    /// Inside a coffin
    Coffin,
    /// Inside a car trunk
    CarTrunk,
    /// Under a table
    Table,
}

impl HidingSpotType {
    /// Camera height above the spot while hidden.
    #[must_use]
    pub const fn vantage_height(self) -> f32 {
        match self {
            Self::Wardrobe => 4.0,
            Self::Bed | Self::Chest | Self::Coffin | Self::CarTrunk | Self::Table => 1.0,
        }
    }
}

/// A place the player can hide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HidingSpot {
    /// Stable id
    pub id: &'static str,
    /// Furniture kind
    pub spot_type: HidingSpotType,
    /// Base position
    pub position: Vec3,
    /// Facing in radians
    pub facing: f32,
    /// Owning room
    pub room: RoomType,
}

impl HidingSpot {
    /// Edge length of the trigger cube.
    pub const TRIGGER_SIZE: f32 = 6.0;

    /// Creates a hiding spot.
    #[must_use]
    pub const fn new(
        id: &'static str,
        spot_type: HidingSpotType,
        position: Vec3,
        facing: f32,
        room: RoomType,
    ) -> Self {
        Self {
            id,
            spot_type,
            position,
            facing,
            room,
        }
    }

    /// Returns the trigger volume (a cube whose base sits on the spot).
    #[must_use]
    pub fn trigger_volume(&self) -> Aabb {
        Aabb::from_base(self.position, Vec3::splat(Self::TRIGGER_SIZE))
    }

    /// Camera position while hiding here.
    #[must_use]
    pub fn vantage_point(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.spot_type.vantage_height(), 0.0)
    }
}

// ============================================================================
// Creaking floors
// ============================================================================

/// A loose floorboard patch that makes noise when stepped on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreakingZone {
    /// Centre of the patch at floor height
    pub position: Vec3,
    /// Patch size
    pub size: Vec3,
    /// Owning room
    pub room: RoomType,
}

impl CreakingZone {
    /// Vertical reach of a zone above or below its floor.
    pub const VERTICAL_REACH: f32 = 5.0;

    /// Creates a creaking zone.
    #[must_use]
    pub const fn new(position: Vec3, size: Vec3, room: RoomType) -> Self {
        Self {
            position,
            size,
            room,
        }
    }

    /// Checks whether the given feet position stands on this patch.
    #[must_use]
    pub fn contains_feet(&self, feet: Vec3) -> bool {
        (feet.x - self.position.x).abs() < self.size.x / 2.0
            && (feet.z - self.position.z).abs() < self.size.z / 2.0
            && (feet.y - self.position.y).abs() < Self::VERTICAL_REACH
    }
}

// ============================================================================
// Item slots
// ============================================================================

/// A candidate item location, relative to a room origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSlot {
    /// Room the slot belongs to
    pub room: RoomType,
    /// Offset from the room origin
    pub offset: Vec3,
}

impl ItemSlot {
    /// Creates an item slot.
    #[must_use]
    pub const fn new(room: RoomType, offset: Vec3) -> Self {
        Self { room, offset }
    }

    /// Returns the absolute position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.room.bounds().origin() + self.offset
    }
}

// ============================================================================
// House layout
// ============================================================================

/// Footprint of the attic vent drop.
const VENT_DROP_MIN: Vec3 = Vec3::new(-24.0, 15.0, 6.0);
const VENT_DROP_MAX: Vec3 = Vec3::new(-16.0, 15.0, 14.0);

/// Queryable house catalogs.
#[derive(Debug, Clone)]
pub struct HouseLayout {
    hiding_spots: Vec<HidingSpot>,
    creaking_zones: Vec<CreakingZone>,
    item_slots: Vec<ItemSlot>,
    exit_door: Aabb,
    player_start: Vec3,
    antagonist_start: Vec3,
}

impl Default for HouseLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl HouseLayout {
    /// The stock house.
    #[must_use]
    pub fn standard() -> Self {
        let hiding_spots = vec![
            HidingSpot::new(
                "bed-start",
                HidingSpotType::Bed,
                Vec3::new(-20.0, 11.0, -15.0),
                0.0,
                RoomType::StartingBedroom,
            ),
            HidingSpot::new(
                "cabinet-start",
                HidingSpotType::Wardrobe,
                Vec3::new(-15.0, 10.0, -5.0),
                -FRAC_PI_2,
                RoomType::StartingBedroom,
            ),
            HidingSpot::new(
                "bed-bed1",
                HidingSpotType::Bed,
                Vec3::new(20.0, 11.0, -15.0),
                0.0,
                RoomType::Bedroom1,
            ),
            HidingSpot::new(
                "bed-bed3",
                HidingSpotType::Bed,
                Vec3::new(0.0, 11.0, 28.0),
                0.0,
                RoomType::Bedroom3,
            ),
            HidingSpot::new(
                "crib-nursery",
                HidingSpotType::Bed,
                Vec3::new(-20.0, 11.0, 28.0),
                0.0,
                RoomType::Nursery,
            ),
            HidingSpot::new(
                "cabinet-kitchen",
                HidingSpotType::Wardrobe,
                Vec3::new(-40.0, 0.0, 15.0),
                FRAC_PI_2,
                RoomType::Kitchen,
            ),
            HidingSpot::new(
                "coffin-backyard",
                HidingSpotType::Coffin,
                Vec3::new(-55.0, 1.0, 0.0),
                0.0,
                RoomType::Backyard,
            ),
            HidingSpot::new(
                "trunk-garage",
                HidingSpotType::CarTrunk,
                Vec3::new(25.0, -9.0, 0.0),
                0.0,
                RoomType::Garage,
            ),
        ];

        let patch = Vec3::new(4.0, 1.0, 4.0);
        let creaking_zones = vec![
            CreakingZone::new(Vec3::new(-20.0, 10.0, 10.0), patch, RoomType::Bathroom),
            CreakingZone::new(Vec3::new(20.0, 10.0, -5.0), patch, RoomType::Bedroom1),
            CreakingZone::new(Vec3::new(-35.0, 0.0, 10.0), patch, RoomType::Kitchen),
        ];

        let item_slots = vec![
            ItemSlot::new(RoomType::StartingBedroom, Vec3::new(-2.0, 1.0, -2.0)),
            ItemSlot::new(RoomType::Bedroom1, Vec3::new(5.0, 1.0, 5.0)),
            ItemSlot::new(RoomType::Bedroom3, Vec3::new(0.0, 1.0, -3.0)),
            ItemSlot::new(RoomType::Kitchen, Vec3::new(0.0, 2.0, 0.0)),
            ItemSlot::new(RoomType::Garage, Vec3::new(-4.0, 1.0, 0.0)),
            ItemSlot::new(RoomType::Nursery, Vec3::new(2.0, 1.0, 2.0)),
            ItemSlot::new(RoomType::MannequinRoom, Vec3::new(-5.0, 1.0, 0.0)),
            ItemSlot::new(RoomType::Bathroom, Vec3::new(2.0, 1.0, 0.0)),
            ItemSlot::new(RoomType::SecretArea, Vec3::new(0.0, 1.0, 0.0)),
            ItemSlot::new(RoomType::Backyard, Vec3::new(5.0, 1.0, 0.0)),
        ];

        Self {
            hiding_spots,
            creaking_zones,
            item_slots,
            exit_door: Aabb::from_center(Vec3::new(0.0, 4.0, 20.0), Vec3::new(4.0, 8.0, 0.5)),
            player_start: Vec3::new(-20.0, 15.0, -10.0),
            antagonist_start: Vec3::new(0.0, -10.0, 0.0),
        }
    }

    /// Replaces the hiding-spot catalog.
    #[must_use]
    pub fn with_hiding_spots(mut self, spots: Vec<HidingSpot>) -> Self {
        self.hiding_spots = spots;
        self
    }

    /// Replaces the creaking-zone catalog.
    #[must_use]
    pub fn with_creaking_zones(mut self, zones: Vec<CreakingZone>) -> Self {
        self.creaking_zones = zones;
        self
    }

    /// Replaces the item-slot catalog.
    #[must_use]
    pub fn with_item_slots(mut self, slots: Vec<ItemSlot>) -> Self {
        self.item_slots = slots;
        self
    }

    /// Moves the player spawn.
    #[must_use]
    pub fn with_player_start(mut self, start: Vec3) -> Self {
        self.player_start = start;
        self
    }

    /// Moves the antagonist spawn.
    #[must_use]
    pub fn with_antagonist_start(mut self, start: Vec3) -> Self {
        self.antagonist_start = start;
        self
    }

    /// Checks the catalogs for inconsistencies.
    pub fn validate(&self) -> LayoutResult<()> {
        for room in RoomType::ALL {
            if !room.bounds().aabb().is_valid() {
                return Err(LayoutError::DegenerateRoom(room.display_name().to_string()));
            }
        }

        let mut seen = HashSet::new();
        for spot in &self.hiding_spots {
            if !seen.insert(spot.id) {
                return Err(LayoutError::DuplicateHidingSpot(spot.id.to_string()));
            }
        }

        for slot in &self.item_slots {
            if self.room_at(slot.position()).is_none() {
                return Err(LayoutError::OutsideHouse(format!(
                    "item slot in {}",
                    slot.room
                )));
            }
        }

        Ok(())
    }

    /// Returns the room containing `point`; the last catalog match wins.
    #[must_use]
    pub fn room_at(&self, point: Vec3) -> Option<RoomType> {
        RoomType::ALL
            .iter()
            .rev()
            .copied()
            .find(|room| room.bounds().contains(point))
    }

    /// Returns the room containing `point`, or [`RoomType::FALLBACK`].
    #[must_use]
    pub fn room_or_fallback(&self, point: Vec3) -> RoomType {
        self.room_at(point).unwrap_or(RoomType::FALLBACK)
    }

    /// Checks whether `point` is inside any room.
    #[must_use]
    pub fn is_inside(&self, point: Vec3) -> bool {
        self.room_at(point).is_some()
    }

    /// Returns the room whose footprint centre is horizontally nearest to
    /// `point`, among rooms spanning its height.
    ///
    /// Falls back to [`RoomType::FALLBACK`] when no room spans that height.
    #[must_use]
    pub fn nearest_room(&self, point: Vec3) -> RoomType {
        let distance = |room: &RoomType| horizontal_distance(point, room.bounds().origin());
        RoomType::ALL
            .iter()
            .copied()
            .filter(|room| room.bounds().spans_height(point.y))
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .unwrap_or(RoomType::FALLBACK)
    }

    /// Floor the player stands on, given their eye position and stance height.
    ///
    /// Above the attic vent drop the floor is always the upper level so the
    /// player falls through the hole.
    #[must_use]
    pub fn player_floor(&self, eye: Vec3, stand_height: f32) -> FloorLevel {
        if eye.y > VENT_DROP_MIN.y
            && eye.x > VENT_DROP_MIN.x
            && eye.x < VENT_DROP_MAX.x
            && eye.z > VENT_DROP_MIN.z
            && eye.z < VENT_DROP_MAX.z
        {
            return FloorLevel::Upper;
        }
        FloorLevel::band_for(eye.y - stand_height)
    }

    /// Hiding-spot catalog.
    #[must_use]
    pub fn hiding_spots(&self) -> &[HidingSpot] {
        &self.hiding_spots
    }

    /// Looks up a hiding spot by id.
    #[must_use]
    pub fn hiding_spot(&self, id: &str) -> Option<&HidingSpot> {
        self.hiding_spots.iter().find(|spot| spot.id == id)
    }

    /// Creaking-zone catalog.
    #[must_use]
    pub fn creaking_zones(&self) -> &[CreakingZone] {
        &self.creaking_zones
    }

    /// Item-slot catalog.
    #[must_use]
    pub fn item_slots(&self) -> &[ItemSlot] {
        &self.item_slots
    }

    /// Exit door volume.
    #[must_use]
    pub const fn exit_door(&self) -> Aabb {
        self.exit_door
    }

    /// Player eye position at the start of every day.
    #[must_use]
    pub const fn player_start(&self) -> Vec3 {
        self.player_start
    }

    /// Antagonist floor position at the start of every day.
    #[must_use]
    pub const fn antagonist_start(&self) -> Vec3 {
        self.antagonist_start
    }
}
