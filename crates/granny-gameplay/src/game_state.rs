//! Central simulation state and the per-tick update.
//!
//! `GameState` owns everything a run mutates: the player, Granny, the items,
//! the noise cooldown, the cosmetic timers and the run's random source. One
//! call to [`GameState::tick`] advances all of it in a fixed order and
//! returns the events raised along the way.

use granny_common::LayoutResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::antagonist::Granny;
use crate::difficulty::Difficulty;
use crate::events::{SimEvent, SoundCue};
use crate::input::FrameInput;
use crate::interaction::{interact, InteractableIndex, InteractionContext, InteractionOutcome};
use crate::items::{randomize_items, Inventory, ItemSpawn};
use crate::noise::NoiseSubsystem;
use crate::player::PlayerKinematics;
use crate::render::{FrameSnapshot, GrannyView, RenderHints};
use crate::settings::RunSettings;
use crate::spatial::HouseLayout;

/// Chance that an expired paranoid timer plays a phantom footstep.
pub const DECOY_CHANCE: f32 = 0.1;

/// Shortest paranoid timer re-arm, in seconds.
pub const PARANOID_MIN_DELAY: f32 = 5.0;

/// Spread added to the paranoid re-arm, in seconds.
pub const PARANOID_DELAY_SPREAD: f32 = 10.0;

/// Per-tick chance of a paradox background flash.
pub const FLASH_CHANCE: f32 = 0.01;

/// How long a background flash lasts, in seconds.
pub const FLASH_DURATION: f32 = 0.1;

/// Everything fixed at run start.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Gameplay settings
    pub settings: RunSettings,
    /// House catalogs
    pub layout: HouseLayout,
}

impl RunConfig {
    /// Creates a config for the stock house.
    #[must_use]
    pub fn new(difficulty: Difficulty, settings: RunSettings) -> Self {
        Self {
            difficulty,
            settings,
            layout: HouseLayout::standard(),
        }
    }

    /// Replaces the house catalogs.
    #[must_use]
    pub fn with_layout(mut self, layout: HouseLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// A background flash in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFlash {
    /// Colour as 0xRRGGBB
    pub color: u32,
    /// Seconds left
    pub remaining: f32,
}

/// Central game state for one run.
#[derive(Debug)]
pub struct GameState {
    layout: HouseLayout,
    settings: RunSettings,
    difficulty: Difficulty,
    hints: RenderHints,
    /// The player
    pub player: PlayerKinematics,
    /// Granny, absent under Practice
    pub granny: Option<Granny>,
    items: Vec<ItemSpawn>,
    inventory: Inventory,
    index: InteractableIndex,
    noise: NoiseSubsystem,
    rng: fastrand::Rng,
    paranoid_timer: f32,
    flash: Option<BackgroundFlash>,
    ticks: u64,
    elapsed: f64,
}

impl GameState {
    /// Starts a run, placing items with the injected random source.
    pub fn new(config: RunConfig, mut rng: fastrand::Rng) -> LayoutResult<Self> {
        let RunConfig {
            difficulty,
            settings,
            layout,
        } = config;
        layout.validate()?;
        let settings = settings.validated();

        let items = randomize_items(&layout, &mut rng)?;
        let index = InteractableIndex::build(&layout, &items);
        let player = PlayerKinematics::new(layout.player_start(), &layout);
        let granny = difficulty
            .profile()
            .map(|profile| Granny::new(layout.antagonist_start(), profile));

        info!(
            "New run: {} difficulty, {} items, antagonist {}",
            difficulty,
            items.len(),
            if granny.is_some() { "present" } else { "absent" }
        );

        Ok(Self {
            hints: RenderHints::for_run(difficulty, &settings),
            layout,
            settings,
            difficulty,
            player,
            granny,
            items,
            inventory: Inventory::new(),
            index,
            noise: NoiseSubsystem::new(),
            rng,
            paranoid_timer: 0.0,
            flash: None,
            ticks: 0,
            elapsed: 0.0,
        })
    }

    fn paranoid_delay(rng: &mut fastrand::Rng) -> f32 {
        PARANOID_MIN_DELAY + rng.f32() * PARANOID_DELAY_SPREAD
    }

    /// Puts the player and Granny back at their spawns for a new day.
    ///
    /// Items and the inventory carry over.
    pub fn start_day(&mut self) {
        self.player.respawn(self.layout.player_start(), &self.layout);
        if let Some(granny) = self.granny.as_mut() {
            granny.respawn(self.layout.antagonist_start());
        }
        self.noise = NoiseSubsystem::new();
        self.flash = None;
        debug!("Day reset: player and antagonist respawned");
    }

    /// Starts over: fresh item placement, empty inventory, new day.
    pub fn restart(&mut self) -> LayoutResult<()> {
        self.items = randomize_items(&self.layout, &mut self.rng)?;
        self.index = InteractableIndex::build(&self.layout, &self.items);
        self.inventory.clear();
        self.paranoid_timer = 0.0;
        self.start_day();
        info!("Run restarted with fresh item placement");
        Ok(())
    }

    /// Advances the run by `dt` seconds.
    ///
    /// Order: timers, paranoid decoy, paradox flash, player input and
    /// movement (with noise), then Granny.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();

        self.advance_timers(dt);
        self.roll_decoy(&mut events);
        self.roll_flash(&mut events);

        self.apply_input(input, &mut events);

        self.player.update(input, dt, &self.layout, &mut events);
        if let Some(location) = self.noise.listen(
            &self.player,
            &self.layout,
            &self.settings,
            &mut self.rng,
            &mut events,
        ) {
            if let Some(granny) = self.granny.as_mut() {
                granny.hear_noise(location, &mut events);
            }
        }

        if let Some(granny) = self.granny.as_mut() {
            granny.update(&self.player, dt, &self.layout, &mut self.rng, &mut events);
        }

        self.ticks += 1;
        self.elapsed += f64::from(dt);
        trace!("tick {} produced {} events", self.ticks, events.len());
        events
    }

    fn advance_timers(&mut self, dt: f32) {
        self.noise.advance(dt);
        if self.settings.paranoid_mode {
            self.paranoid_timer -= dt;
        }
        if let Some(flash) = self.flash.as_mut() {
            flash.remaining -= dt;
            if flash.remaining <= 0.0 {
                self.flash = None;
            }
        }
    }

    fn roll_decoy(&mut self, events: &mut Vec<SimEvent>) {
        if !self.settings.paranoid_mode || self.paranoid_timer > 0.0 {
            return;
        }
        if self.rng.f32() < DECOY_CHANCE {
            debug!("Paranoid decoy footstep");
            events.push(SimEvent::Sound(SoundCue::DecoyFootstep));
        }
        self.paranoid_timer = Self::paranoid_delay(&mut self.rng);
    }

    fn roll_flash(&mut self, events: &mut Vec<SimEvent>) {
        if !self.settings.flashes_allowed() {
            return;
        }
        if self.rng.f32() < FLASH_CHANCE {
            let color = self.rng.u32(..0x0100_0000);
            self.flash = Some(BackgroundFlash {
                color,
                remaining: FLASH_DURATION,
            });
            events.push(SimEvent::BackgroundFlash { color });
        }
    }

    fn apply_input(&mut self, input: &FrameInput, events: &mut Vec<SimEvent>) {
        if input.look_captured {
            self.player.look(input.yaw, input.pitch);
        }
        if let Some(item) = input.select_item {
            if self.inventory.select(item) {
                debug!("Selected {item}");
            }
        }
        if input.crouch_toggle {
            self.player.toggle_crouch(events);
        }
        self.player.set_running(input.run_held, events);
        if input.interact {
            self.interact(events);
        }
    }

    /// Resolves an interact press.
    pub fn interact(&mut self, events: &mut Vec<SimEvent>) -> InteractionOutcome {
        let mut ctx = InteractionContext {
            player: &mut self.player,
            items: &mut self.items,
            inventory: &mut self.inventory,
            layout: &self.layout,
            index: &self.index,
        };
        interact(&mut ctx, events)
    }

    /// Builds the renderer's view of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            tick: self.ticks,
            elapsed: self.elapsed,
            camera: self.player.position,
            yaw: self.player.yaw,
            pitch: self.player.pitch,
            room: self.player.room(),
            crouching: self.player.is_crouching(),
            hidden: self.player.is_hidden(),
            granny: self.granny.as_ref().map(|granny| GrannyView {
                position: granny.position(),
                facing: granny.facing(),
                mode: granny.mode(),
            }),
            background: self
                .flash
                .map_or(self.hints.background, |flash| flash.color),
            hints: self.hints,
            items_remaining: self.items.iter().filter(|item| !item.is_collected()).count(),
        }
    }

    /// House catalogs.
    #[must_use]
    pub const fn layout(&self) -> &HouseLayout {
        &self.layout
    }

    /// Run settings (validated).
    #[must_use]
    pub const fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Difficulty tier.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// This run's items.
    #[must_use]
    pub fn items(&self) -> &[ItemSpawn] {
        &self.items
    }

    /// The player's inventory.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable access to the inventory.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// The noise subsystem.
    #[must_use]
    pub const fn noise(&self) -> &NoiseSubsystem {
        &self.noise
    }

    /// The background flash in progress, if any.
    #[must_use]
    pub const fn flash(&self) -> Option<BackgroundFlash> {
        self.flash
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds simulated so far.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
