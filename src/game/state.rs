//! # Game State Module
//!
//! The central controller: it owns the manor grid, the player, the deck,
//! and the random source, and exposes the full turn-based API consumed by a
//! presentation layer.
//!
//! Every operation is validate-then-commit: all preconditions are checked
//! before any counter is decremented or any cell is mutated, so a failed
//! call never leaves partial state behind. Expected game failures return
//! `false`/`None`; contract violations (selecting outside the drawing
//! phase, a bad choice index) also return `false` but log a warning.

use crate::catalog::{Room, RoomDeck, RoomKind};
use crate::game::inventory::Resource;
use crate::game::{
    ConsumableKind, Coord, Direction, Door, GameObject, InteractOutcome, Inventory, LockLevel,
    Manor, Tool, VendorGood, VendorOffer, VENDOR_CATALOG,
};
use crate::generation::{draw_room_choices, LockTable, LootModifiers, LootTables};
use crate::manor_config::GameConfig;
use crate::ManorResult;
use log::{debug, info, warn};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Top-level phase of the controller's state machine.
///
/// Winning is implicit: the game is won when [`GameState::reached_exit`]
/// reports true, whatever the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Normal play; movement and exploration are available.
    Playing,
    /// Draw choices are on the table, awaiting selection or reroll.
    DrawingRoom,
    /// Terminal: no legal room could be drawn for the last explored cell.
    LostBlocked,
}

/// A draw awaiting the player's selection.
#[derive(Debug, Clone)]
pub struct PendingDraw {
    /// Cell the player stood in when opening.
    pub origin: Coord,
    /// Direction from origin toward the target.
    pub direction: Direction,
    /// The empty cell being explored.
    pub target: Coord,
    /// Up to three candidate kinds, in draw order.
    pub choices: Vec<RoomKind>,
}

/// The player: a position and an inventory, created once at game start.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Coord,
    pub inventory: Inventory,
}

/// Central game state and controller.
#[derive(Debug)]
pub struct GameState {
    manor: Manor,
    player: Player,
    deck: RoomDeck,
    lock_table: LockTable,
    loot_tables: LootTables,
    phase: GamePhase,
    pending: Option<PendingDraw>,
    loot_modifiers: LootModifiers,
    rng: StdRng,
}

impl GameState {
    /// Creates a game from a configuration and a seed.
    ///
    /// The entrance hall and the antechamber are placed immediately; all
    /// other cells start empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use manorfall::{GameConfig, GamePhase, GameState};
    ///
    /// let game = GameState::new(&GameConfig::default(), 12345).unwrap();
    /// assert_eq!(game.phase(), GamePhase::Playing);
    /// assert!(!game.reached_exit());
    /// ```
    pub fn new(config: &GameConfig, seed: u64) -> ManorResult<Self> {
        config.validate()?;

        let mut manor = Manor::new(config.rows, config.cols, config.start, config.goal);
        let _ = manor
            .cell_mut(config.start)
            .place_room(Room::new(RoomKind::EntranceHall));
        let _ = manor
            .cell_mut(config.goal)
            .place_room(Room::new(RoomKind::Antechamber));

        let inv = config.starting_inventory;
        info!(
            "new game: {}x{} manor, start {}, goal {}, seed {seed}",
            config.rows, config.cols, config.start, config.goal
        );

        Ok(Self {
            manor,
            player: Player {
                pos: config.start,
                inventory: Inventory::new(inv.steps, inv.gold, inv.gems, inv.keys, inv.dice),
            },
            deck: RoomDeck::from_counts(&config.deck),
            lock_table: config.effective_lock_table(),
            loot_tables: config.loot_tables.clone(),
            phase: GamePhase::Playing,
            pending: None,
            loot_modifiers: LootModifiers::default(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Creates a game with the default 9x5 configuration.
    pub fn with_default_config(seed: u64) -> ManorResult<Self> {
        Self::new(&GameConfig::default(), seed)
    }

    // --- read-only state queries ---

    /// Current controller phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The manor grid.
    pub fn manor(&self) -> &Manor {
        &self.manor
    }

    /// The player's current position.
    pub fn player_position(&self) -> Coord {
        self.player.pos
    }

    /// The player's inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.player.inventory
    }

    /// The room deck.
    pub fn deck(&self) -> &RoomDeck {
        &self.deck
    }

    /// The draw awaiting selection, if any.
    pub fn pending_draw(&self) -> Option<&PendingDraw> {
        self.pending.as_ref()
    }

    /// The room the player stands in.
    pub fn current_room(&self) -> Option<&Room> {
        self.manor.cell(self.player.pos).room()
    }

    /// True once the player stands on the goal cell.
    pub fn reached_exit(&self) -> bool {
        self.player.pos == self.manor.goal()
    }

    // --- exploration ---

    /// Opens toward the neighbor cell in `direction`.
    ///
    /// Against an occupied neighbor this connects the two rooms with a pair
    /// of doors (the outbound one gets a generated lock, mirrored on the
    /// twin) and stays in [`GamePhase::Playing`]. Against an empty neighbor
    /// it creates the outbound door, requires that the door could be opened
    /// with the current inventory (nothing is consumed yet), and runs the
    /// draw engine: a non-empty draw enters [`GamePhase::DrawingRoom`], an
    /// empty draw is the terminal blocked condition.
    ///
    /// Returns `false` without mutation when the direction leaves the
    /// manor, the current room has no door slot on that side, or the door
    /// cannot be opened.
    pub fn open_or_place(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let origin = self.player.pos;
        let Some(target) = self.manor.neighbor(origin, direction) else {
            return false;
        };
        let Some(current) = self.manor.cell(origin).room() else {
            return false;
        };
        if !current.kind.possible_doors().contains(&direction) {
            return false;
        }
        let occupied_kind = current.kind;

        if self.manor.cell(target).room().is_some() {
            return self.connect_to_existing(origin, direction, target);
        }

        self.ensure_outbound_door(origin, direction, target);
        let openable = self
            .manor
            .cell(origin)
            .door(direction)
            .map(|door| door.can_open(&self.player.inventory))
            .unwrap_or(false);
        if !openable {
            return false;
        }

        let choices = draw_room_choices(
            &self.deck,
            &self.manor,
            target,
            direction,
            Some(occupied_kind),
            &self.player.inventory,
            &mut self.rng,
        );
        if choices.is_empty() {
            info!("no legal room can be drawn for {target}; run is blocked");
            self.phase = GamePhase::LostBlocked;
            return true;
        }
        debug!("drawing phase at {target}: {choices:?}");
        self.pending = Some(PendingDraw {
            origin,
            direction,
            target,
            choices,
        });
        self.phase = GamePhase::DrawingRoom;
        true
    }

    /// Places the pending choice at `index` and walks into it.
    ///
    /// Validates the index, the gem cost, the step budget, and the deck
    /// copy, then commits everything at once: gems and one step are
    /// deducted, the deck copy is consumed, the room is placed, the back
    /// door is created unlocked, the player moves, and the entry effect and
    /// content spawn run in that order.
    pub fn select_and_place_room(&mut self, index: usize) -> bool {
        if self.phase != GamePhase::DrawingRoom {
            warn!("select_and_place_room called outside the drawing phase");
            return false;
        }
        let Some(pending) = &self.pending else {
            return false;
        };
        let Some(&kind) = pending.choices.get(index) else {
            warn!(
                "choice index {index} out of range ({} choices)",
                pending.choices.len()
            );
            return false;
        };
        let (origin, direction, target) = (pending.origin, pending.direction, pending.target);

        let cost = kind.gem_cost();
        if self.player.inventory.gems < cost {
            debug!("cannot afford {} ({cost} gems)", kind.name());
            return false;
        }
        if self.player.inventory.steps == 0 {
            return false;
        }
        if self.deck.remaining_of(kind) == 0 || self.manor.cell(target).room().is_some() {
            warn!("pending draw is stale for {}", kind.name());
            return false;
        }

        // All preconditions hold; commit.
        self.player.inventory.spend(Resource::Gems, cost);
        self.player.inventory.spend(Resource::Steps, 1);
        self.deck.consume(kind);
        let _ = self.manor.cell_mut(target).place_room(Room::new(kind));
        self.manor.cell_mut(target).add_door(
            direction.opposite(),
            Door::new(LockLevel::Unlocked, origin),
        );
        self.player.pos = target;
        self.pending = None;
        self.phase = GamePhase::Playing;
        info!("placed {} at {target}", kind.name());

        self.apply_entry_effect(target);
        self.spawn_contents(target);
        true
    }

    /// Replaces the pending choices with a fresh draw, for one die.
    ///
    /// The pending target is unchanged; the deck pool is unchanged too,
    /// since draws only consume copies at placement.
    pub fn reroll_draw_choices(&mut self) -> bool {
        if self.phase != GamePhase::DrawingRoom {
            return false;
        }
        let Some(pending) = &self.pending else {
            return false;
        };
        if self.player.inventory.dice == 0 {
            return false;
        }
        let (origin, direction, target) = (pending.origin, pending.direction, pending.target);
        let occupied = self.manor.cell(origin).room().map(|room| room.kind);

        let choices = draw_room_choices(
            &self.deck,
            &self.manor,
            target,
            direction,
            occupied,
            &self.player.inventory,
            &mut self.rng,
        );
        if choices.is_empty() {
            return false;
        }
        self.player.inventory.spend(Resource::Dice, 1);
        debug!("rerolled draw at {target}: {choices:?}");
        if let Some(pending) = &mut self.pending {
            pending.choices = choices;
        }
        true
    }

    /// Traverses an existing door, spending one step.
    ///
    /// A locked door is opened as part of the traversal: a lockpick kit
    /// opens simple locks for free, otherwise one key is consumed. Once
    /// traversed, the door and its twin are both left unlocked.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let origin = self.player.pos;
        let (dest, key_cost) = match self.manor.cell(origin).door(direction) {
            Some(door) => match door.key_cost(&self.player.inventory) {
                Some(cost) => (door.leads_to, cost),
                None => return false,
            },
            None => return false,
        };
        if self.manor.cell(dest).room().is_none() {
            // A door into a cell whose draw was abandoned as blocked.
            return false;
        }
        if self.player.inventory.steps == 0 {
            return false;
        }

        self.player.inventory.spend(Resource::Keys, key_cost);
        self.player.inventory.spend(Resource::Steps, 1);
        self.unlock_both_sides(origin, direction);
        self.player.pos = dest;
        debug!("moved to {dest}");
        self.apply_entry_effect(dest);
        true
    }

    // --- objects ---

    /// Interacts with the first object in the current room.
    ///
    /// Returns `None` when the room is empty; otherwise a message describing
    /// the outcome. Objects marked consumed by the interaction are removed
    /// from the room.
    pub fn pick_up_here(&mut self) -> Option<String> {
        let pos = self.player.pos;
        let object = *self.manor.cell(pos).room()?.contents.first()?;
        let mut spawned = Vec::new();
        let outcome = self.interact_object(object, &mut spawned);

        let room = self.manor.cell_mut(pos).room_mut()?;
        if outcome.consumed {
            room.contents.remove(0);
        }
        room.contents.extend(spawned);
        Some(outcome.message)
    }

    /// Alias of [`GameState::pick_up_here`], matching the controller API
    /// presentation layers expect.
    pub fn interact_with_current_object(&mut self) -> Option<String> {
        self.pick_up_here()
    }

    /// The vendor's catalog, if a vendor stands in the current room.
    pub fn vendor_offers(&self) -> Option<&'static [VendorOffer]> {
        let room = self.current_room()?;
        room.contents
            .contains(&GameObject::Vendor)
            .then_some(&VENDOR_CATALOG[..])
    }

    /// Buys the catalog entry at `index` from the vendor in the current
    /// room. Fails without deduction when there is no vendor, the index is
    /// out of range, or gold is short.
    pub fn buy_from_vendor(&mut self, index: usize) -> bool {
        if self.vendor_offers().is_none() {
            return false;
        }
        let Some(offer) = VENDOR_CATALOG.get(index) else {
            warn!("vendor offer index {index} out of range");
            return false;
        };
        if !self.player.inventory.spend(Resource::Gold, offer.price) {
            return false;
        }
        match offer.good {
            VendorGood::Consumable(kind) => self.player.inventory.steps += kind.steps_gain(),
            VendorGood::Key => self.player.inventory.keys += 1,
            VendorGood::Die => self.player.inventory.dice += 1,
        }
        debug!("bought {} for {} gold", offer.name(), offer.price);
        true
    }

    // --- internals ---

    fn ensure_outbound_door(&mut self, origin: Coord, direction: Direction, target: Coord) {
        if self.manor.cell(origin).door(direction).is_some() {
            return;
        }
        let lock = self.lock_table.random_lock_for_row(target.row, &mut self.rng);
        debug!("new door {origin} -> {target}: {lock:?}");
        self.manor
            .cell_mut(origin)
            .add_door(direction, Door::new(lock, target));
    }

    /// Connects to an already-placed neighbor (the pre-placed antechamber,
    /// or a previously explored room approached from a new side).
    fn connect_to_existing(&mut self, origin: Coord, direction: Direction, target: Coord) -> bool {
        let back = direction.opposite();
        let allows_back = self
            .manor
            .cell(target)
            .room()
            .map(|room| room.kind.possible_doors().contains(&back))
            .unwrap_or(false);
        if !allows_back {
            return false;
        }
        self.ensure_outbound_door(origin, direction, target);
        let Some(lock) = self.manor.cell(origin).door(direction).map(|d| d.lock) else {
            return false;
        };
        self.manor
            .cell_mut(target)
            .add_door(back, Door::new(lock, origin));
        true
    }

    fn unlock_both_sides(&mut self, origin: Coord, direction: Direction) {
        let dest = match self.manor.cell_mut(origin).door_mut(direction) {
            Some(door) => {
                door.lock = LockLevel::Unlocked;
                door.leads_to
            }
            None => return,
        };
        if let Some(twin) = self.manor.cell_mut(dest).door_mut(direction.opposite()) {
            if twin.leads_to == origin {
                twin.lock = LockLevel::Unlocked;
            }
        }
    }

    /// Applies the entry effect of the room at `coord`.
    ///
    /// One-shot effects are guarded by the room's `effect_applied` flag;
    /// the kinds listed in [`RoomKind::effect_fires_every_entry`] run every
    /// time. Effects only touch the inventory, the room's own contents, the
    /// deck, and the scoped loot modifiers.
    fn apply_entry_effect(&mut self, coord: Coord) {
        let (kind, first) = {
            let Some(room) = self.manor.cell_mut(coord).room_mut() else {
                return;
            };
            let first = !room.effect_applied;
            room.effect_applied = true;
            (room.kind, first)
        };
        if !first && !kind.effect_fires_every_entry() {
            return;
        }

        let inv = &mut self.player.inventory;
        match kind {
            RoomKind::EntranceHall | RoomKind::Antechamber => {}
            RoomKind::PlainRoom => {
                if first {
                    inv.add_fragment();
                    inv.add_fragment();
                }
            }
            RoomKind::Kitchen => {
                if first && self.rng.gen_bool(0.30) {
                    inv.steps += 2;
                }
                if let Some(room) = self.manor.cell_mut(coord).room_mut() {
                    if !room.contents.contains(&GameObject::Vendor) {
                        room.contents.push(GameObject::Vendor);
                    }
                }
            }
            RoomKind::Pantry => {
                if first {
                    inv.steps += 3;
                    inv.keys += 1;
                }
            }
            RoomKind::Garden => {
                if first {
                    inv.gems += 1;
                    if self.rng.gen_bool(0.30) {
                        inv.gems += 1;
                    }
                }
            }
            RoomKind::LockerRoom => {
                // Refunds the step the traversal just cost.
                inv.steps += 1;
            }
            RoomKind::UtilityRoom => {
                if first {
                    inv.gold += 8;
                    inv.keys += 1;
                }
            }
            RoomKind::Armory => {
                if first {
                    inv.keys += 1;
                    if self.rng.gen_bool(0.5) {
                        let tool = *[
                            Tool::Shovel,
                            Tool::Hammer,
                            Tool::LockpickKit,
                            Tool::MetalDetector,
                        ]
                        .choose(&mut self.rng)
                        .unwrap_or(&Tool::Shovel);
                        if let Some(room) = self.manor.cell_mut(coord).room_mut() {
                            room.contents.push(GameObject::ToolPickup(tool));
                        }
                    }
                }
            }
            RoomKind::Library => {
                if first {
                    inv.dice += 3;
                }
            }
            RoomKind::Furnace => {
                inv.steps = inv.steps.saturating_sub(2);
                if first {
                    inv.gold += 10;
                    inv.keys += 5;
                    inv.gems += 7;
                }
            }
            RoomKind::Greenhouse => {
                if first {
                    inv.add_fragment();
                    inv.add_fragment();
                }
            }
            RoomKind::Solarium => {
                if first {
                    inv.keys += 1;
                }
            }
            RoomKind::Veranda => {
                if self.rng.gen_bool(0.30) {
                    inv.gems += 1;
                }
                // Armed for the next single content-spawn resolution.
                self.loot_modifiers = LootModifiers {
                    food: 1.5,
                    chest: 1.5,
                };
            }
            RoomKind::MaidsChamber => {
                if first && self.rng.gen_bool(0.20) {
                    inv.dice += 1;
                }
            }
            RoomKind::MasterBedroom => {
                if first {
                    inv.keys += 1;
                }
            }
            RoomKind::WeightRoom => {
                if first {
                    inv.steps -= inv.steps / 2;
                }
            }
            RoomKind::ChamberOfMirrors => {
                if first {
                    info!("the rumpus room joins the deck");
                    self.deck.add_copies(RoomKind::RumpusRoom, 2);
                }
            }
            RoomKind::RumpusRoom => {
                if first {
                    inv.gold += 8;
                }
            }
        }
    }

    /// Populates a freshly placed room with objects.
    ///
    /// Runs once, right after placement. Consumes the scoped loot modifiers
    /// whatever the room spawned, so a veranda boost never carries past one
    /// resolution.
    fn spawn_contents(&mut self, coord: Coord) {
        let Some(kind) = self.manor.cell(coord).room().map(|room| room.kind) else {
            return;
        };
        // The veranda arms the modifiers in its own entry effect; its spawn
        // pass must not consume them, the boost is for the next placement.
        let modifiers = if kind == RoomKind::Veranda {
            self.loot_modifiers
        } else {
            std::mem::take(&mut self.loot_modifiers)
        };
        if kind == RoomKind::EntranceHall || kind == RoomKind::Antechamber {
            return;
        }

        let mut additions: Vec<GameObject> = Vec::new();
        match kind {
            RoomKind::Kitchen => {
                let options: Vec<(Option<GameObject>, f64)> = ConsumableKind::all()
                    .into_iter()
                    .map(|food| (Some(GameObject::Consumable(food)), 1.0))
                    .collect();
                additions.extend(weighted_object_pick(&options, &modifiers, &mut self.rng));
            }
            RoomKind::Pantry => {
                let options = [
                    (
                        Some(GameObject::Consumable(ConsumableKind::Sandwich)),
                        1.0,
                    ),
                    (Some(GameObject::Consumable(ConsumableKind::Meal)), 1.0),
                ];
                additions.extend(weighted_object_pick(&options, &modifiers, &mut self.rng));
            }
            RoomKind::Garden => additions.push(GameObject::DigSpot),
            RoomKind::LockerRoom => additions.push(GameObject::Locker),
            RoomKind::UtilityRoom => {
                additions.push(GameObject::Chest);
                if self.rng.gen_bool(0.5) {
                    let tool = *[
                        Tool::Shovel,
                        Tool::Hammer,
                        Tool::LockpickKit,
                        Tool::MetalDetector,
                    ]
                    .choose(&mut self.rng)
                    .unwrap_or(&Tool::Shovel);
                    additions.push(GameObject::ToolPickup(tool));
                }
            }
            // The armory's tool roll happens in its entry effect.
            RoomKind::Library => {
                let options = [
                    (Some(GameObject::ToolPickup(Tool::RabbitFoot)), 1.0),
                    (Some(GameObject::ToolPickup(Tool::Shovel)), 1.0),
                    (Some(GameObject::ToolPickup(Tool::MetalDetector)), 1.0),
                    (Some(GameObject::Consumable(ConsumableKind::Apple)), 1.0),
                ];
                additions.extend(weighted_object_pick(&options, &modifiers, &mut self.rng));
            }
            RoomKind::PlainRoom => {
                let options = [
                    (None, 4.0),
                    (Some(GameObject::Consumable(ConsumableKind::Apple)), 1.0),
                    (Some(GameObject::Consumable(ConsumableKind::Banana)), 1.0),
                    (Some(GameObject::ToolPickup(Tool::Shovel)), 1.0),
                    (Some(GameObject::Chest), 0.25),
                ];
                additions.extend(weighted_object_pick(&options, &modifiers, &mut self.rng));
            }
            // Modifier rooms and the rumpus room carry no furniture.
            _ => {}
        }

        if !additions.is_empty() {
            debug!("spawned {:?} in {}", additions, kind.name());
            if let Some(room) = self.manor.cell_mut(coord).room_mut() {
                room.contents.extend(additions);
            }
        }
    }

    fn interact_object(
        &mut self,
        object: GameObject,
        spawned: &mut Vec<GameObject>,
    ) -> InteractOutcome {
        match object {
            GameObject::Consumable(kind) => {
                let gain = kind.steps_gain();
                self.player.inventory.steps += gain;
                InteractOutcome::consumed(format!("Ate the {} (+{gain} steps).", kind.name()))
            }
            GameObject::ToolPickup(tool) => {
                if self.player.inventory.has_tool(tool) {
                    InteractOutcome::consumed(format!("{} (already owned).", tool.name()))
                } else {
                    self.player.inventory.add_tool(tool);
                    InteractOutcome::consumed(format!("Picked up the {}.", tool.name()))
                }
            }
            GameObject::Chest => {
                let has_hammer = self.player.inventory.has_tool(Tool::Hammer);
                if !has_hammer && self.player.inventory.keys == 0 {
                    return InteractOutcome::kept(
                        "You need a hammer or a key to open the chest.",
                    );
                }
                if !has_hammer {
                    self.player.inventory.spend(Resource::Keys, 1);
                }
                let message =
                    self.loot_tables
                        .chest
                        .resolve(&mut self.player.inventory, spawned, &mut self.rng);
                InteractOutcome::consumed(message)
            }
            GameObject::DigSpot => {
                if !self.player.inventory.has_tool(Tool::Shovel) {
                    return InteractOutcome::kept("You need a shovel to dig here.");
                }
                let message =
                    self.loot_tables
                        .dig
                        .resolve(&mut self.player.inventory, spawned, &mut self.rng);
                InteractOutcome::consumed(message)
            }
            GameObject::Locker => {
                if self.player.inventory.keys == 0 {
                    return InteractOutcome::kept("The locker is locked tight; it takes a key.");
                }
                self.player.inventory.spend(Resource::Keys, 1);
                let message =
                    self.loot_tables
                        .locker
                        .resolve(&mut self.player.inventory, spawned, &mut self.rng);
                InteractOutcome::consumed(message)
            }
            GameObject::Vendor => {
                let listing = VENDOR_CATALOG
                    .iter()
                    .map(|offer| format!("{} ({} gold)", offer.name(), offer.price))
                    .collect::<Vec<_>>()
                    .join(", ");
                InteractOutcome::kept(format!("The vendor offers: {listing}."))
            }
        }
    }
}

/// Weighted pick among spawn candidates; `None` entries mean "spawn
/// nothing". The scoped loot modifiers scale matching candidates.
fn weighted_object_pick(
    options: &[(Option<GameObject>, f64)],
    modifiers: &LootModifiers,
    rng: &mut StdRng,
) -> Option<GameObject> {
    let weights: Vec<f64> = options
        .iter()
        .map(|&(object, weight)| {
            let factor = object.map(|o| modifiers.factor_for(o)).unwrap_or(1.0);
            weight * factor
        })
        .collect();
    let dist = WeightedIndex::new(&weights).ok()?;
    options[dist.sample(rng)].0
}
