//! Match orchestration.
//!
//! A [`Fight`] owns both combatants, their frame tables and the camera, and
//! runs one fixed-order tick per call:
//! input → frame advance → hits and push → physics → status → facing → camera.
//! Rendering is a separate read-only pass.

use brawl_common::{BrawlResult, CombatantId, Direction, FighterId, FighterState, Vec2};
use brawl_kernel::{
    debug_boxes, sprite_draw, Camera, FrameGeometryTable, ImageHandle, SpriteSurface, StageBounds,
    Viewport, DEFAULT_SHAKE_DURATION, DEFAULT_SHAKE_INTENSITY, DEFAULT_SHAKE_SEED,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collision::{CollisionResolver, CombatTuning, HitEvent};
use crate::combatant::Combatant;
use crate::physics::{self, PhysicsTuning};
use crate::roster;
use crate::state_machine::{FrameAdvance, StateMachine, AIRBORNE_STATES};

/// Time record handed to every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickTime {
    /// Timestamp of the previous tick in seconds
    pub previous: f64,
    /// Seconds elapsed since the previous tick
    pub seconds_passed: f32,
}

impl TickTime {
    /// Creates a time record.
    #[must_use]
    pub const fn new(previous: f64, seconds_passed: f32) -> Self {
        Self {
            previous,
            seconds_passed,
        }
    }

    /// Record for the tick after this one.
    #[must_use]
    pub fn next(self, seconds_passed: f32) -> Self {
        Self {
            previous: self.previous + f64::from(self.seconds_passed),
            seconds_passed,
        }
    }
}

/// Camera shake played when a hit lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeSettings {
    /// Peak offset in pixels
    pub intensity: f32,
    /// Duration in seconds
    pub duration: f32,
    /// Seed of the jitter generator
    pub seed: u64,
}

impl Default for ShakeSettings {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_SHAKE_INTENSITY,
            duration: DEFAULT_SHAKE_DURATION,
            seed: DEFAULT_SHAKE_SEED,
        }
    }
}

/// Everything tunable about a fight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FightSettings {
    /// Stage bounds
    pub stage: StageBounds,
    /// Movement tuning
    pub physics: PhysicsTuning,
    /// Combat rules
    pub combat: CombatTuning,
    /// Hit shake
    pub shake: ShakeSettings,
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// One combatant is still standing.
    Winner(CombatantId),
    /// Both were knocked out on the same tick.
    Draw,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Hits that landed
    pub hits: Vec<HitEvent>,
    /// Animation exits, as `(combatant, from, to)`
    pub exits: Vec<(CombatantId, FighterState, FighterState)>,
    /// Landings, as `(combatant, state entered)`
    pub landings: Vec<(CombatantId, FighterState)>,
    /// Set once the fight is decided
    pub outcome: Option<Outcome>,
}

/// Opacity a state is drawn with.
#[must_use]
pub const fn state_alpha(state: FighterState) -> f32 {
    match state {
        FighterState::DodgeForward | FighterState::DodgeBackward => 0.5,
        _ => 1.0,
    }
}

/// A two-combatant match.
#[derive(Debug, Clone)]
pub struct Fight {
    fighters: [Combatant; 2],
    tables: [FrameGeometryTable; 2],
    machine: StateMachine,
    resolver: CollisionResolver,
    camera: Camera,
    settings: FightSettings,
    ticks: u64,
}

impl Fight {
    /// Sets up a fight with authored frame tables.
    ///
    /// Both tables must animate [`FighterState::Idle`].
    pub fn new(
        characters: [FighterId; 2],
        tables: [FrameGeometryTable; 2],
        settings: FightSettings,
        viewport: Viewport,
    ) -> BrawlResult<Self> {
        for table in &tables {
            table.animation(FighterState::Idle)?;
        }

        let stage = settings.stage;
        let [p1, p2] = roster::start_positions(&stage);
        let health = settings.combat.starting_health;
        let fighters = [
            Combatant::new(characters[0], p1, Direction::Right).with_health(health),
            Combatant::new(characters[1], p2, Direction::Left).with_health(health),
        ];

        let mut camera = Camera::centered(stage, viewport);
        camera.reseed(settings.shake.seed);
        camera.update(0.0, viewport, [p1, p2]);

        info!(
            p1 = %characters[0],
            p2 = %characters[1],
            "Fight started"
        );

        Ok(Self {
            fighters,
            tables,
            machine: StateMachine::new(settings.physics, stage),
            resolver: CollisionResolver::new(settings.combat),
            camera,
            settings,
            ticks: 0,
        })
    }

    /// Sets up a fight with the built-in roster data.
    pub fn builtin(
        characters: [FighterId; 2],
        settings: FightSettings,
        viewport: Viewport,
    ) -> BrawlResult<Self> {
        let tables = characters.map(roster::builtin_table);
        Self::new(characters, tables, settings, viewport)
    }

    /// Replaces the state machine (for custom animation policies).
    #[must_use]
    pub fn with_state_machine(mut self, machine: StateMachine) -> Self {
        self.machine = machine;
        self
    }

    /// Both combatants.
    #[must_use]
    pub fn fighters(&self) -> &[Combatant; 2] {
        &self.fighters
    }

    /// Mutable access to both combatants.
    pub fn fighters_mut(&mut self) -> &mut [Combatant; 2] {
        &mut self.fighters
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The state machine.
    #[must_use]
    pub fn state_machine(&self) -> &StateMachine {
        &self.machine
    }

    /// Fight settings.
    #[must_use]
    pub fn settings(&self) -> &FightSettings {
        &self.settings
    }

    /// Number of ticks run.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one tick.
    ///
    /// `inputs` holds at most one requested state per combatant. A missing
    /// animation for a combatant's current state aborts the tick.
    pub fn tick(
        &mut self,
        time: TickTime,
        viewport: Viewport,
        inputs: [Option<FighterState>; 2],
    ) -> BrawlResult<TickReport> {
        let dt = time.seconds_passed.max(0.0);
        let mut report = TickReport::default();

        for (fighter, input) in self.fighters.iter_mut().zip(inputs) {
            if let Some(target) = input {
                self.machine.request_input(fighter, target);
            }
        }

        for (fighter, table) in self.fighters.iter_mut().zip(&self.tables) {
            let from = fighter.state;
            if let FrameAdvance::Exited { to, .. } =
                self.machine.advance_frame(fighter, dt, table)?
            {
                report.exits.push((fighter.id, from, to));
            }
        }

        let tables = [&self.tables[0], &self.tables[1]];
        report.hits = self
            .resolver
            .resolve_hits(&mut self.fighters, tables, &self.machine);
        self.resolver.resolve_push(
            &mut self.fighters,
            tables,
            &self.settings.physics,
            &self.settings.stage,
            dt,
        );

        for fighter in &mut self.fighters {
            let grounded =
                physics::integrate(fighter, dt, &self.settings.physics, &self.settings.stage);
            if grounded && AIRBORNE_STATES.contains(fighter.state) {
                if let Some(landed) = self.machine.land(fighter) {
                    report.landings.push((fighter.id, landed));
                }
            }
            fighter.tick_status(dt);
        }

        let [a, b] = &mut self.fighters;
        let (a_x, b_x) = (a.position.x, b.position.x);
        self.machine.face(a, b_x);
        self.machine.face(b, a_x);

        if !report.hits.is_empty() {
            let shake = self.settings.shake;
            self.camera.shake(shake.intensity, shake.duration);
        }
        self.camera.update(dt, viewport, self.positions());

        self.ticks += 1;
        report.outcome = self.outcome();
        if let Some(outcome) = report.outcome {
            if !report.hits.is_empty() {
                info!(?outcome, tick = self.ticks, "Fight decided");
            }
        }
        debug!(tick = self.ticks, previous = time.previous, dt, "Tick complete");
        Ok(report)
    }

    /// World positions of both combatants.
    #[must_use]
    pub fn positions(&self) -> [Vec2; 2] {
        [self.fighters[0].position, self.fighters[1].position]
    }

    /// Hands both combatants to a surface, optionally with their boxes.
    pub fn render<S: SpriteSurface>(&self, surface: &mut S, images: [ImageHandle; 2], show_boxes: bool) {
        for ((fighter, table), image) in self.fighters.iter().zip(&self.tables).zip(images) {
            if let Some(record) = table.record_for(fighter.state, fighter.frame_index) {
                let draw = sprite_draw(
                    image,
                    record,
                    fighter.position,
                    fighter.direction,
                    &self.camera,
                    state_alpha(fighter.state),
                );
                surface.draw_sprite(&draw);
            }
            if show_boxes {
                let boxes = table.boxes_for(fighter.state, fighter.frame_index);
                for (kind, rect) in
                    debug_boxes(&boxes, fighter.position, fighter.direction, &self.camera)
                {
                    surface.draw_box(kind, rect);
                }
            }
        }
    }

    /// Result of the fight, once somebody is knocked out.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        let [a, b] = &self.fighters;
        match (a.is_knocked_out(), b.is_knocked_out()) {
            (false, false) => None,
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::Winner(b.id)),
            (false, true) => Some(Outcome::Winner(a.id)),
        }
    }
}
