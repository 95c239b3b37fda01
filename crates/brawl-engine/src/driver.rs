//! Headless match driver.
//!
//! Runs a fight from a [`MatchConfig`]: a scripted input schedule stands in
//! for the players, a [`TickClock`] turns simulated display frames into fixed
//! ticks, and every frame is handed to a [`RecordingSurface`].

use brawl_common::{BrawlResult, FighterId, FighterState};
use brawl_gameplay::{Combatant, Fight, Outcome};
use brawl_kernel::{BoxKind, ImageHandle, Rect, SpriteDraw, SpriteSurface};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::timing::TickClock;

/// One scheduled input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedInput {
    /// Tick the input is fed on, counted from zero
    pub tick: u64,
    /// Player index, 0 or 1
    pub player: usize,
    /// Requested state
    pub state: FighterState,
}

impl ScriptedInput {
    /// Creates a scheduled input.
    #[must_use]
    pub const fn new(tick: u64, player: usize, state: FighterState) -> Self {
        Self {
            tick,
            player,
            state,
        }
    }
}

/// Short exchange used when no script is configured.
#[must_use]
pub fn demo_script() -> Vec<ScriptedInput> {
    use FighterState as S;
    vec![
        ScriptedInput::new(0, 0, S::WalkForward),
        ScriptedInput::new(0, 1, S::WalkForward),
        ScriptedInput::new(30, 0, S::LightPunch),
        ScriptedInput::new(33, 0, S::LightKick),
        ScriptedInput::new(40, 1, S::Block),
        ScriptedInput::new(70, 1, S::HeavyPunch),
        ScriptedInput::new(110, 0, S::CrouchDown),
        ScriptedInput::new(130, 0, S::CrouchHeavyKick),
        ScriptedInput::new(180, 1, S::JumpForward),
        ScriptedInput::new(200, 0, S::HeavyKick),
    ]
}

/// Input schedule indexed by tick.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    inputs: Vec<ScriptedInput>,
}

impl InputScript {
    /// Builds a schedule, dropping inputs for players that don't exist.
    #[must_use]
    pub fn new(mut inputs: Vec<ScriptedInput>) -> Self {
        inputs.retain(|input| {
            let valid = input.player < 2;
            if !valid {
                warn!(player = input.player, tick = input.tick, "Dropping input for unknown player");
            }
            valid
        });
        inputs.sort_by_key(|input| input.tick);
        Self { inputs }
    }

    /// Number of scheduled inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// True when nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Inputs for one tick. The last entry wins when a player has several.
    #[must_use]
    pub fn inputs_for(&self, tick: u64) -> [Option<FighterState>; 2] {
        let start = self.inputs.partition_point(|input| input.tick < tick);
        let mut out = [None; 2];
        for input in self.inputs[start..].iter().take_while(|i| i.tick == tick) {
            out[input.player] = Some(input.state);
        }
        out
    }
}

/// Surface that keeps the draw calls of the latest frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Sprites of the current frame
    pub sprites: Vec<SpriteDraw>,
    /// Debug boxes of the current frame
    pub boxes: Vec<(BoxKind, Rect)>,
    /// Frames started
    pub frames: u64,
}

impl RecordingSurface {
    /// Clears the previous frame.
    pub fn begin_frame(&mut self) {
        self.sprites.clear();
        self.boxes.clear();
        self.frames += 1;
    }
}

impl SpriteSurface for RecordingSurface {
    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        self.sprites.push(*draw);
    }

    fn draw_box(&mut self, kind: BoxKind, rect: Rect) {
        self.boxes.push((kind, rect));
    }
}

/// Final state of one fighter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FighterSummary {
    /// Character
    pub fighter: FighterId,
    /// Remaining health
    pub health: f32,
    /// Score
    pub score: u32,
    /// Skill meter
    pub skill: u32,
    /// State at the end of the match
    pub state: FighterState,
}

impl From<&Combatant> for FighterSummary {
    fn from(combatant: &Combatant) -> Self {
        Self {
            fighter: combatant.fighter,
            health: combatant.health,
            score: combatant.score,
            skill: combatant.skill,
            state: combatant.state,
        }
    }
}

/// Result of a headless match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    /// Ticks simulated
    pub ticks: u64,
    /// Frames rendered
    pub frames: u64,
    /// Simulated seconds
    pub seconds: f64,
    /// Hits landed, blocked ones included
    pub hits: usize,
    /// Hits that were blocked
    pub blocked: usize,
    /// Index of the winning player
    pub winner: Option<usize>,
    /// Both players went down on the same tick
    pub draw: bool,
    /// Sprites handed to the surface on the closing frame
    pub sprites_drawn: usize,
    /// Debug boxes handed to the surface on the closing frame
    pub boxes_drawn: usize,
    /// Per-player results
    pub fighters: [FighterSummary; 2],
}

/// Runs a match to a knockout or until `max_ticks` is reached.
pub fn run_match(config: &MatchConfig) -> BrawlResult<MatchSummary> {
    let viewport = config.viewport();
    let settings = config.fight_settings();
    let mut fight = match config.frame_tables()? {
        Some(tables) => Fight::new(config.fighters, tables, settings, viewport)?,
        None => Fight::builtin(config.fighters, settings, viewport)?,
    };

    let script = InputScript::new(config.script.clone());
    let mut clock = TickClock::new(config.tick_rate);
    let frame_dt = 1.0 / config.frame_rate.max(1) as f32;
    let max_ticks = u64::from(config.max_ticks);
    let images = [ImageHandle(0), ImageHandle(1)];
    let mut surface = RecordingSurface::default();

    info!(
        ticks = max_ticks,
        inputs = script.len(),
        "Running headless match"
    );

    let mut hits = 0;
    let mut blocked = 0;
    let mut outcome = None;

    'frames: while clock.ticks() < max_ticks {
        for _ in 0..clock.accumulate(frame_dt) {
            let inputs = script.inputs_for(fight.ticks());
            let report = fight.tick(clock.next_tick(), viewport, inputs)?;

            hits += report.hits.len();
            blocked += report.hits.iter().filter(|h| h.blocked).count();
            for (id, from, to) in &report.exits {
                debug!(%id, %from, %to, "Animation exit");
            }

            if report.outcome.is_some() {
                outcome = report.outcome;
                break 'frames;
            }
            if clock.ticks() >= max_ticks {
                break 'frames;
            }
        }

        surface.begin_frame();
        fight.render(&mut surface, images, config.show_boxes);
    }

    surface.begin_frame();
    fight.render(&mut surface, images, config.show_boxes);

    let fighters = fight.fighters();
    let winner = match outcome {
        Some(Outcome::Winner(id)) => fighters.iter().position(|f| f.id == id),
        _ => None,
    };
    let summary = MatchSummary {
        ticks: fight.ticks(),
        frames: surface.frames,
        seconds: clock.elapsed(),
        hits,
        blocked,
        winner,
        draw: outcome == Some(Outcome::Draw),
        sprites_drawn: surface.sprites.len(),
        boxes_drawn: surface.boxes.len(),
        fighters: [
            FighterSummary::from(&fighters[0]),
            FighterSummary::from(&fighters[1]),
        ],
    };

    info!(
        ticks = summary.ticks,
        hits = summary.hits,
        winner = ?summary.winner,
        "Match finished"
    );
    Ok(summary)
}
