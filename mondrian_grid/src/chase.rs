// Chase overlay: a runner and three chasers on the gap lanes.
//
// Runs on top of a finished `Layout` and never modifies it. The runner
// starts on a random horizontal lane and, whenever its centre passes within
// one lane thickness of a crossing lane's centre line, may turn onto it.
// Chasers stay on the vertical lane they spawned on. Every 5 s they switch
// between chasing (heading toward the runner's y) and scattering (random
// reversals).
//
// All timing comes from the `dt_ms` the caller passes to `update`, so the
// overlay is frame-rate independent in its mode switching and mouth cycle,
// while motion per update stays per-frame like the lane agents.
//
// Bodies use the same top-left convention as agents: `(x, y)` is the corner,
// and a body centred on a lane has `corner = lane_centre - size / 2`.

use crate::agents::wrap_advance;
use crate::layout::Layout;
use crate::types::LaneKind;
use mondrian_prng::RandomSource;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

pub const TURN_PROBABILITY: f64 = 0.15;
pub const UTURN_PROBABILITY: f64 = 0.008;
pub const SCATTER_FLIP_PROBABILITY: f64 = 0.02;
pub const MODE_CYCLE_MS: f64 = 5000.0;
pub const MOUTH_CYCLE_MS: f64 = 300.0;
pub const MOUTH_MAX_DEGREES: f64 = 45.0;
pub const RUNNER_SPEED: f64 = 1.5;
pub const CHASER_SPEED: f64 = 1.2;
/// Body side relative to the hosting lane's thickness.
const BODY_FRACTION: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaseMode {
    Chase,
    Scatter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaserTint {
    Red,
    Cyan,
    Pink,
}

impl ChaserTint {
    pub const ALL: [ChaserTint; 3] = [ChaserTint::Red, ChaserTint::Cyan, ChaserTint::Pink];

    pub const fn hex(self) -> &'static str {
        match self {
            ChaserTint::Red => "#ff0000",
            ChaserTint::Cyan => "#00ffff",
            ChaserTint::Pink => "#ffb8ff",
        }
    }
}

/// A body riding one lane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub lane: LaneKind,
    pub lane_index: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    /// `1.0` toward increasing coordinates, `-1.0` toward decreasing.
    pub direction: f64,
}

impl Mover {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.size * 0.5, self.y + self.size * 0.5)
    }

    fn advance(&mut self, speed_factor: f64, canvas: (f64, f64)) {
        let v = self.speed * speed_factor * self.direction;
        match self.lane {
            LaneKind::Vertical => wrap_advance(&mut self.y, v, self.size, canvas.1),
            LaneKind::Horizontal => wrap_advance(&mut self.x, v, self.size, canvas.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chaser {
    pub body: Mover,
    pub tint: ChaserTint,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChaseGame {
    pub runner: Mover,
    pub chasers: Vec<Chaser>,
    pub mode: ChaseMode,
    mode_elapsed_ms: f64,
    elapsed_ms: f64,
}

impl ChaseGame {
    /// Spawn the runner and chasers on `layout`.
    ///
    /// Returns `None` when the layout has no horizontal lane for the runner.
    /// A layout without vertical lanes yields a game with no chasers.
    pub fn new(layout: &Layout, rng: &mut impl RandomSource) -> Option<Self> {
        if layout.row_gaps.is_empty() {
            return None;
        }
        let r = rng.index(layout.row_gaps.len());
        let size = layout.row_gaps[r] * BODY_FRACTION;
        let (_, lane_y) = layout.horizontal_lane(r).center();
        let runner = Mover {
            lane: LaneKind::Horizontal,
            lane_index: r,
            x: layout.width / 2.0,
            y: lane_y - size / 2.0,
            size,
            speed: RUNNER_SPEED,
            direction: 1.0,
        };

        let mut chasers = Vec::new();
        if !layout.col_gaps.is_empty() {
            for tint in ChaserTint::ALL {
                let c = rng.index(layout.col_gaps.len());
                let size = layout.col_gaps[c] * BODY_FRACTION;
                let (lane_x, _) = layout.vertical_lane(c).center();
                let y = rng.range_f64(0.0, layout.height);
                let direction = rng.sign();
                chasers.push(Chaser {
                    body: Mover {
                        lane: LaneKind::Vertical,
                        lane_index: c,
                        x: lane_x - size / 2.0,
                        y,
                        size,
                        speed: CHASER_SPEED,
                        direction,
                    },
                    tint,
                });
            }
        }

        Some(Self {
            runner,
            chasers,
            mode: ChaseMode::Chase,
            mode_elapsed_ms: 0.0,
            elapsed_ms: 0.0,
        })
    }

    /// Advance the game by one frame that took `dt_ms`.
    pub fn update(
        &mut self,
        layout: &Layout,
        dt_ms: f64,
        speed_factor: f64,
        rng: &mut impl RandomSource,
    ) {
        self.elapsed_ms += dt_ms;
        self.mode_elapsed_ms += dt_ms;
        if self.mode_elapsed_ms > MODE_CYCLE_MS {
            self.mode = match self.mode {
                ChaseMode::Chase => ChaseMode::Scatter,
                ChaseMode::Scatter => ChaseMode::Chase,
            };
            self.mode_elapsed_ms = 0.0;
        }

        self.update_runner(layout, speed_factor, rng);
        self.update_chasers(layout, speed_factor, rng);
    }

    /// Opening of the runner's mouth in degrees, cycling every 300 ms.
    pub fn mouth_angle(&self) -> f64 {
        let phase = (self.elapsed_ms % MOUTH_CYCLE_MS) / MOUTH_CYCLE_MS;
        ((phase * TAU).sin() + 1.0) / 2.0 * MOUTH_MAX_DEGREES
    }

    fn update_runner(&mut self, layout: &Layout, speed_factor: f64, rng: &mut impl RandomSource) {
        let canvas = (layout.width, layout.height);
        let runner = &mut self.runner;
        runner.advance(speed_factor, canvas);

        let (cx, cy) = runner.center();
        match runner.lane {
            LaneKind::Horizontal => {
                for c in 0..layout.col_gaps.len() {
                    let lane = layout.vertical_lane(c);
                    let (lane_x, _) = lane.center();
                    if (cx - lane_x).abs() < lane.w && rng.chance(TURN_PROBABILITY) {
                        runner.lane = LaneKind::Vertical;
                        runner.lane_index = c;
                        runner.x = lane_x - runner.size / 2.0;
                        runner.direction = rng.sign();
                        break;
                    }
                }
            }
            LaneKind::Vertical => {
                for r in 0..layout.row_gaps.len() {
                    let lane = layout.horizontal_lane(r);
                    let (_, lane_y) = lane.center();
                    if (cy - lane_y).abs() < lane.h && rng.chance(TURN_PROBABILITY) {
                        runner.lane = LaneKind::Horizontal;
                        runner.lane_index = r;
                        runner.y = lane_y - runner.size / 2.0;
                        runner.direction = rng.sign();
                        break;
                    }
                }
            }
        }

        if rng.chance(UTURN_PROBABILITY) {
            runner.direction = -runner.direction;
        }
    }

    fn update_chasers(&mut self, layout: &Layout, speed_factor: f64, rng: &mut impl RandomSource) {
        let canvas = (layout.width, layout.height);
        let target_y = self.runner.y;
        for chaser in &mut self.chasers {
            let body = &mut chaser.body;
            match self.mode {
                ChaseMode::Chase => {
                    if body.y < target_y {
                        body.direction = 1.0;
                    } else if body.y > target_y {
                        body.direction = -1.0;
                    }
                }
                ChaseMode::Scatter => {
                    if rng.chance(SCATTER_FLIP_PROBABILITY) {
                        body.direction = -body.direction;
                    }
                }
            }
            body.advance(speed_factor, canvas);

            // Re-centre in case the layout was regenerated under us.
            if let Some(&gap) = layout.col_gaps.get(body.lane_index) {
                body.x = layout.col_end(body.lane_index) + gap / 2.0 - body.size / 2.0;
            }
        }
    }
}
