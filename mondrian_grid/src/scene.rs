// Scene: the regeneration entry point and per-frame driver.
//
// A `Scene` owns everything one running visualisation needs: its config,
// its generator, the current static composition (layout, connectors,
// blocks) and the live agents. `regenerate()` rebuilds all of it from
// scratch in the fixed order layout → connectors → blocks → agents, using
// the scene's own generator, so a seeded scene replays the same sequence of
// compositions.
//
// The static part is published behind an `Arc`. Regeneration builds the new
// composition completely before swapping the pointer, so anything still
// holding the previous `Arc` (a renderer mid-frame, an exporter) keeps a
// consistent snapshot and never sees layout from one generation mixed with
// blocks from another.

use crate::agents::{Agent, seed_agents, step_all};
use crate::black_hole::BlackHole;
use crate::blocks::{BlockSet, generate_blocks};
use crate::config::GridConfig;
use crate::connector::{Connector, generate_connectors};
use crate::error::Result;
use crate::layout::{Layout, build_layout};
use log::info;
use mondrian_prng::GridRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_SPEED_PERCENT: f64 = 100.0;
pub const MAX_SPEED_PERCENT: f64 = 300.0;

/// The part of a generation that stays fixed between regenerations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub layout: Layout,
    pub connectors: Vec<Connector>,
    pub blocks: BlockSet,
}

/// Pause state and global speed multiplier for agent motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub moving: bool,
    pub speed_factor: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            moving: true,
            speed_factor: DEFAULT_SPEED_PERCENT / 100.0,
        }
    }
}

impl Motion {
    /// Set speed from a slider-style percentage, clamped to `[0, 300]`.
    pub fn set_speed_percent(&mut self, percent: f64) {
        self.speed_factor = percent.clamp(0.0, MAX_SPEED_PERCENT) / 100.0;
    }

    pub fn toggle(&mut self) {
        self.moving = !self.moving;
    }

    /// Factor actually applied this frame: zero while paused.
    pub fn effective_factor(&self) -> f64 {
        if self.moving { self.speed_factor } else { 0.0 }
    }
}

/// Serializable view of one frame.
#[derive(Clone, Debug, Serialize)]
pub struct Frame<'a> {
    pub seed: u64,
    pub generation: u64,
    pub composition: &'a Composition,
    pub agents: &'a [Agent],
}

#[derive(Clone, Debug)]
pub struct Scene {
    config: GridConfig,
    seed: u64,
    rng: GridRng,
    composition: Arc<Composition>,
    agents: Vec<Agent>,
    generation: u64,
    pub motion: Motion,
}

impl Scene {
    /// Create a scene and run the first regeneration.
    pub fn new(config: GridConfig, seed: u64) -> Self {
        let mut rng = GridRng::new(seed);
        let (composition, agents) = compose(&config, &mut rng);
        let scene = Self {
            config,
            seed,
            rng,
            composition: Arc::new(composition),
            agents,
            generation: 1,
            motion: Motion::default(),
        };
        scene.log_counts();
        scene
    }

    /// Discard the current composition and agents and build new ones.
    pub fn regenerate(&mut self) {
        let (composition, agents) = compose(&self.config, &mut self.rng);
        self.composition = Arc::new(composition);
        self.agents = agents;
        self.generation += 1;
        self.log_counts();
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of regenerations so far, counting the initial one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shared handle to the current composition.
    pub fn composition(&self) -> Arc<Composition> {
        Arc::clone(&self.composition)
    }

    pub fn layout(&self) -> &Layout {
        &self.composition.layout
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Advance agents one frame, then let `hole` (if any) swallow agents.
    /// Returns the number swallowed. A paused scene neither moves nor
    /// evicts anything.
    pub fn tick(&mut self, hole: Option<&BlackHole>) -> usize {
        if !self.motion.moving {
            return 0;
        }
        let canvas = (self.composition.layout.width, self.composition.layout.height);
        step_all(&mut self.agents, self.motion.speed_factor, canvas);
        hole.map_or(0, |h| h.cull(&mut self.agents))
    }

    pub fn snapshot(&self) -> Frame<'_> {
        Frame {
            seed: self.seed,
            generation: self.generation,
            composition: &self.composition,
            agents: &self.agents,
        }
    }

    /// Current frame as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let frame = self.snapshot();
        let json = if pretty {
            serde_json::to_string_pretty(&frame)?
        } else {
            serde_json::to_string(&frame)?
        };
        Ok(json)
    }

    fn log_counts(&self) {
        let c = &self.composition;
        info!(
            "generation {}: {}x{} cells, {} blocks ({} overlays), {} connectors, {} agents",
            self.generation,
            c.layout.cols(),
            c.layout.rows(),
            c.blocks.primary.len(),
            c.blocks.overlay.len(),
            c.connectors.len(),
            self.agents.len(),
        );
    }
}

fn compose(config: &GridConfig, rng: &mut GridRng) -> (Composition, Vec<Agent>) {
    let layout = build_layout(config, rng);
    let connectors = generate_connectors(config.connectors.count, &layout, rng);
    let blocks = generate_blocks(&layout, &config.blocks, rng);
    let agents = seed_agents(&layout, &config.agents, rng);
    (
        Composition {
            layout,
            connectors,
            blocks,
        },
        agents,
    )
}
