// Audio-reactive pulse over an existing composition.
//
// The caller does the signal analysis and hands in one `AudioFrame` per
// rendered frame: three band energies on the analyser's 0–255 scale and a
// beat flag. `AudioPulse` turns that into display modifiers without touching
// the layout or the agents: a per-agent draw size and a global brightness
// factor for blocks.
//
// Each agent colour listens to one band: red to bass, blue to mid, grey to
// treble. A beat sets the flash to 1.0, which then decays geometrically.
// While the flash is strong, agents and blocks are also drawn lighter.
// An inflated agent grows around the centre of its base square, so its lane
// position is unchanged.

use crate::agents::Agent;
use crate::scene::Motion;
use crate::types::{Rect, Swatch};
use serde::{Deserialize, Serialize};

/// How strongly a full-scale band inflates an agent (1 + band * scale).
pub const AMPLITUDE_SCALE: f64 = 3.0;
/// Per-frame decay of the beat flash when no beat is detected.
pub const BEAT_DECAY: f64 = 0.92;
/// Speed factor agents run at while audio drives the scene.
pub const NOMINAL_SPEED: f64 = 0.8;
/// Per-channel lift of agent colours at full flash.
pub const AGENT_FLASH_LIFT: f64 = 40.0;
/// Per-channel lift per unit of block brightness above 1.0.
pub const BLOCK_LIFT_SCALE: f64 = 50.0;

/// Motion settings for an audio-driven scene.
pub fn nominal_motion() -> Motion {
    Motion {
        moving: true,
        speed_factor: NOMINAL_SPEED,
    }
}

/// Analyser output for one frame. Energies are on a 0–255 scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFrame {
    pub bass: f64,
    pub mid: f64,
    pub treble: f64,
    pub beat: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioPulse {
    /// Beat flash intensity, 1.0 right after a beat.
    pub flash: f64,
    bass: f64,
    mid: f64,
    treble: f64,
}

impl AudioPulse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one analyser frame.
    pub fn update(&mut self, frame: &AudioFrame) {
        if frame.beat {
            self.flash = 1.0;
        } else {
            self.flash *= BEAT_DECAY;
        }
        self.bass = normalize(frame.bass);
        self.mid = normalize(frame.mid);
        self.treble = normalize(frame.treble);
    }

    /// Normalised (0–1) energy of the band `color` listens to.
    pub fn band_for(&self, color: Swatch) -> Option<f64> {
        match color {
            Swatch::Red => Some(self.bass),
            Swatch::Blue => Some(self.mid),
            Swatch::Grey => Some(self.treble),
            Swatch::Yellow | Swatch::White => None,
        }
    }

    /// Size to draw `agent` at this frame.
    pub fn agent_size(&self, agent: &Agent) -> f64 {
        let energy = self
            .band_for(agent.color)
            .map_or(1.0, |band| 1.0 + band * AMPLITUDE_SCALE);
        let mut size = agent.size * energy;
        if self.flash > 0.5 {
            size *= 1.0 + self.flash * 0.3;
        }
        size
    }

    /// Square to draw `agent` in, grown or shrunk around its base centre.
    pub fn agent_draw_rect(&self, agent: &Agent) -> Rect {
        let size = self.agent_size(agent);
        let offset = (agent.size - size) / 2.0;
        Rect::new(agent.x + offset, agent.y + offset, size, size)
    }

    /// Amount added to each colour channel of every agent this frame.
    pub fn agent_brightness(&self) -> f64 {
        if self.flash > 0.3 {
            self.flash * AGENT_FLASH_LIFT
        } else {
            0.0
        }
    }

    /// Colour to draw `agent` in this frame.
    pub fn agent_rgb(&self, agent: &Agent) -> [u8; 3] {
        lift(agent.color.rgb(), self.agent_brightness())
    }

    /// Colour to draw a block of `color` in this frame.
    pub fn block_rgb(&self, color: Swatch) -> [u8; 3] {
        lift(color.rgb(), (self.block_brightness() - 1.0) * BLOCK_LIFT_SCALE)
    }

    /// Brightness multiplier for every coloured block.
    pub fn block_brightness(&self) -> f64 {
        if self.flash > 0.3 {
            1.0 + self.flash * 0.2
        } else {
            1.0
        }
    }
}

fn normalize(energy: f64) -> f64 {
    (energy / 255.0).clamp(0.0, 1.0)
}

/// Add `amount` to every channel, saturating at 255.
fn lift(rgb: [u8; 3], amount: f64) -> [u8; 3] {
    rgb.map(|c| (f64::from(c) + amount).round().clamp(0.0, 255.0) as u8)
}
