// Cursor-following black hole that swallows lane agents.
//
// A frame decorator: after agents move, any agent whose centre lies strictly
// inside the hole's radius is removed for good (until the next
// regeneration). The radius is wheel-adjustable within fixed bounds.

use crate::agents::Agent;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS: f64 = 45.0;
pub const MIN_RADIUS: f64 = 15.0;
pub const MAX_RADIUS: f64 = 120.0;
/// Radius change per unit of wheel delta.
pub const WHEEL_SENSITIVITY: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlackHole {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl BlackHole {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: DEFAULT_RADIUS,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Apply a wheel delta. Negative deltas (scrolling up) grow the hole.
    pub fn adjust(&mut self, wheel_delta: f64) {
        self.radius = (self.radius - wheel_delta * WHEEL_SENSITIVITY).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    pub fn swallows(&self, agent: &Agent) -> bool {
        let (cx, cy) = agent.center();
        let dx = cx - self.x;
        let dy = cy - self.y;
        dx * dx + dy * dy < self.radius * self.radius
    }

    /// Drop every swallowed agent, returning how many went.
    pub fn cull(&self, agents: &mut Vec<Agent>) -> usize {
        let before = agents.len();
        agents.retain(|a| !self.swallows(a));
        before - agents.len()
    }
}
