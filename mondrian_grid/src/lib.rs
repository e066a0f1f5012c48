// mondrian_grid : procedural Mondrian-style grid compositions.
//
// This crate generates a canvas split into a biased grid of cells separated
// by thin gaps, decorates it with coloured strips and white connectors, and
// populates the gaps ("lanes") with small moving squares. It draws nothing:
// every output is plain data that a renderer (or the `generate` binary's
// JSON export) consumes.
//
// Module overview:
// - `weights.rs`:    Centre-biased position weights for one axis.
// - `partition.rs`:  Biased partitioner: splits a total into clamped, exactly-summing segments.
// - `layout.rs`:     Layout builder: gaps, column widths, row heights, cell coordinates.
// - `connector.rs`:  White bridges that visually merge neighbouring cells.
// - `blocks.rs`:     Big blocks and nested overlay blocks inside cells.
// - `agents.rs`:     Lane agent seeding and per-frame wrap motion.
// - `scene.rs`:      Scene: `regenerate()`, motion control, frame snapshots.
// - `black_hole.rs`: Cursor-driven eviction of agents.
// - `audio.rs`:      Audio-reactive size and brightness modifiers.
// - `chase.rs`:      Runner-and-chasers overlay on the lanes.
// - `config.rs`:     GridConfig, every tunable parameter, JSON-loadable.
// - `error.rs`:      ConfigError for the fallible edges (I/O, parsing, validation).
// - `types.rs`:      Rect, Swatch, StripMode, LaneKind.
// - `prng`:          Re-exported from `mondrian_prng`: xoshiro256++ with SplitMix64 seeding.
//
// **Determinism.** Generation is a pure function of `(config, generator
// state)`. All randomness flows through the `RandomSource` passed in, in a
// fixed draw order, so a seeded `GridRng` reproduces a composition exactly
// and a scripted `SequenceRng` pins individual draws in tests.

pub mod agents;
pub mod audio;
pub mod black_hole;
pub mod blocks;
pub mod chase;
pub mod config;
pub mod connector;
pub mod error;
pub mod layout;
pub mod partition;
pub use mondrian_prng as prng;
pub mod scene;
pub mod types;
pub mod weights;
