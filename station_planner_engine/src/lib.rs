// station_planner_engine — spatial placement engine for a Stationeers build planner.
//
// This crate decides where station pieces (frames, walls, pipes, cables,
// chutes, devices) may go, merges pipe and cable runs into junction pieces
// automatically, and keeps an undoable edit history. It has no rendering or
// UI dependencies and can be tested and benchmarked headless.
//
// Module overview:
// - `types.rs`:       Grid3 integer coordinates, grid snapping, Rotation, ObjectId.
// - `variant.rs`:     Closed sum of every prefab variant, prefab names, shape keys.
// - `object.rs`:      GameObject records, slots, collision classes, wall faces, paint.
// - `connection.rs`:  Six-direction connection patterns, pipe/cable shape tables, rotation.
// - `collision.rs`:   Pairwise coexistence rules (`can_coexist`, `objects_conflict`).
// - `transform.rs`:   Auto-junction search: merge two pieces into one shape.
// - `cell.rs`:        One grid position: six fixed slots, at most one object each.
// - `grid.rs`:        Sparse position→cell map plus the id→position index.
// - `placement.rs`:   PlacementCheck facade (empty, clear, transform, blocked).
// - `command.rs`:     EditCommand and the bounded undo/redo CommandStack.
// - `validation.rs`:  Severity-tiered findings for placements, grids and imports.
// - `plan.rs`:        BuildPlan session: grid + history + ids, JSON save/load.
// - `config.rs`:      PlannerConfig, loadable from JSON.
// - `error.rs`:       PlanError for the serialization boundary.
// - `prng.rs`:        xoshiro256++ with SplitMix64 seeding, for object ids.
//
// All positions are integer multiples of 0.1 m, so equality and hashing are
// exact. Ordered collections (`BTreeMap`) keep iteration deterministic;
// hash maps are used only for lookup-only indexes.

pub mod cell;
pub mod collision;
pub mod command;
pub mod config;
pub mod connection;
pub mod error;
pub mod grid;
pub mod object;
pub mod placement;
pub mod plan;
pub mod prng;
pub mod transform;
pub mod types;
pub mod validation;
pub mod variant;
