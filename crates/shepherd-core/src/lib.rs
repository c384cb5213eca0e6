//! Core types and definitions for the SHEPHERD simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, state snapshots, events, configuration
//! and constants. It has no dependency on the ECS or any host framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
