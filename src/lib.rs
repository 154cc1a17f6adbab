//! Relevance scoring and retention for layered AI-assistant memory.
//!
//! Strata decides, at generation time, which accumulated memories matter most
//! right now, and how each memory's strength evolves as it is reinforced or
//! ignored. Memories live in four layers:
//!
//! | Layer | Holds | Scored by |
//! |-------|-------|-----------|
//! | **Episodic** | Past events and outcomes | Half-life decay × recency |
//! | **Semantic** | Learned statistical patterns | Bayesian-shrunk confidence × recency |
//! | **Procedural** | Strategies with a track record | Prior blended with Laplace-smoothed success rate |
//! | **Working** | Ephemeral session state | Not scored, passed through |
//!
//! Everything in [`memory`] is pure: no I/O, no shared state, and an explicit
//! reference clock. Storage and prompt assembly live outside this crate.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`error`]: Boundary validation errors
//! - [`memory`]: Scorers, cross-layer composition, top-K ranking, and SM-2 retention

pub mod config;
pub mod error;
pub mod memory;
