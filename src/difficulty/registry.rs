//! Difficulty registry for tier lookup.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};
use crate::mcts::{MCTSConfig, MCTSSearch};
use crate::minimax::{MinimaxConfig, MinimaxSearch};
use crate::search::Engine;

/// Tier names provided by [`DifficultyRegistry::standard`], weakest first.
pub const STANDARD_TIERS: [&str; 6] = ["easy", "medium", "hard", "expert", "master", "grandmaster"];

/// Search algorithm and budget behind a tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "lowercase")]
pub enum EngineSpec {
    Minimax(MinimaxConfig),
    Mcts(MCTSConfig),
}

impl EngineSpec {
    /// Minimax at a fixed depth.
    #[must_use]
    pub fn minimax(depth: u32) -> Self {
        EngineSpec::Minimax(MinimaxConfig::default().with_depth(depth))
    }

    /// MCTS with a playout budget and a wall-clock budget.
    #[must_use]
    pub fn mcts(simulations: u32, time_budget_ms: u64) -> Self {
        EngineSpec::Mcts(
            MCTSConfig::default()
                .with_simulations(simulations)
                .with_time_budget_ms(time_budget_ms),
        )
    }

    /// Instantiate a fresh engine. `seed` only affects MCTS.
    #[must_use]
    pub fn build(&self, seed: u64) -> Engine {
        match self {
            EngineSpec::Minimax(config) => MinimaxSearch::new(config.clone()).into(),
            EngineSpec::Mcts(config) => MCTSSearch::new(config.clone().with_seed(seed)).into(),
        }
    }
}

/// Registry of difficulty tiers.
///
/// ## Example
///
/// ```
/// use togyz_ai::difficulty::{DifficultyRegistry, EngineSpec};
/// use togyz_ai::search::SearchEngine;
///
/// let mut registry = DifficultyRegistry::standard();
/// registry.register("beginner", EngineSpec::minimax(1));
///
/// let engine = registry.build("beginner", 0).unwrap();
/// assert_eq!(engine.name(), "minimax");
/// assert!(registry.get("impossible").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DifficultyRegistry {
    tiers: FxHashMap<String, EngineSpec>,
}

impl DifficultyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The six standard tiers: minimax depth 2/4/6, then MCTS at
    /// 5 000/15 000/30 000 playouts capped at 2/5/10 seconds.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("easy", EngineSpec::minimax(2));
        registry.register("medium", EngineSpec::minimax(4));
        registry.register("hard", EngineSpec::minimax(6));
        registry.register("expert", EngineSpec::mcts(5_000, 2_000));
        registry.register("master", EngineSpec::mcts(15_000, 5_000));
        registry.register("grandmaster", EngineSpec::mcts(30_000, 10_000));
        registry
    }

    /// Register a tier, returning the spec it replaced.
    pub fn register(&mut self, name: impl Into<String>, spec: EngineSpec) -> Option<EngineSpec> {
        self.tiers.insert(name.into(), spec)
    }

    /// Look up a tier by name.
    pub fn get(&self, name: &str) -> Result<&EngineSpec> {
        self.tiers
            .get(name)
            .ok_or_else(|| GameError::UnknownDifficulty(name.to_string()))
    }

    /// Build a fresh engine for a tier.
    pub fn build(&self, name: &str, seed: u64) -> Result<Engine> {
        Ok(self.get(name)?.build(seed))
    }

    /// Check if a tier is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tiers.contains_key(name)
    }

    /// Get the number of registered tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Registered tier names in alphabetical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tiers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
