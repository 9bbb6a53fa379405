//! Configuration system for branchbound.
//!
//! Load solver configuration from TOML or YAML files to control the
//! exhaustive search type, selector behavior, and assertion modes without
//! code changes. Configs are layered: a config can `inherit` from a base
//! config, where every field set locally overrides the inherited value.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use branchbound_config::{ExhaustiveSearchType, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!
//!     [exhaustive_search]
//!     exhaustive_search_type = "depth_first_branch_and_bound"
//!     enable_pruning = true
//! "#).unwrap();
//!
//! assert_eq!(
//!     config.exhaustive_search.exhaustive_search_type,
//!     Some(ExhaustiveSearchType::DepthFirstBranchAndBound),
//! );
//! ```
//!
//! Use default config when a file is missing:
//!
//! ```
//! use branchbound_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Controls how defensively the solver validates itself while running.
///
/// Assertion modes trade speed for internal-consistency checking; a score
/// corruption detected under an assert mode aborts the solve instead of
/// continuing with unreliable scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Recalculates every move's score from scratch and compares it
    /// against the incremental score. Slowest, catches everything.
    FullAssert,

    /// Verifies that undoing a move restores the expected score.
    /// Cheaper than `FullAssert`, catches most corruptions.
    FastAssert,

    /// No assertions; deterministic execution.
    #[default]
    Reproducible,
}

impl EnvironmentMode {
    /// True when every move's score must be recomputed from scratch and
    /// compared (non-intrusive: does not alter the search path).
    pub fn is_non_intrusive_full_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }

    /// True when the cheaper expected-undo-score check applies.
    pub fn is_intrusive_fast_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert)
    }
}

/// How long a selector's derived state (ordering, cached values) stays
/// valid before it must be re-derived.
///
/// Ordered from weakest to strongest: `JustInTime < Step < Phase < Solver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionCacheType {
    /// Recomputed lazily on every selection.
    JustInTime,
    /// Recomputed once per step.
    Step,
    /// Recomputed once per phase.
    #[default]
    Phase,
    /// Computed once for the whole solve.
    Solver,
}

/// The branch-and-bound exploration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustiveSearchType {
    /// Shallowest open node first, FIFO within a depth.
    BreadthFirstBranchAndBound,
    /// Deepest open node first, stack discipline. Bounds memory to
    /// O(depth x branching factor).
    DepthFirstBranchAndBound,
    /// Best optimistic bound first. Minimizes nodes expanded but keeps a
    /// full priority queue.
    OptimisticBoundFirstBranchAndBound,
}

impl ExhaustiveSearchType {
    /// All exploration orders resolve hard-to-place entities first to
    /// improve pruning effectiveness early.
    pub fn sort_entities_by_decreasing_difficulty(&self) -> bool {
        true
    }

    /// All exploration orders try likely-good values first.
    pub fn sort_values_by_increasing_strength(&self) -> bool {
        true
    }
}

/// Entity selector configuration for the exhaustive search phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySelectorConfig {
    /// Cache scope for the entity ordering. Exhaustive search requires at
    /// least phase scope; weaker scopes are rejected at build time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_type: Option<SelectionCacheType>,

    /// Whether to sort entities by decreasing difficulty. Defaults to the
    /// search type's policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by_decreasing_difficulty: Option<bool>,
}

impl EntitySelectorConfig {
    /// Merges the inherited config into this one: fields already set here
    /// win, unset fields take the inherited value.
    pub fn inherit(&mut self, inherited: &EntitySelectorConfig) {
        if self.cache_type.is_none() {
            self.cache_type = inherited.cache_type;
        }
        if self.sort_by_decreasing_difficulty.is_none() {
            self.sort_by_decreasing_difficulty = inherited.sort_by_decreasing_difficulty;
        }
    }
}

/// Configuration for one exhaustive search phase.
///
/// All fields are optional so that configs can be layered; unset fields
/// fall back to the inherited config, then to the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExhaustiveSearchPhaseConfig {
    /// The exploration order. Defaults to depth-first branch and bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaustive_search_type: Option<ExhaustiveSearchType>,

    /// Entity selector tuning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_selector: Option<EntitySelectorConfig>,

    /// Whether to sort values by increasing strength. Defaults to the
    /// search type's policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_values_by_increasing_strength: Option<bool>,

    /// Whether bound-based pruning is enabled. Defaults to true; disabling
    /// it forces a plain exhaustive enumeration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pruning: Option<bool>,
}

impl ExhaustiveSearchPhaseConfig {
    /// Merges the inherited config into this one: fields already set here
    /// win, unset fields take the inherited value.
    pub fn inherit(&mut self, inherited: &ExhaustiveSearchPhaseConfig) {
        if self.exhaustive_search_type.is_none() {
            self.exhaustive_search_type = inherited.exhaustive_search_type;
        }
        match (&mut self.entity_selector, &inherited.entity_selector) {
            (Some(own), Some(base)) => own.inherit(base),
            (None, Some(base)) => self.entity_selector = Some(base.clone()),
            _ => {}
        }
        if self.sort_values_by_increasing_strength.is_none() {
            self.sort_values_by_increasing_strength = inherited.sort_values_by_increasing_strength;
        }
        if self.enable_pruning.is_none() {
            self.enable_pruning = inherited.enable_pruning;
        }
    }

    /// The effective search type after defaulting.
    pub fn resolved_search_type(&self) -> ExhaustiveSearchType {
        self.exhaustive_search_type
            .unwrap_or(ExhaustiveSearchType::DepthFirstBranchAndBound)
    }

    /// Validates the selector cache scope.
    ///
    /// Exhaustive search derives the entity order once per phase; a cache
    /// scope weaker than phase would re-derive it mid-search and is
    /// rejected as a configuration error rather than silently corrected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(selector) = &self.entity_selector {
            if let Some(cache_type) = selector.cache_type {
                if cache_type < SelectionCacheType::Phase {
                    return Err(ConfigError::Invalid(format!(
                        "The exhaustive search entity selector cannot have a cache_type \
                         ({cache_type:?}) lower than {:?}",
                        SelectionCacheType::Phase
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Top-level solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Assertion/reproducibility mode.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// The exhaustive search phase.
    #[serde(default)]
    pub exhaustive_search: ExhaustiveSearchPhaseConfig,
}

impl SolverConfig {
    /// Loads configuration from a file, dispatching on the extension
    /// (`.yaml`/`.yml` parse as YAML, anything else as TOML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(s)?;
        config.exhaustive_search.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_yaml::from_str(s)?;
        config.exhaustive_search.validate()?;
        Ok(config)
    }

    /// Merges the inherited config into this one.
    pub fn inherit(&mut self, inherited: &SolverConfig) {
        // environment_mode is non-optional and always set locally; only
        // the phase config participates in layering.
        self.exhaustive_search.inherit(&inherited.exhaustive_search);
    }
}
