//! Configuration types for Swimlane compilation.
//!
//! This module provides configuration structures that control pool and lane
//! geometry, id generation and XML output. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file, and every
//! field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Pool margin, lane header inset and default pool height.
//! - [`IdConfig`] - Which [`IdStrategy`] generates synthesized element ids.
//! - [`OutputConfig`] - Serializer indentation.
//!
//! # Example
//!
//! ```
//! # use swimlane::config::{AppConfig, IdStrategy};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().pool_margin(), 200);
//! assert_eq!(config.ids().strategy(), IdStrategy::Sequential);
//! assert_eq!(config.output().indent(), 4);
//! ```

use serde::Deserialize;

use swimlane_core::identifier::{IdGenerator, RandomIds, SequentialIds};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Id generation section.
    #[serde(default)]
    ids: IdConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `layout` - Pool and lane geometry settings.
    /// * `ids` - Id generation settings.
    /// * `output` - XML output settings.
    pub fn new(layout: LayoutConfig, ids: IdConfig, output: OutputConfig) -> Self {
        Self {
            layout,
            ids,
            output,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the id generation configuration.
    pub fn ids(&self) -> &IdConfig {
        &self.ids
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Pool and lane geometry settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Added to the rightmost component x to get the pool width.
    pool_margin: i32,

    /// Width of the pool name header that lanes start after.
    lane_header_inset: i32,

    /// Height of a pool that does not declare one.
    pool_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pool_margin: 200,
            lane_header_inset: 30,
            pool_height: 250,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(pool_margin: i32, lane_header_inset: i32, pool_height: i32) -> Self {
        Self {
            pool_margin,
            lane_header_inset,
            pool_height,
        }
    }

    pub fn pool_margin(&self) -> i32 {
        self.pool_margin
    }

    pub fn lane_header_inset(&self) -> i32 {
        self.lane_header_inset
    }

    pub fn pool_height(&self) -> i32 {
        self.pool_height
    }
}

/// How synthesized element ids are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Counter based ids, reproducible across runs.
    #[default]
    Sequential,
    /// Random alphanumeric suffixes.
    Random,
}

/// Id generation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    strategy: IdStrategy,

    /// Seed for [`IdStrategy::Random`]. Ignored for sequential ids.
    seed: Option<u64>,
}

impl IdConfig {
    /// Creates a new [`IdConfig`].
    pub fn new(strategy: IdStrategy, seed: Option<u64>) -> Self {
        Self { strategy, seed }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Builds a fresh generator for one compile.
    pub fn generator(&self) -> Box<dyn IdGenerator> {
        match (self.strategy, self.seed) {
            (IdStrategy::Sequential, _) => Box::new(SequentialIds::new()),
            (IdStrategy::Random, Some(seed)) => Box::new(RandomIds::seeded(seed)),
            (IdStrategy::Random, None) => Box::new(RandomIds::from_os_rng()),
        }
    }
}

/// XML output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Spaces per nesting level.
    indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl OutputConfig {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }
}
