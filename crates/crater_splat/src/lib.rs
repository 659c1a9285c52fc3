#![forbid(unsafe_code)]
//! crater_splat: Procedural crater splatting for node-based terrain scenes.
//!
//! Modules:
//! - config: validated configurations, raw text-field configurations and presets
//! - sampling: uniform range sampling, diameter-derived metrics and crater positions
//! - craters: crater plans, chain splicing into the terrain pipeline, the runner and events
//! - scene: the scene-graph adapter trait, its error taxonomy and an in-memory scene
//!
//! For examples, see the `crater_splat_examples` crate.
pub mod config;
pub mod craters;
pub mod error;
pub mod sampling;
pub mod scene;

/// Convenient re-exports for common types. Import with `use crater_splat::prelude::*;`.
pub mod prelude {
    pub use crate::config::{
        BaseShapeSpec, Configuration, GroupSpec, InsertionMode, Preset, RawConfiguration,
        RimShaderClass, RimShaderSpec, TargetSelection, WarpSpec,
    };
    pub use crate::craters::events::{
        ApplyEvent, ApplyEventKind, EventSink, FnSink, MultiSink, VecSink,
    };
    pub use crate::craters::plan::{
        ChainState, CraterPlan, CraterPlanBuilder, NodeRef, NodeRole, NodeSlot, Operation,
        ParamValue,
    };
    pub use crate::craters::runner::{
        apply, apply_with_events, execute_plan, ApplyReport, CraterSplatter, CreatedNode,
    };
    pub use crate::craters::splice::{locate_target, PipelineSplicer, TerrainTarget};
    pub use crate::craters::CraterParams;
    pub use crate::error::{Error, Result};
    pub use crate::sampling::{
        derive_metric, sample_position, sample_range, CraterArea, MetricKind, MetricSpec,
        SampleRange,
    };
    pub use crate::scene::{
        MemoryScene, NodeHandle, SceneError, SceneErrorKind, SceneGraph, SceneResult,
    };
}
