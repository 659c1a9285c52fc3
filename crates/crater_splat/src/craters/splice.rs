//! Attaching the crater chain to the scene's terrain computation.
//!
//! The target terrain node and its current main input are captured before anything in the
//! scene is modified; [`PipelineSplicer`] then appends the operations that connect the
//! finished chain according to the configured [`InsertionMode`].
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{InsertionMode, TargetSelection};
use crate::craters::plan::{ChainState, CraterPlan, NodeRef, NodeRole, ParamValue};
use crate::scene::classes::{self, merge, INPUT_NODE};
use crate::scene::{SceneGraph, SceneResult};

/// A terrain-computation node and its main input as captured before the apply.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainTarget {
    pub path: String,
    pub previous_input: String,
}

/// Find the terrain-computation node named by `selection` and read its main input.
///
/// Returns `Ok(None)` when [`TargetSelection::FirstFound`] finds no candidate.
pub fn locate_target<S: SceneGraph + ?Sized>(
    scene: &mut S,
    selection: &TargetSelection,
) -> SceneResult<Option<TerrainTarget>> {
    let node = match selection {
        TargetSelection::FirstFound => {
            let root = scene.root()?;
            let candidates = scene.children_filtered_by_class(&root, classes::COMPUTE_TERRAIN)?;
            if candidates.len() > 1 {
                debug!(
                    "{} terrain nodes found; using '{}'.",
                    candidates.len(),
                    candidates[0].path()
                );
            }
            match candidates.into_iter().next() {
                Some(node) => node,
                None => return Ok(None),
            }
        }
        TargetSelection::Path(path) => scene.node_by_path(path)?,
    };
    let previous_input = scene.get_param(&node, INPUT_NODE)?;
    Ok(Some(TerrainTarget {
        path: node.path().to_owned(),
        previous_input,
    }))
}

/// Connects a built chain to a terrain target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineSplicer {
    mode: InsertionMode,
}

impl PipelineSplicer {
    pub fn new(mode: InsertionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> InsertionMode {
        self.mode
    }

    /// Whether a terrain target must be located before planning.
    pub fn needs_target(&self) -> bool {
        self.mode != InsertionMode::Skip
    }

    /// Chain state the crater plan starts from.
    ///
    /// Only [`InsertionMode::InsertInline`] seeds the chain with the target's old input.
    pub fn initial_chain(&self, target: Option<&TerrainTarget>) -> ChainState {
        match (self.mode, target) {
            (InsertionMode::InsertInline, Some(t)) => ChainState::seeded(t.previous_input.clone()),
            _ => ChainState::empty(),
        }
    }

    /// Append the splice operations to `plan`. Returns whether anything was appended.
    pub fn splice(&self, plan: &mut CraterPlan, target: Option<&TerrainTarget>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let head = plan
            .chain()
            .head()
            .cloned()
            .unwrap_or_else(|| ParamValue::literal(""));
        let terrain = NodeRef::Path(target.path.clone());

        match self.mode {
            InsertionMode::Skip => return false,
            InsertionMode::ReplaceMainInput | InsertionMode::InsertInline => {
                plan.set(terrain, INPUT_NODE, head);
            }
            InsertionMode::MergeWithExisting => {
                let slot = plan.create(classes::MERGE_SHADER, NodeRole::Merge);
                let merge_node = NodeRef::Slot(slot);
                plan.set(
                    merge_node.clone(),
                    INPUT_NODE,
                    ParamValue::literal(target.previous_input.clone()),
                );
                plan.set(merge_node.clone(), merge::SHADER_A, head);
                for param in [
                    merge::MIX_TO_A,
                    merge::MERGE_COLOUR,
                    merge::COLOUR_MERGE_MODE,
                    merge::MERGE_DISPLACEMENT,
                    merge::DISPLACE_MERGE_MODE,
                ] {
                    plan.set(merge_node.clone(), param, ParamValue::literal(classes::ON));
                }
                plan.set(terrain, INPUT_NODE, ParamValue::PathOf(slot));
            }
        }
        info!("Splicing into '{}' ({}).", target.path, self.mode);
        true
    }
}
