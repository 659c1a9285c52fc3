//! High-level runner for applying a crater configuration to a scene.
//!
//! An apply runs strictly in sequence: locate the terrain target (reads only), build the plan,
//! append splice operations, then execute every operation in order. The first failing scene
//! call abandons the rest of the plan; nodes created before it stay in the scene.
use std::collections::HashMap;

use rand::Rng as RngCore;
use tracing::{debug, info, warn};

use crate::config::{Configuration, InsertionMode};
use crate::craters::events::{ApplyEvent, ApplyEventKind, EventSink};
use crate::craters::plan::{
    ChainState, CraterPlan, CraterPlanBuilder, NodeRef, NodeRole, NodeSlot, Operation, ParamValue,
};
use crate::craters::splice::{locate_target, PipelineSplicer, TerrainTarget};
use crate::craters::CraterParams;
use crate::error::{Error, Result};
use crate::scene::classes::{crater, group};
use crate::scene::{NodeHandle, SceneGraph};

/// A node created during an apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNode {
    pub role: NodeRole,
    pub class: &'static str,
    pub handle: NodeHandle,
}

/// Result of a completed apply.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Generated crater parameters, in creation order.
    pub craters: Vec<CraterParams>,
    /// Nodes created, in creation order.
    pub created: Vec<CreatedNode>,
    /// Path of the last chained node.
    pub final_head: Option<String>,
    /// Terrain target captured before the apply, if one was looked up and found.
    pub target: Option<TerrainTarget>,
    /// Whether the chain was attached to the target.
    pub spliced: bool,
    /// Number of operations executed.
    pub operations_executed: usize,
}

impl ApplyReport {
    /// Handles of the created crater nodes, in order.
    pub fn crater_nodes(&self) -> impl Iterator<Item = &NodeHandle> {
        self.created
            .iter()
            .filter(|n| matches!(n.role, NodeRole::Crater(_)))
            .map(|n| &n.handle)
    }

    /// First created node with `role`.
    pub fn node(&self, role: NodeRole) -> Option<&NodeHandle> {
        self.created
            .iter()
            .find(|n| n.role == role)
            .map(|n| &n.handle)
    }
}

/// Handles produced by executing a plan.
#[derive(Debug, Clone, Default)]
pub struct Execution {
    handles: Vec<Option<NodeHandle>>,
    created: Vec<CreatedNode>,
    written: HashMap<(NodeSlot, &'static str), String>,
    executed: usize,
}

impl Execution {
    pub fn handle(&self, slot: NodeSlot) -> Option<&NodeHandle> {
        self.handles.get(slot.0).and_then(Option::as_ref)
    }

    pub fn created(&self) -> &[CreatedNode] {
        &self.created
    }

    pub fn operations_executed(&self) -> usize {
        self.executed
    }

    /// Last value written to `param` on the node in `slot`, as sent to the scene.
    pub fn written(&self, slot: NodeSlot, param: &'static str) -> Option<&str> {
        self.written.get(&(slot, param)).map(String::as_str)
    }

    /// Concrete path of a chain head after execution.
    pub fn head_path(&self, chain: &ChainState) -> Option<String> {
        match chain.head()? {
            ParamValue::Literal(path) => Some(path.clone()),
            ParamValue::PathOf(slot) => self.handle(*slot).map(|h| h.path().to_owned()),
            ParamValue::NameOf(slot) => self.handle(*slot).map(|h| h.name().to_owned()),
            ParamValue::ParamOf(..) => None,
        }
    }
}

/// Applies one configuration to a scene.
pub struct CraterSplatter<'a, S: SceneGraph + ?Sized> {
    /// Configuration applied by this splatter.
    pub config: Configuration,
    /// Scene the craters are created in.
    pub scene: &'a mut S,
}

impl<'a, S: SceneGraph + ?Sized> CraterSplatter<'a, S> {
    pub fn try_new(config: Configuration, scene: &'a mut S) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, scene })
    }

    /// Runs one apply, returning the report.
    pub fn apply(&mut self, rng: &mut impl RngCore) -> Result<ApplyReport> {
        apply(&self.config, &mut *self.scene, rng, None)
    }

    pub fn apply_with_events(
        &mut self,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<ApplyReport> {
        apply_with_events(&self.config, &mut *self.scene, rng, sink)
    }
}

pub fn apply<S: SceneGraph + ?Sized, R: RngCore>(
    config: &Configuration,
    scene: &mut S,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> Result<ApplyReport> {
    if let Some(s) = sink {
        apply_with_events(config, scene, rng, s)
    } else {
        apply_with_events(config, scene, rng, &mut ())
    }
}

pub fn apply_with_events<S: SceneGraph + ?Sized, R: RngCore>(
    config: &Configuration,
    scene: &mut S,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<ApplyReport> {
    config.validate()?;
    if sink.wants(ApplyEventKind::ApplyStarted) {
        sink.send(ApplyEvent::ApplyStarted {
            crater_count: config.crater_count,
            insertion: config.insertion,
        });
    }

    let splicer = PipelineSplicer::new(config.insertion);
    let target = if splicer.needs_target() {
        locate_target(scene, &config.target)?
    } else {
        None
    };
    match &target {
        Some(t) => {
            info!(
                "Terrain target '{}' (main input '{}').",
                t.path, t.previous_input
            );
            if sink.wants(ApplyEventKind::TargetLocated) {
                sink.send(ApplyEvent::TargetLocated { target: t.clone() });
            }
        }
        None if splicer.needs_target() => {
            warn!("No terrain computation node found; craters will not be connected.");
            if sink.wants(ApplyEventKind::Warning) {
                sink.send(ApplyEvent::Warning {
                    context: "splice".into(),
                    message: "No terrain computation node found; skipping splice".into(),
                });
            }
        }
        None => {}
    }

    let chain = splicer.initial_chain(target.as_ref());
    let mut plan = CraterPlanBuilder::new(config).build(chain, rng)?;
    let spliced = splicer.splice(&mut plan, target.as_ref());
    if sink.wants(ApplyEventKind::PlanBuilt) {
        sink.send(ApplyEvent::PlanBuilt {
            operations: plan.operations().len(),
            craters: plan.craters().len(),
        });
    }

    let execution = execute_plan(&plan, scene, sink)?;
    let final_head = execution.head_path(plan.chain());

    if spliced && sink.wants(ApplyEventKind::Spliced) {
        if let Some(t) = &target {
            let input = match config.insertion {
                InsertionMode::MergeWithExisting => execution
                    .created()
                    .iter()
                    .find(|n| n.role == NodeRole::Merge)
                    .map(|n| n.handle.path().to_owned()),
                _ => final_head.clone(),
            };
            sink.send(ApplyEvent::Spliced {
                mode: config.insertion,
                target_path: t.path.clone(),
                input: input.unwrap_or_default(),
            });
        }
    }

    let mut craters = plan.craters().to_vec();
    for (slot, _, role) in plan.creations() {
        let NodeRole::Crater(index) = role else {
            continue;
        };
        if let Some(c) = craters.get_mut(index) {
            c.group_name = execution
                .written(slot, crater::GUI_GROUP)
                .unwrap_or_default()
                .to_owned();
            c.rim_shader_name = execution
                .written(slot, crater::RIM_SHADER)
                .unwrap_or_default()
                .to_owned();
        }
    }

    let report = ApplyReport {
        craters,
        operations_executed: execution.operations_executed(),
        created: execution.created,
        final_head,
        target,
        spliced,
    };
    info!(
        "Applied {} craters ({} nodes, {} operations).",
        report.craters.len(),
        report.created.len(),
        report.operations_executed
    );
    if sink.wants(ApplyEventKind::ApplyFinished) {
        sink.send(ApplyEvent::ApplyFinished {
            report: report.clone(),
        });
    }
    Ok(report)
}

/// Execute `plan` against `scene` in order.
///
/// Stops at the first failing scene call with [`Error::Aborted`].
pub fn execute_plan<S: SceneGraph + ?Sized>(
    plan: &CraterPlan,
    scene: &mut S,
    sink: &mut dyn EventSink,
) -> Result<Execution> {
    let total = plan.operations().len();
    let mut exec = Executor {
        scene,
        root: None,
        handles: vec![None; plan.slot_count()],
        paths: HashMap::new(),
        reads: HashMap::new(),
        written: HashMap::new(),
        created: Vec::new(),
    };

    for (step, op) in plan.operations().iter().enumerate() {
        match exec.run(step, op, sink) {
            Ok(()) => {}
            Err(Error::Scene(source)) => {
                warn!("Apply aborted at step {step} of {total}: {source}.");
                if sink.wants(ApplyEventKind::Aborted) {
                    sink.send(ApplyEvent::Aborted {
                        step,
                        error: source.clone(),
                    });
                }
                return Err(Error::Aborted {
                    step,
                    total,
                    source,
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Execution {
        handles: exec.handles,
        created: exec.created,
        written: exec.written,
        executed: total,
    })
}

struct Executor<'s, S: SceneGraph + ?Sized> {
    scene: &'s mut S,
    root: Option<NodeHandle>,
    handles: Vec<Option<NodeHandle>>,
    paths: HashMap<String, NodeHandle>,
    reads: HashMap<(NodeSlot, &'static str), String>,
    written: HashMap<(NodeSlot, &'static str), String>,
    created: Vec<CreatedNode>,
}

impl<S: SceneGraph + ?Sized> Executor<'_, S> {
    fn run(&mut self, step: usize, op: &Operation, sink: &mut dyn EventSink) -> Result<()> {
        match op {
            Operation::Create { slot, class, role } => {
                let root = match &self.root {
                    Some(root) => root.clone(),
                    None => {
                        let root = self.scene.root()?;
                        self.root = Some(root.clone());
                        root
                    }
                };
                let handle = self.scene.create_child(&root, class)?;
                debug!("Step {step}: created '{}' as {:?}.", handle.path(), role);
                let entry = self.handles.get_mut(slot.0).ok_or_else(|| {
                    Error::InvalidPlan(format!("slot {} out of range", slot.0))
                })?;
                *entry = Some(handle.clone());
                if sink.wants(ApplyEventKind::NodeCreated) {
                    sink.send(ApplyEvent::NodeCreated {
                        step,
                        role: *role,
                        handle: handle.clone(),
                    });
                }
                self.created.push(CreatedNode {
                    role: *role,
                    class: *class,
                    handle,
                });
            }
            Operation::SetParam { node, param, value } => {
                let target = self.resolve_node(node)?;
                let text = self.resolve_value(value)?;
                self.scene.set_param(&target, param, &text)?;
                debug!("Step {step}: {}.{} = '{}'.", target.path(), param, text);
                if sink.wants(ApplyEventKind::ParamSet) {
                    sink.send(ApplyEvent::ParamSet {
                        step,
                        path: target.path().to_owned(),
                        param: *param,
                        value: text.clone(),
                    });
                }
                if let NodeRef::Slot(slot) = node {
                    self.reads.remove(&(*slot, *param));
                    self.written.insert((*slot, *param), text);
                    if *param == group::NAME {
                        self.refresh_renamed(*slot)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Re-resolve a node after its name was set. The host may settle on another name (and
    /// path) than the one requested.
    fn refresh_renamed(&mut self, slot: NodeSlot) -> Result<()> {
        let stale = self.slot(slot)?.clone();
        let name = self.scene.get_param(&stale, group::NAME)?;
        self.reads.insert((slot, group::NAME), name.clone());

        let parent = self.root.as_ref().map_or("/", NodeHandle::path);
        let path = child_path(parent, &name);
        if path == stale.path() && name == stale.name() {
            return Ok(());
        }
        let fresh = self.scene.node_by_path(&path)?;
        debug!("'{}' is now '{}'.", stale.path(), fresh.path());

        if let Some(created) = self.created.iter_mut().find(|c| c.handle == stale) {
            created.handle = fresh.clone();
        }
        if let Some(entry) = self.handles.get_mut(slot.0) {
            *entry = Some(fresh);
        }
        Ok(())
    }

    fn slot(&self, slot: NodeSlot) -> Result<&NodeHandle> {
        self.handles
            .get(slot.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::InvalidPlan(format!("slot {} used before creation", slot.0)))
    }

    fn resolve_node(&mut self, node: &NodeRef) -> Result<NodeHandle> {
        match node {
            NodeRef::Slot(slot) => self.slot(*slot).cloned(),
            NodeRef::Path(path) => {
                if let Some(handle) = self.paths.get(path) {
                    return Ok(handle.clone());
                }
                let handle = self.scene.node_by_path(path)?;
                self.paths.insert(path.clone(), handle.clone());
                Ok(handle)
            }
        }
    }

    fn resolve_value(&mut self, value: &ParamValue) -> Result<String> {
        match value {
            ParamValue::Literal(text) => Ok(text.clone()),
            ParamValue::PathOf(slot) => Ok(self.slot(*slot)?.path().to_owned()),
            ParamValue::NameOf(slot) => Ok(self.slot(*slot)?.name().to_owned()),
            ParamValue::ParamOf(slot, param) => {
                if let Some(cached) = self.reads.get(&(*slot, *param)) {
                    return Ok(cached.clone());
                }
                let handle = self.slot(*slot)?.clone();
                let text = self.scene.get_param(&handle, param)?;
                self.reads.insert((*slot, *param), text.clone());
                Ok(text)
            }
        }
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::{GroupSpec, RimShaderClass, RimShaderSpec, TargetSelection, WarpSpec};
    use crate::craters::events::VecSink;
    use crate::sampling::{MetricSpec, SampleRange};
    use crate::scene::classes::{self, crater, fake_stones, fractal_warp, merge, INPUT_NODE};
    use crate::scene::{MemoryScene, SceneError, SceneErrorKind};

    fn fixed_config(count: usize, insertion: InsertionMode) -> Configuration {
        Configuration::new(count)
            .with_diameter(SampleRange::fixed(500.0))
            .with_depth(MetricSpec::range(50.0, 50.0))
            .with_rim_height(MetricSpec::range(5.0, 5.0))
            .with_rim_skirt(MetricSpec::range(500.0, 500.0))
            .with_softness(SampleRange::fixed(0.0))
            .with_tightness(SampleRange::fixed(0.0))
            .with_insertion(insertion)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2025)
    }

    fn crater_paths(scene: &MemoryScene) -> Vec<String> {
        scene
            .nodes_of_class(classes::CRATER_SHADER)
            .map(|n| n.path().to_owned())
            .collect()
    }

    #[test]
    fn skip_builds_three_identical_chained_craters() {
        let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
        let config = fixed_config(3, InsertionMode::Skip);
        let report = apply(&config, &mut scene, &mut rng(), None).unwrap();

        let paths = crater_paths(&scene);
        assert_eq!(paths.len(), 3);
        for (k, path) in paths.iter().enumerate() {
            let node = scene.node(path).unwrap();
            assert_eq!(node.param(crater::DIAMETER), Some("500.0"));
            assert_eq!(node.param(crater::DEPTH), Some("50.0"));
            assert_eq!(node.param(crater::RIM_HEIGHT), Some("5.0"));
            assert_eq!(node.param(crater::RIM_SKIRT), Some("500.0"));
            let input = node.param(INPUT_NODE);
            if k == 0 {
                assert_eq!(input, None);
            } else {
                assert_eq!(input, Some(paths[k - 1].as_str()));
            }
        }
        assert_eq!(
            scene.param("/Compute Terrain", INPUT_NODE),
            Some("/Null 01")
        );
        assert!(!report.spliced);
        assert_eq!(report.target, None);
        assert_eq!(report.final_head.as_deref(), Some(paths[2].as_str()));
        assert_eq!(report.crater_nodes().count(), 3);
    }

    #[test]
    fn replace_discards_previous_input() {
        let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
        let config = fixed_config(3, InsertionMode::ReplaceMainInput);
        let report = apply(&config, &mut scene, &mut rng(), None).unwrap();

        let paths = crater_paths(&scene);
        assert_eq!(
            scene.param("/Compute Terrain", INPUT_NODE),
            Some(paths[2].as_str())
        );
        assert!(!scene
            .nodes()
            .flat_map(|n| n.params())
            .any(|(_, v)| v == "/Null 01"));
        assert!(report.spliced);
        assert_eq!(
            report.target.as_ref().map(|t| t.previous_input.as_str()),
            Some("/Null 01")
        );
    }

    #[test]
    fn merge_blends_captured_input_with_chain() {
        let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
        let config = fixed_config(2, InsertionMode::MergeWithExisting);
        let report = apply(&config, &mut scene, &mut rng(), None).unwrap();

        let merge_node = report.node(NodeRole::Merge).unwrap().clone();
        let paths = crater_paths(&scene);
        let m = scene.node(merge_node.path()).unwrap();
        assert_eq!(m.class(), classes::MERGE_SHADER);
        assert_eq!(m.param(INPUT_NODE), Some("/Null 01"));
        assert_eq!(m.param(merge::SHADER_A), Some(paths[1].as_str()));
        assert_eq!(m.param(merge::MIX_TO_A), Some("1"));
        assert_eq!(m.param(merge::DISPLACE_MERGE_MODE), Some("1"));
        assert_eq!(
            scene.param("/Compute Terrain", INPUT_NODE),
            Some(merge_node.path())
        );
    }

    #[test]
    fn inline_threads_previous_input_through_chain() {
        let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
        let config = fixed_config(2, InsertionMode::InsertInline).with_warp(WarpSpec::Enabled);
        let report = apply(&config, &mut scene, &mut rng(), None).unwrap();

        let paths = crater_paths(&scene);
        assert_eq!(scene.param(&paths[0], INPUT_NODE), Some("/Null 01"));
        let warp = report.node(NodeRole::Warp).unwrap();
        assert_eq!(scene.param(warp.path(), INPUT_NODE), Some(paths[1].as_str()));
        assert_eq!(scene.param(warp.path(), fractal_warp::SCALE), Some("125.0"));
        assert_eq!(
            scene.param("/Compute Terrain", INPUT_NODE),
            Some(warp.path())
        );
    }

    #[test]
    fn side_nodes_resolve_host_assigned_names() {
        let mut scene = MemoryScene::new().with_compute_terrain("");
        scene.add_named_node(classes::GROUP, "Craters");
        let config = fixed_config(2, InsertionMode::ReplaceMainInput)
            .with_group(GroupSpec::Named("Craters".into()))
            .with_rim_shader(RimShaderSpec::Shader(RimShaderClass::FakeStones));
        apply(&config, &mut scene, &mut rng(), None).unwrap();

        for path in crater_paths(&scene) {
            assert_eq!(scene.param(&path, crater::GUI_GROUP), Some("Craters 01"));
            assert_eq!(
                scene.param(&path, crater::RIM_SHADER),
                Some("Fake stones shader 01")
            );
        }
        assert_eq!(
            scene.param("/Fake stones shader 01", fake_stones::STONE_SCALE),
            Some("5.0")
        );
    }

    #[test]
    fn renamed_group_handle_resolves_after_apply() {
        let mut scene = MemoryScene::new();
        let config = fixed_config(1, InsertionMode::Skip)
            .with_group(GroupSpec::Named("Craters".into()));
        let report = apply(&config, &mut scene, &mut rng(), None).unwrap();

        let group = report.node(NodeRole::Group).unwrap();
        assert_eq!(group.path(), "/Craters");
        assert_eq!(group.name(), "Craters");
        assert_eq!(scene.node_by_path(group.path()).unwrap(), *group);
        assert_eq!(report.craters[0].group_name, "Craters");
    }

    #[test]
    fn colliding_group_name_is_reported_as_settled() {
        let mut scene = MemoryScene::new();
        scene.add_named_node(classes::GROUP, "Craters");
        let config = fixed_config(2, InsertionMode::Skip)
            .with_group(GroupSpec::Named("Craters".into()))
            .with_rim_shader(RimShaderSpec::Shader(RimShaderClass::ImageMap));
        let report = apply(&config, &mut scene, &mut rng(), None).unwrap();

        let group = report.node(NodeRole::Group).unwrap().clone();
        assert_eq!(group.path(), "/Craters 01");
        assert!(scene.node_by_path(group.path()).is_ok());
        for c in &report.craters {
            assert_eq!(c.group_name, "Craters 01");
            assert_eq!(c.rim_shader_name, "Image map shader 01");
        }
    }

    #[test]
    fn crater_entries_have_empty_names_without_side_nodes() {
        let mut scene = MemoryScene::new();
        let report = apply(
            &fixed_config(2, InsertionMode::Skip),
            &mut scene,
            &mut rng(),
            None,
        )
        .unwrap();
        assert!(report
            .craters
            .iter()
            .all(|c| c.group_name.is_empty() && c.rim_shader_name.is_empty()));
    }

    #[test]
    fn explicit_target_path_is_honored() {
        let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
        let second = scene.add_node(classes::COMPUTE_TERRAIN);
        let config = fixed_config(1, InsertionMode::ReplaceMainInput)
            .with_target(TargetSelection::Path(second.path().to_owned()));
        let report = apply(&config, &mut scene, &mut rng(), None).unwrap();

        let paths = crater_paths(&scene);
        assert_eq!(scene.param(second.path(), INPUT_NODE), Some(paths[0].as_str()));
        assert_eq!(
            scene.param("/Compute Terrain", INPUT_NODE),
            Some("/Null 01")
        );
        assert_eq!(report.target.unwrap().path, second.path());
    }

    #[test]
    fn missing_terrain_warns_and_still_builds_chain() {
        let mut scene = MemoryScene::new();
        let mut sink = VecSink::new();
        let config = fixed_config(2, InsertionMode::MergeWithExisting);
        let report = apply_with_events(&config, &mut scene, &mut rng(), &mut sink).unwrap();

        assert!(!report.spliced);
        assert_eq!(crater_paths(&scene).len(), 2);
        assert_eq!(scene.nodes_of_class(classes::MERGE_SHADER).count(), 0);
        assert_eq!(sink.count(ApplyEventKind::Warning), 1);
        assert_eq!(sink.count(ApplyEventKind::Spliced), 0);
    }

    #[test]
    fn scene_failure_aborts_remaining_plan() {
        // call 0 root, 1 create crater 1, 2..=10 its params, 11 create crater 2
        let mut scene =
            MemoryScene::new().fail_on_call(11, SceneError::Connection("refused".into()));
        let mut sink = VecSink::only(&[ApplyEventKind::Aborted, ApplyEventKind::NodeCreated]);
        let config = fixed_config(3, InsertionMode::Skip);
        let err = apply_with_events(&config, &mut scene, &mut rng(), &mut sink).unwrap_err();

        match &err {
            Error::Aborted { step, total, source } => {
                assert_eq!(*step, 10);
                assert_eq!(*total, 32);
                assert_eq!(source.kind(), SceneErrorKind::Connection);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(crater_paths(&scene).len(), 1);
        assert_eq!(sink.count(ApplyEventKind::NodeCreated), 1);
        assert_eq!(sink.count(ApplyEventKind::Aborted), 1);
    }

    #[test]
    fn target_lookup_failure_creates_nothing() {
        let mut scene = MemoryScene::new()
            .with_compute_terrain("/Null 01")
            .fail_on_call(2, SceneError::Timeout("slow".into()));
        let config = fixed_config(2, InsertionMode::ReplaceMainInput);
        let err = apply(&config, &mut scene, &mut rng(), None).unwrap_err();
        assert!(matches!(err, Error::Scene(SceneError::Timeout(_))));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn events_frame_the_apply() {
        let mut scene = MemoryScene::new().with_compute_terrain("/Null 01");
        let mut sink = VecSink::new();
        let config = fixed_config(2, InsertionMode::ReplaceMainInput);
        let report = apply_with_events(&config, &mut scene, &mut rng(), &mut sink).unwrap();

        let events = sink.as_slice();
        assert_eq!(events.first().unwrap().kind(), ApplyEventKind::ApplyStarted);
        assert_eq!(events.last().unwrap().kind(), ApplyEventKind::ApplyFinished);
        assert_eq!(sink.count(ApplyEventKind::TargetLocated), 1);
        assert_eq!(sink.count(ApplyEventKind::NodeCreated), 2);
        assert_eq!(
            sink.count(ApplyEventKind::ParamSet),
            report.operations_executed - 2
        );
        let spliced = events
            .iter()
            .find_map(|e| match e {
                ApplyEvent::Spliced { input, .. } => Some(input.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(Some(spliced), report.final_head);
    }

    #[test]
    fn splatter_validates_on_construction() {
        let mut scene = MemoryScene::new();
        assert!(CraterSplatter::try_new(Configuration::new(0), &mut scene).is_err());

        let mut splatter =
            CraterSplatter::try_new(fixed_config(4, InsertionMode::Skip), &mut scene).unwrap();
        let report = splatter.apply(&mut rng()).unwrap();
        assert_eq!(report.craters.len(), 4);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn same_seed_reproduces_scene() {
        let config = Configuration::new(6);
        let mut a = MemoryScene::new().with_compute_terrain("");
        let mut b = MemoryScene::new().with_compute_terrain("");
        let ra = apply(&config, &mut a, &mut rng(), None).unwrap();
        let rb = apply(&config, &mut b, &mut rng(), None).unwrap();
        assert_eq!(ra.craters, rb.craters);
        for (na, nb) in a.nodes().zip(b.nodes()) {
            assert_eq!(na.params().collect::<Vec<_>>(), nb.params().collect::<Vec<_>>());
        }
    }
}
