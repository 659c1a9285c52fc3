//! Crater chain planning.
//!
//! A [`CraterPlan`] is an ordered list of [`Operation`]s that, executed in order, builds the
//! crater network in a scene. Nodes created by the plan are referred to by plan-local
//! [`NodeSlot`]s; paths and names the host assigns are only known at execution time, so
//! parameter values may refer to them symbolically through [`ParamValue`].
//!
//! Construction follows a fixed sequence:
//! base shape, group, rim shader, craters 1..N, warp. Chained nodes consume the current
//! [`ChainState`] head as their main input and become the new head; the group and rim shader
//! are side nodes and leave the head untouched.
use rand::Rng as RngCore;
use tracing::{debug, info};

use crate::config::{BaseShapeSpec, Configuration, GroupSpec, RimShaderClass, RimShaderSpec, WarpSpec};
use crate::craters::{format_number, format_vec3, CraterParams};
use crate::error::Result;
use crate::sampling::percent_of_diameter;
use crate::scene::classes::{
    self, crater, fake_stones, fractal_warp, group, simple_shape, INPUT_NODE,
};

/// Fraction of the last crater diameter used as the fractal warp scale.
pub const WARP_SCALE_FACTOR: f64 = 0.25;
/// Fraction of the maximum diameter used as the fake stones scale.
pub const STONE_SCALE_PERCENT: f64 = 0.01;

/// Plan-local identifier of a node the plan creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeSlot(pub usize);

/// What a created node is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    BaseShape,
    Group,
    RimShader,
    /// Zero-based crater index.
    Crater(usize),
    Warp,
    Merge,
}

/// Target of a parameter assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRef {
    /// A node created earlier in the same plan.
    Slot(NodeSlot),
    /// A pre-existing node resolved by path.
    Path(String),
}

/// Value of a parameter assignment, resolved at execution time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    Literal(String),
    /// Path of a created node.
    PathOf(NodeSlot),
    /// Display name of a created node.
    NameOf(NodeSlot),
    /// Current value of a parameter on a created node, read back from the host.
    ParamOf(NodeSlot, &'static str),
}

impl ParamValue {
    pub fn literal(value: impl Into<String>) -> Self {
        ParamValue::Literal(value.into())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Create {
        slot: NodeSlot,
        class: &'static str,
        role: NodeRole,
    },
    SetParam {
        node: NodeRef,
        param: &'static str,
        value: ParamValue,
    },
}

impl Operation {
    pub fn is_create(&self) -> bool {
        matches!(self, Operation::Create { .. })
    }
}

/// The chain head threaded through construction.
///
/// Empty until the first chained node is created, unless seeded with an existing path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainState {
    head: Option<ParamValue>,
}

impl ChainState {
    pub fn empty() -> Self {
        Self { head: None }
    }

    /// Start the chain from an existing node path. An empty path gives an empty chain.
    pub fn seeded(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            Self::empty()
        } else {
            Self {
                head: Some(ParamValue::Literal(path)),
            }
        }
    }

    pub fn head(&self) -> Option<&ParamValue> {
        self.head.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The chain after `slot` has consumed the current head.
    #[must_use]
    pub fn advance(self, slot: NodeSlot) -> ChainState {
        ChainState {
            head: Some(ParamValue::PathOf(slot)),
        }
    }
}

/// Ordered operations plus the crater parameters they encode.
#[derive(Clone, Debug, Default)]
pub struct CraterPlan {
    operations: Vec<Operation>,
    craters: Vec<CraterParams>,
    chain: ChainState,
    slot_count: usize,
}

impl CraterPlan {
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn craters(&self) -> &[CraterParams] {
        &self.craters
    }

    /// Chain state after the last chained node.
    pub fn chain(&self) -> &ChainState {
        &self.chain
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Node creations in order.
    pub fn creations(&self) -> impl Iterator<Item = (NodeSlot, &'static str, NodeRole)> + '_ {
        self.operations.iter().filter_map(|op| match op {
            Operation::Create { slot, class, role } => Some((*slot, *class, *role)),
            Operation::SetParam { .. } => None,
        })
    }

    /// Assignments made to `slot`, in order.
    pub fn params_of(&self, slot: NodeSlot) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.operations.iter().filter_map(move |op| match op {
            Operation::SetParam {
                node: NodeRef::Slot(s),
                param,
                value,
            } if *s == slot => Some((*param, value)),
            _ => None,
        })
    }

    /// Last value assigned to `param` on `slot`.
    pub fn param_of(&self, slot: NodeSlot, param: &str) -> Option<&ParamValue> {
        self.params_of(slot)
            .filter(|(p, _)| *p == param)
            .map(|(_, v)| v)
            .last()
    }

    pub(crate) fn create(&mut self, class: &'static str, role: NodeRole) -> NodeSlot {
        let slot = NodeSlot(self.slot_count);
        self.slot_count += 1;
        self.operations.push(Operation::Create { slot, class, role });
        slot
    }

    pub(crate) fn set(&mut self, node: NodeRef, param: &'static str, value: ParamValue) {
        self.operations
            .push(Operation::SetParam { node, param, value });
    }
}

/// Builds a [`CraterPlan`] from a [`Configuration`].
pub struct CraterPlanBuilder<'a> {
    config: &'a Configuration,
    plan: CraterPlan,
}

impl<'a> CraterPlanBuilder<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            plan: CraterPlan::default(),
        }
    }

    /// Build the plan starting from `chain`. Crater parameters are drawn from `rng` in crater
    /// order.
    pub fn build(mut self, chain: ChainState, rng: &mut dyn RngCore) -> Result<CraterPlan> {
        self.config.validate()?;

        let mut chain = self.add_base_shape(chain);
        let group_name = self.add_group();
        let rim_shader_name = self.add_rim_shader();

        let mut last_diameter = 0.0;
        for index in 0..self.config.crater_count {
            let params = CraterParams::sample(self.config, rng);
            chain = self.add_crater(chain, index, &params, &group_name, &rim_shader_name);
            last_diameter = params.diameter;
            self.plan.craters.push(params);
        }

        let chain = self.add_warp(chain, last_diameter);
        self.plan.chain = chain;

        info!(
            "Planned {} craters in {} operations.",
            self.plan.craters.len(),
            self.plan.operations.len()
        );
        Ok(self.plan)
    }

    fn set(&mut self, slot: NodeSlot, param: &'static str, value: ParamValue) {
        self.plan.set(NodeRef::Slot(slot), param, value);
    }

    fn set_text(&mut self, slot: NodeSlot, param: &'static str, value: impl Into<String>) {
        self.set(slot, param, ParamValue::Literal(value.into()));
    }

    fn connect(&mut self, slot: NodeSlot, chain: &ChainState) {
        if let Some(head) = chain.head() {
            self.set(slot, INPUT_NODE, head.clone());
        }
    }

    fn add_base_shape(&mut self, chain: ChainState) -> ChainState {
        let BaseShapeSpec::MountainOrValley { amplitude } = self.config.base_shape else {
            return chain;
        };
        let area = &self.config.area;
        let position = glam::DVec3::new(
            area.x.center.unwrap_or(0.0),
            0.0,
            area.z.center.unwrap_or(0.0),
        );
        let widest = area
            .x
            .extent
            .unwrap_or(0.0)
            .max(area.z.extent.unwrap_or(0.0));
        let size = format_number(widest + self.config.diameter.max.unwrap_or(1.0));

        let slot = self.plan.create(classes::SIMPLE_SHAPE_SHADER, NodeRole::BaseShape);
        self.set_text(slot, simple_shape::POSITION, format_vec3(position));
        self.set_text(slot, simple_shape::TYPE_OF_SHAPE, simple_shape::SHAPE_CIRCLE);
        self.set_text(slot, simple_shape::SIZE, format!("{size} {size}"));
        self.set_text(
            slot,
            simple_shape::DISPLACEMENT_AMPLITUDE,
            format_number(amplitude),
        );
        self.set_text(
            slot,
            simple_shape::DISPLACEMENT_EDGE_PROFILE,
            simple_shape::EDGE_PROFILE_SMOOTH,
        );
        self.set_text(
            slot,
            simple_shape::DISPLACEMENT_EDGE_WIDTH,
            simple_shape::EDGE_WIDTH_MAX,
        );
        self.set_text(
            slot,
            simple_shape::DISPLACEMENT_EDGE_UNITS,
            simple_shape::EDGE_UNITS_PERCENT,
        );
        self.connect(slot, &chain);
        self.set_text(slot, simple_shape::APPLY_DISPLACEMENT, classes::ON);
        debug!("Base shape amplitude {amplitude}.");
        chain.advance(slot)
    }

    /// Group node; craters reference the name the host settles on.
    fn add_group(&mut self) -> ParamValue {
        let GroupSpec::Named(name) = &self.config.group else {
            return ParamValue::literal("");
        };
        let name = name.clone();
        let slot = self.plan.create(classes::GROUP, NodeRole::Group);
        self.set_text(slot, group::NAME, name);
        ParamValue::ParamOf(slot, group::NAME)
    }

    fn add_rim_shader(&mut self) -> ParamValue {
        let RimShaderSpec::Shader(class) = self.config.rim_shader else {
            return ParamValue::literal("");
        };
        let slot = self.plan.create(class.class_name(), NodeRole::RimShader);
        if class == RimShaderClass::FakeStones {
            let scale = percent_of_diameter(self.config.diameter.max, Some(STONE_SCALE_PERCENT));
            self.set_text(slot, fake_stones::STONE_SCALE, format_number(scale));
        }
        ParamValue::NameOf(slot)
    }

    fn add_crater(
        &mut self,
        chain: ChainState,
        index: usize,
        params: &CraterParams,
        group_name: &ParamValue,
        rim_shader_name: &ParamValue,
    ) -> ChainState {
        let slot = self.plan.create(classes::CRATER_SHADER, NodeRole::Crater(index));
        self.set_text(slot, crater::CENTER, format_vec3(params.position));
        self.set_text(slot, crater::DIAMETER, format_number(params.diameter));
        self.set_text(slot, crater::DEPTH, format_number(params.depth));
        self.set_text(slot, crater::RIM_HEIGHT, format_number(params.rim_height));
        self.set_text(slot, crater::RIM_SKIRT, format_number(params.rim_skirt));
        self.set_text(slot, crater::RIM_SOFTNESS, format_number(params.softness));
        self.set_text(slot, crater::RIM_TIGHTNESS, format_number(params.tightness));
        self.set(slot, crater::GUI_GROUP, group_name.clone());
        self.set(slot, crater::RIM_SHADER, rim_shader_name.clone());
        self.connect(slot, &chain);
        debug!(
            "Crater {}: diameter {} depth {} at {}.",
            index + 1,
            params.diameter,
            params.depth,
            format_vec3(params.position)
        );
        chain.advance(slot)
    }

    fn add_warp(&mut self, chain: ChainState, last_diameter: f64) -> ChainState {
        if self.config.warp != WarpSpec::Enabled {
            return chain;
        }
        let slot = self.plan.create(classes::FRACTAL_WARP_SHADER, NodeRole::Warp);
        self.connect(slot, &chain);
        self.set_text(
            slot,
            fractal_warp::SCALE,
            format_number(last_diameter * WARP_SCALE_FACTOR),
        );
        chain.advance(slot)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::{MetricSpec, SampleRange};

    fn fixed_config(count: usize) -> Configuration {
        Configuration::new(count)
            .with_diameter(SampleRange::fixed(500.0))
            .with_depth(MetricSpec::range(50.0, 50.0))
            .with_rim_height(MetricSpec::range(5.0, 5.0))
            .with_rim_skirt(MetricSpec::range(500.0, 500.0))
            .with_softness(SampleRange::fixed(0.0))
            .with_tightness(SampleRange::fixed(0.0))
    }

    fn build(config: &Configuration, chain: ChainState) -> CraterPlan {
        let mut rng = StdRng::seed_from_u64(2024);
        CraterPlanBuilder::new(config).build(chain, &mut rng).unwrap()
    }

    #[test]
    fn craters_form_a_linear_chain() {
        let config = fixed_config(5);
        let plan = build(&config, ChainState::empty());

        let creations: Vec<_> = plan.creations().collect();
        assert_eq!(creations.len(), 5);
        for (k, (slot, class, role)) in creations.iter().enumerate() {
            assert_eq!(*class, classes::CRATER_SHADER);
            assert_eq!(*role, NodeRole::Crater(k));
            let input = plan.param_of(*slot, INPUT_NODE);
            if k == 0 {
                assert_eq!(input, None);
            } else {
                assert_eq!(input, Some(&ParamValue::PathOf(creations[k - 1].0)));
            }
        }
        assert_eq!(
            plan.chain().head(),
            Some(&ParamValue::PathOf(creations[4].0))
        );
    }

    #[test]
    fn seeded_chain_feeds_first_node() {
        let config = fixed_config(2);
        let plan = build(&config, ChainState::seeded("/Null 01"));
        let first = plan.creations().next().unwrap().0;
        assert_eq!(
            plan.param_of(first, INPUT_NODE),
            Some(&ParamValue::literal("/Null 01"))
        );
        assert_eq!(ChainState::seeded(""), ChainState::empty());
    }

    #[test]
    fn fixed_ranges_write_exact_values() {
        let config = fixed_config(3);
        let plan = build(&config, ChainState::empty());
        for (slot, _, _) in plan.creations() {
            assert_eq!(
                plan.param_of(slot, crater::DIAMETER),
                Some(&ParamValue::literal("500.0"))
            );
            assert_eq!(
                plan.param_of(slot, crater::DEPTH),
                Some(&ParamValue::literal("50.0"))
            );
            assert_eq!(
                plan.param_of(slot, crater::RIM_HEIGHT),
                Some(&ParamValue::literal("5.0"))
            );
            assert_eq!(
                plan.param_of(slot, crater::RIM_SKIRT),
                Some(&ParamValue::literal("500.0"))
            );
            assert_eq!(
                plan.param_of(slot, crater::GUI_GROUP),
                Some(&ParamValue::literal(""))
            );
        }
        assert_eq!(plan.craters().len(), 3);
    }

    #[test]
    fn full_sequence_orders_nodes_and_threads_head() {
        let config = fixed_config(2)
            .with_base_shape(BaseShapeSpec::MountainOrValley { amplitude: -40.0 })
            .with_group(GroupSpec::Named("Craters".into()))
            .with_rim_shader(RimShaderSpec::Shader(RimShaderClass::FakeStones))
            .with_warp(WarpSpec::Enabled);
        let plan = build(&config, ChainState::empty());

        let roles: Vec<NodeRole> = plan.creations().map(|(_, _, r)| r).collect();
        assert_eq!(
            roles,
            vec![
                NodeRole::BaseShape,
                NodeRole::Group,
                NodeRole::RimShader,
                NodeRole::Crater(0),
                NodeRole::Crater(1),
                NodeRole::Warp,
            ]
        );

        let base = NodeSlot(0);
        let group_slot = NodeSlot(1);
        let rim = NodeSlot(2);
        let first_crater = NodeSlot(3);
        let warp = NodeSlot(5);

        assert_eq!(plan.param_of(base, INPUT_NODE), None);
        assert_eq!(
            plan.param_of(base, simple_shape::SIZE),
            Some(&ParamValue::literal("1500.0 1500.0"))
        );
        assert_eq!(
            plan.param_of(base, simple_shape::DISPLACEMENT_AMPLITUDE),
            Some(&ParamValue::literal("-40.0"))
        );
        // Side nodes never join the chain.
        assert_eq!(
            plan.param_of(first_crater, INPUT_NODE),
            Some(&ParamValue::PathOf(base))
        );
        assert_eq!(plan.param_of(group_slot, INPUT_NODE), None);
        assert_eq!(plan.param_of(rim, INPUT_NODE), None);
        assert_eq!(
            plan.param_of(first_crater, crater::GUI_GROUP),
            Some(&ParamValue::ParamOf(group_slot, group::NAME))
        );
        assert_eq!(
            plan.param_of(first_crater, crater::RIM_SHADER),
            Some(&ParamValue::NameOf(rim))
        );
        assert_eq!(
            plan.param_of(rim, fake_stones::STONE_SCALE),
            Some(&ParamValue::literal("5.0"))
        );
        assert_eq!(
            plan.param_of(warp, INPUT_NODE),
            Some(&ParamValue::PathOf(NodeSlot(4)))
        );
        assert_eq!(
            plan.param_of(warp, fractal_warp::SCALE),
            Some(&ParamValue::literal("125.0"))
        );
        assert_eq!(plan.chain().head(), Some(&ParamValue::PathOf(warp)));
    }

    #[test]
    fn other_rim_shaders_get_no_stone_scale() {
        let config =
            fixed_config(1).with_rim_shader(RimShaderSpec::Shader(RimShaderClass::ImageMap));
        let plan = build(&config, ChainState::empty());
        let (slot, class, _) = plan.creations().next().unwrap();
        assert_eq!(class, classes::IMAGE_MAP_SHADER);
        assert_eq!(plan.params_of(slot).count(), 0);
    }

    #[test]
    fn zero_craters_is_rejected() {
        let config = fixed_config(0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(CraterPlanBuilder::new(&config)
            .build(ChainState::empty(), &mut rng)
            .is_err());
    }

    #[test]
    fn same_seed_same_plan() {
        let config = Configuration::new(8);
        let a = build(&config, ChainState::empty());
        let b = build(&config, ChainState::empty());
        assert_eq!(a.operations(), b.operations());
        assert_eq!(a.craters(), b.craters());
    }
}
