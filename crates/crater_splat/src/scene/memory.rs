//! In-memory scene graph.
//!
//! [`MemoryScene`] implements [`SceneGraph`] without a host application. Nodes get host-style
//! display names ("Crater shader 01") and root-level paths ("/Crater shader 01"). It backs dry
//! runs and examples, and supports injecting a failure on a chosen call to exercise abort
//! handling.
//!
//! The `name` parameter is special, as it is on a real host:
//! - setting it renames the node, and its path changes with it; a name already taken by
//!   another node gets the first free numeric suffix ("Craters 01"), so handles taken before
//!   the rename go stale;
//! - reading it returns the node's current display name, whether or not it was ever set.
use std::collections::BTreeMap;

use tracing::debug;

use crate::scene::classes::{self, group};
use crate::scene::{NodeHandle, SceneError, SceneGraph, SceneResult};

const ROOT_ID: u64 = 0;

/// A node stored in a [`MemoryScene`].
#[derive(Clone, Debug)]
pub struct SceneNode {
    handle: NodeHandle,
    class: String,
    parent: Option<u64>,
    params: BTreeMap<String, String>,
}

impl SceneNode {
    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn path(&self) -> &str {
        self.handle.path()
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Flat scene of root-level nodes. See the module docs for how `name` behaves.
#[derive(Debug)]
pub struct MemoryScene {
    nodes: Vec<SceneNode>,
    calls: usize,
    failure: Option<(usize, SceneError)>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    /// Create an empty scene containing only the root.
    pub fn new() -> Self {
        let root = SceneNode {
            handle: NodeHandle::new(ROOT_ID, "/", ""),
            class: "project".into(),
            parent: None,
            params: BTreeMap::new(),
        };
        Self {
            nodes: vec![root],
            calls: 0,
            failure: None,
        }
    }

    /// Add a `compute_terrain` node named "Compute Terrain" whose main input is `input`.
    pub fn with_compute_terrain(mut self, input: &str) -> Self {
        let handle = self.insert(classes::COMPUTE_TERRAIN, Some("Compute Terrain".into()));
        self.params_mut(handle.id())
            .insert(classes::INPUT_NODE.into(), input.into());
        self
    }

    /// Add a root-level node of `class` with a host-style generated name.
    pub fn add_node(&mut self, class: &str) -> NodeHandle {
        self.insert(class, None)
    }

    /// Add a root-level node with an explicit display name.
    pub fn add_named_node(&mut self, class: &str, name: &str) -> NodeHandle {
        self.insert(class, Some(name.into()))
    }

    /// Fail the call with zero-based index `call` with `error`. Later calls succeed again.
    pub fn fail_on_call(mut self, call: usize, error: SceneError) -> Self {
        self.failure = Some((call, error));
        self
    }

    /// Number of adapter calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls
    }

    /// Number of nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All nodes except the root, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().skip(1)
    }

    pub fn nodes_of_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a SceneNode> {
        self.nodes().filter(move |n| n.class == class)
    }

    pub fn node(&self, path: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.handle.path() == path)
    }

    pub fn param(&self, path: &str, name: &str) -> Option<&str> {
        self.node(path).and_then(|n| n.param(name))
    }

    fn insert(&mut self, class: &str, name: Option<String>) -> NodeHandle {
        let name = match name {
            Some(name) => self.unique_name(&name, false),
            None => self.unique_name(&display_base(class), true),
        };
        let id = self.nodes.len() as u64;
        let handle = NodeHandle::new(id, format!("/{name}"), name);
        self.nodes.push(SceneNode {
            handle: handle.clone(),
            class: class.into(),
            parent: Some(ROOT_ID),
            params: BTreeMap::new(),
        });
        handle
    }

    /// Host naming: generated names are always numbered, requested names only on collision.
    fn unique_name(&self, base: &str, always_number: bool) -> String {
        if !always_number && !self.name_taken(base) {
            return base.to_owned();
        }
        (1..)
            .map(|i| format!("{base} {i:02}"))
            .find(|candidate| !self.name_taken(candidate))
            .unwrap_or_else(|| base.to_owned())
    }

    fn name_taken(&self, name: &str) -> bool {
        self.nodes().any(|n| n.handle.name() == name)
    }

    fn params_mut(&mut self, id: u64) -> &mut BTreeMap<String, String> {
        &mut self.nodes[id as usize].params
    }

    fn index_of(&self, node: &NodeHandle) -> SceneResult<usize> {
        let idx = node.id() as usize;
        if idx < self.nodes.len() {
            Ok(idx)
        } else {
            Err(SceneError::Api(format!("unknown node id {}", node.id())))
        }
    }

    fn tick(&mut self) -> SceneResult<()> {
        let call = self.calls;
        self.calls += 1;
        match &self.failure {
            Some((at, error)) if *at == call => Err(error.clone()),
            _ => Ok(()),
        }
    }

    fn rename(&mut self, idx: usize, requested: &str) -> String {
        if self.nodes[idx].handle.name() == requested {
            return requested.to_owned();
        }
        let name = self.unique_name(requested, false);
        let id = self.nodes[idx].handle.id();
        self.nodes[idx].handle = NodeHandle::new(id, format!("/{name}"), name.clone());
        name
    }
}

/// "crater_shader" -> "Crater shader"
fn display_base(class: &str) -> String {
    let spaced = class.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Node".into(),
    }
}

impl SceneGraph for MemoryScene {
    fn root(&mut self) -> SceneResult<NodeHandle> {
        self.tick()?;
        Ok(self.nodes[0].handle.clone())
    }

    fn create_child(&mut self, parent: &NodeHandle, class: &str) -> SceneResult<NodeHandle> {
        self.tick()?;
        if parent.id() != ROOT_ID {
            self.index_of(parent)?;
            return Err(SceneError::Api(format!(
                "nested creation under '{}' is not supported",
                parent.path()
            )));
        }
        if class.is_empty() {
            return Err(SceneError::Reply("empty class name".into()));
        }
        let handle = self.insert(class, None);
        debug!("Created '{}' ({}).", handle.path(), class);
        Ok(handle)
    }

    fn set_param(&mut self, node: &NodeHandle, name: &str, value: &str) -> SceneResult<()> {
        self.tick()?;
        let idx = self.index_of(node)?;
        if name == group::NAME && idx as u64 != ROOT_ID {
            let assigned = self.rename(idx, value);
            self.nodes[idx].params.insert(name.into(), assigned);
        } else {
            self.nodes[idx].params.insert(name.into(), value.into());
        }
        Ok(())
    }

    fn get_param(&mut self, node: &NodeHandle, name: &str) -> SceneResult<String> {
        self.tick()?;
        let idx = self.index_of(node)?;
        let n = &self.nodes[idx];
        if name == group::NAME {
            return Ok(n.handle.name().to_owned());
        }
        Ok(n.params.get(name).cloned().unwrap_or_default())
    }

    fn children_filtered_by_class(
        &mut self,
        parent: &NodeHandle,
        class: &str,
    ) -> SceneResult<Vec<NodeHandle>> {
        self.tick()?;
        self.index_of(parent)?;
        Ok(self
            .nodes()
            .filter(|n| n.parent == Some(parent.id()) && n.class == class)
            .map(|n| n.handle.clone())
            .collect())
    }

    fn node_by_path(&mut self, path: &str) -> SceneResult<NodeHandle> {
        self.tick()?;
        self.node(path)
            .map(|n| n.handle.clone())
            .ok_or_else(|| SceneError::Reply(format!("no node at path '{path}'")))
    }
}
