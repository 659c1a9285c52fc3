//! Scene-graph adapter contract.
//!
//! The core never talks to a host application directly. Everything it needs, node creation,
//! parameter reads and writes, path lookup and child enumeration, goes through [`SceneGraph`].
//! Every call is a blocking round-trip that either succeeds or fails with one of the four
//! [`SceneError`] categories.
use thiserror::Error;

pub mod classes;
pub mod memory;

pub use memory::MemoryScene;

pub type SceneResult<T> = std::result::Result<T, SceneError>;

/// Opaque reference to a node in the host scene.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    id: u64,
    path: String,
    name: String,
}

impl NodeHandle {
    pub fn new(id: u64, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Path that resolves back to this node through [`SceneGraph::node_by_path`].
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Display name as assigned by the host.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Failure at the scene-graph boundary, tagged by category.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene connection error: {0}")]
    Connection(String),

    #[error("scene timeout error: {0}")]
    Timeout(String),

    #[error("scene reply error: {0}")]
    Reply(String),

    #[error("scene API error: {0}")]
    Api(String),
}

/// Category of a [`SceneError`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneErrorKind {
    Connection,
    Timeout,
    Reply,
    Api,
}

impl SceneError {
    pub fn kind(&self) -> SceneErrorKind {
        match self {
            SceneError::Connection(_) => SceneErrorKind::Connection,
            SceneError::Timeout(_) => SceneErrorKind::Timeout,
            SceneError::Reply(_) => SceneErrorKind::Reply,
            SceneError::Api(_) => SceneErrorKind::Api,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SceneError::Connection(m)
            | SceneError::Timeout(m)
            | SceneError::Reply(m)
            | SceneError::Api(m) => m,
        }
    }
}

/// Services the core requires from a host scene graph.
pub trait SceneGraph {
    /// The scene's top-level container.
    fn root(&mut self) -> SceneResult<NodeHandle>;

    /// Instantiate a node of `class` under `parent`.
    fn create_child(&mut self, parent: &NodeHandle, class: &str) -> SceneResult<NodeHandle>;

    fn set_param(&mut self, node: &NodeHandle, name: &str, value: &str) -> SceneResult<()>;

    fn get_param(&mut self, node: &NodeHandle, name: &str) -> SceneResult<String>;

    /// Direct children of `parent` with the given class, in host enumeration order.
    fn children_filtered_by_class(
        &mut self,
        parent: &NodeHandle,
        class: &str,
    ) -> SceneResult<Vec<NodeHandle>>;

    fn node_by_path(&mut self, path: &str) -> SceneResult<NodeHandle>;
}

impl<S: SceneGraph + ?Sized> SceneGraph for &mut S {
    fn root(&mut self) -> SceneResult<NodeHandle> {
        (**self).root()
    }

    fn create_child(&mut self, parent: &NodeHandle, class: &str) -> SceneResult<NodeHandle> {
        (**self).create_child(parent, class)
    }

    fn set_param(&mut self, node: &NodeHandle, name: &str, value: &str) -> SceneResult<()> {
        (**self).set_param(node, name, value)
    }

    fn get_param(&mut self, node: &NodeHandle, name: &str) -> SceneResult<String> {
        (**self).get_param(node, name)
    }

    fn children_filtered_by_class(
        &mut self,
        parent: &NodeHandle,
        class: &str,
    ) -> SceneResult<Vec<NodeHandle>> {
        (**self).children_filtered_by_class(parent, class)
    }

    fn node_by_path(&mut self, path: &str) -> SceneResult<NodeHandle> {
        (**self).node_by_path(path)
    }
}
