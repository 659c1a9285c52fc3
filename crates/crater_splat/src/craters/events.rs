//! Event types and sinks for observing applies.
//!
//! This module defines [`ApplyEvent`] and a set of sinks to emit, collect, or forward events
//! while running [`crate::craters::runner::apply_with_events`] or
//! [`crate::craters::runner::CraterSplatter::apply_with_events`].
use crate::config::InsertionMode;
use crate::craters::plan::NodeRole;
use crate::craters::runner::ApplyReport;
use crate::craters::splice::TerrainTarget;
use crate::scene::{NodeHandle, SceneError};

/// Describes events emitted during an apply.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ApplyEvent {
    /// Emitted once the configuration has been validated.
    ApplyStarted {
        crater_count: usize,
        insertion: InsertionMode,
    },

    /// Emitted when the terrain-computation node and its old main input were captured.
    TargetLocated { target: TerrainTarget },

    /// Emitted after planning, before anything in the scene changes.
    PlanBuilt {
        /// Number of operations, including splice operations.
        operations: usize,
        craters: usize,
    },

    /// Emitted after each node creation.
    NodeCreated {
        /// Zero-based operation index.
        step: usize,
        role: NodeRole,
        handle: NodeHandle,
    },

    /// Emitted after each parameter assignment.
    ParamSet {
        step: usize,
        /// Path of the node written to.
        path: String,
        param: &'static str,
        /// Resolved value as sent to the scene.
        value: String,
    },

    /// Emitted when the chain was attached to the terrain node.
    Spliced {
        mode: InsertionMode,
        target_path: String,
        /// Path now feeding the terrain node.
        input: String,
    },

    /// Emitted when a scene call failed and the rest of the plan was abandoned.
    Aborted { step: usize, error: SceneError },

    /// Emitted when the whole apply finished.
    ApplyFinished { report: ApplyReport },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. "splice").
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ApplyEvent`], used by sinks to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplyEventKind {
    ApplyStarted,
    TargetLocated,
    PlanBuilt,
    NodeCreated,
    ParamSet,
    Spliced,
    Aborted,
    ApplyFinished,
    Warning,
}

impl ApplyEvent {
    pub fn kind(&self) -> ApplyEventKind {
        match self {
            ApplyEvent::ApplyStarted { .. } => ApplyEventKind::ApplyStarted,
            ApplyEvent::TargetLocated { .. } => ApplyEventKind::TargetLocated,
            ApplyEvent::PlanBuilt { .. } => ApplyEventKind::PlanBuilt,
            ApplyEvent::NodeCreated { .. } => ApplyEventKind::NodeCreated,
            ApplyEvent::ParamSet { .. } => ApplyEventKind::ParamSet,
            ApplyEvent::Spliced { .. } => ApplyEventKind::Spliced,
            ApplyEvent::Aborted { .. } => ApplyEventKind::Aborted,
            ApplyEvent::ApplyFinished { .. } => ApplyEventKind::ApplyFinished,
            ApplyEvent::Warning { .. } => ApplyEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ApplyEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ApplyEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: ApplyEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ApplyEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ApplyEvent) {}

    #[inline]
    fn wants(&self, _kind: ApplyEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ApplyEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ApplyEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ApplyEvent),
{
    #[inline]
    fn send(&mut self, event: ApplyEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ApplyEvent>,
    only: Option<Vec<ApplyEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only events of the given kinds.
    pub fn only(kinds: &[ApplyEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<ApplyEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ApplyEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: ApplyEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ApplyEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ApplyEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ApplyEvent) {
        let kind = event.kind();
        let mut targets: Vec<&mut S> = self.sinks.iter_mut().filter(|s| s.wants(kind)).collect();
        let Some(last) = targets.pop() else {
            return;
        };
        for sink in targets {
            sink.send(event.clone());
        }
        last.send(event);
    }

    fn wants(&self, kind: ApplyEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
