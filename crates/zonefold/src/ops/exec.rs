//! Execution strategies for a whole fold.
//!
//! The fold itself is pure; an `Executor` only decides where it runs.
//! `Inline` computes on the calling thread, `Worker` moves the request into a
//! background thread so an interactive caller stays responsive. There is no
//! cancellation: a caller that stops caring drops the `Pending` and the late
//! result is discarded.

use std::str::FromStr;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use super::dispatch::compute_aggregate_region_with;
use super::operation::{merge_operations, operations_from_facts, Fact, Operation};
use crate::cfg::EngineCfg;
use crate::error::{Error, Result};
use crate::geojson::{self, GeoJson};
use crate::geom::Region;

/// Everything one fold needs, owned.
///
/// `facts` are server-confirmed records; `operations` are local drafts merged
/// over them by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldRequest {
    #[serde(default)]
    pub play_area: Option<GeoJson>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<Fact>,
}

impl FoldRequest {
    pub fn new(play_area: Option<GeoJson>, operations: Vec<Operation>) -> Self {
        Self {
            play_area,
            operations,
            facts: Vec::new(),
        }
    }

    /// Fold order: confirmed facts, with drafts replacing by id or appended.
    pub fn resolved_operations(&self) -> Vec<Operation> {
        if self.facts.is_empty() {
            return self.operations.clone();
        }
        merge_operations(&operations_from_facts(&self.facts), &self.operations)
    }

    /// Run the fold on the current thread.
    pub fn compute(&self, cfg: &EngineCfg) -> Region {
        compute_aggregate_region_with(self.play_area.as_ref(), &self.resolved_operations(), cfg)
    }
}

impl FromStr for FoldRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Where a fold runs.
pub trait Executor {
    fn run(&self, request: FoldRequest) -> Pending;
}

/// A fold result that may still be computing.
pub struct Pending {
    state: State,
}

enum State {
    Ready(Region),
    Running {
        handle: JoinHandle<Region>,
        fallback: Region,
    },
}

impl Pending {
    pub fn ready(region: Region) -> Self {
        Self {
            state: State::Ready(region),
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Ready(_) => true,
            State::Running { handle, .. } => handle.is_finished(),
        }
    }

    /// Block until the region is available.
    ///
    /// A worker that panicked yields the play area it started from.
    pub fn wait(self) -> Region {
        match self.state {
            State::Ready(region) => region,
            State::Running { handle, fallback } => handle.join().unwrap_or_else(|_| {
                tracing::error!("fold worker panicked; falling back to the play area");
                fallback
            }),
        }
    }
}

/// Synchronous strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inline {
    pub cfg: EngineCfg,
}

impl Executor for Inline {
    fn run(&self, request: FoldRequest) -> Pending {
        Pending::ready(request.compute(&self.cfg))
    }
}

/// Background-thread strategy; the request is moved into the worker.
#[derive(Clone, Copy, Debug, Default)]
pub struct Worker {
    pub cfg: EngineCfg,
}

impl Executor for Worker {
    fn run(&self, request: FoldRequest) -> Pending {
        let fallback = geojson::play_area_region(request.play_area.as_ref());
        let cfg = self.cfg;
        let job = request.clone();
        let spawned = thread::Builder::new()
            .name("zonefold-worker".into())
            .spawn(move || job.compute(&cfg));
        match spawned {
            Ok(handle) => Pending {
                state: State::Running { handle, fallback },
            },
            Err(err) => {
                tracing::warn!(%err, "could not spawn fold worker; running inline");
                Pending::ready(request.compute(&cfg))
            }
        }
    }
}
