//! Per-resource request counters
//!
//! Every read request is tagged with a generation. A response is applied only if
//! it is newer than the last one applied for the same resource, so a slow reply
//! from an earlier sync can never overwrite a fresher render.

use std::collections::HashMap;

pub type Generation = u64;

/// The four resources a full sync loads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum Resource {
    Stats,
    Students,
    Topics,
    Supervisors,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Stats,
        Resource::Students,
        Resource::Topics,
        Resource::Supervisors,
    ];
}

#[derive(Debug, Default, Clone)]
pub struct RequestCounters {
    issued: HashMap<Resource, Generation>,
    applied: HashMap<Resource, Generation>,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next generation for a request about to be sent.
    pub fn issue(&mut self, resource: Resource) -> Generation {
        let next = self.issued.entry(resource).or_insert(0);
        *next += 1;
        *next
    }

    /// Records a response and tells whether it may be rendered.
    pub fn accept(&mut self, resource: Resource, generation: Generation) -> bool {
        let applied = self.applied.entry(resource).or_insert(0);
        if generation <= *applied {
            return false;
        }
        *applied = generation;
        true
    }

    pub fn last_applied(&self, resource: Resource) -> Generation {
        self.applied.get(&resource).copied().unwrap_or(0)
    }
}
