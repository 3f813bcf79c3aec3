//! Game simulation modules

pub mod input;
pub mod physics;
pub mod registry;
pub mod room;
pub mod scheduler;
pub mod snapshot;

pub use input::{InputSequencer, SubmitOutcome};
pub use physics::PhysicsEngine;
pub use registry::RoomRegistry;
pub use room::{PlayerState, RoomState};
pub use scheduler::GameLoopScheduler;
pub use snapshot::{PlayerView, Snapshot, SnapshotBuilder};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Player identifier assigned by the transport collaborator
pub type PlayerId = Uuid;

/// Room identifier: a 6-character join code
pub type RoomId = String;

/// Per-player input flags for one tick, received from the transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InputFlags {
    /// Move left this tick
    pub left: bool,
    /// Move right this tick
    pub right: bool,
    /// Jump, consumed at the next ground contact
    pub jump: bool,
}

impl InputFlags {
    pub const fn new(left: bool, right: bool, jump: bool) -> Self {
        Self { left, right, jump }
    }
}
