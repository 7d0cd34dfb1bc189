//! Opaque handle newtypes for topology graph entities.
//!
//! Each handle is a thin `u32` wrapper that is `Copy`, `Hash`, and
//! `Serialize`/`Deserialize`. Handles are minted by the
//! [`GraphBuilder`](crate::builder::GraphBuilder) and compared by index, so
//! two interfaces with identical attributes remain distinct vertices.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Handle of an interface vertex.
    VertexId
);

define_id!(
    /// Handle of a connection edge.
    EdgeId
);

define_id!(
    /// Handle of a component instance.
    InstanceId
);

define_id!(
    /// Handle of a memory item (address space or memory map).
    MemoryId
);
