//! Frame module — frame counter and frame-scoped caches.
//!
//! Every cached value in the gameplay layer is valid for exactly one
//! simulation frame. Values are stored together with the frame that
//! produced them; a read in any other frame sees nothing.

mod frame_cache;

pub use frame_cache::{FrameId, FrameClock, FrameCache, FrameValue};
