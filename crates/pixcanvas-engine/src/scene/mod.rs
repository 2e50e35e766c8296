//! Per-canvas draw stream.
//!
//! Responsibilities:
//! - encode shape calls into commands plus fixed-width parameter records
//! - keep issue order (later shapes draw over earlier ones at equal depth)
//! - enforce the fixed per-canvas capacity with drop-and-warn
//! - keep shape-specific encoders isolated per shape file under `scene::shapes`

mod batch;
mod cmd;
mod kind;
mod param;

pub mod shapes;

pub use batch::{Capacity, CommandBatch};
pub use cmd::{DrawCmd, DrawIndirect};
pub use kind::{Primitive, ShapeKind};
pub use param::Param;
