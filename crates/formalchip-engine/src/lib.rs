//! Pluggable formal-engine adapters satisfying one uniform contract.
//!
//! [`mock`] is the deterministic test oracle; [`symbiyosys`] drives the
//! open-source `sby` tool; [`scripted`] wraps opaque vendor binaries. All
//! three funnel subprocess execution through `formalchip_utils::runner`'s
//! argv-only `CommandSpec`.

pub mod error;
pub mod mock;
pub mod model;
pub mod scripted;
pub mod symbiyosys;

pub use error::EngineError;
pub use mock::MockEngine;
pub use model::{EngineRunInput, FormalEngine};
pub use scripted::ScriptedEngine;
pub use symbiyosys::SymbiYosysEngine;
