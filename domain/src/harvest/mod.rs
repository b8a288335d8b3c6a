//! Help-text harvest domain.
//!
//! Pure descriptions of what the harvester runs and what it hands back:
//!
//! - [`ToolQuery`]: a validated CLI tool name
//! - [`HelpRequest`]: one harvester invocation (tool, subcommand, kind)
//! - [`HelpResult`]: captured text or a descriptive error string
//! - [`discover_subcommands`]: extracts subcommand names from help output
//!
//! Process spawning lives in the infrastructure layer; this module only
//! decides argument vectors and error wording.

mod discovery;
mod request;
mod result;

pub use discovery::discover_subcommands;
pub use request::{HarvestKind, HelpFlag, HelpRequest, ToolQuery};
pub use result::{HelpOutcome, HelpResult};
