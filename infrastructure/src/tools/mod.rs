//! Harvest tools exposed to the model
//!
//! - [`help`]: `get_help_text` and `get_man_page` definitions plus their aliases
//! - [`HarvestToolExecutor`]: runs validated calls through the [`Harvester`](crate::harvest::Harvester)
//! - [`JsonSchemaToolConverter`]: turns definitions into JSON Schema

pub mod help;

mod executor;
mod schema;

pub use executor::HarvestToolExecutor;
pub use schema::JsonSchemaToolConverter;

use explainer_domain::tool::entities::ToolSpec;

/// The capability interface: both harvest tools and their alias names
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(help::get_help_text_definition())
        .register(help::get_man_page_definition())
        .register_aliases(help::ALIASES.iter().copied())
}
