//! CLI domain: parse, route, help, output, and presentation only.
//! No generation logic; single route table dispatches to the generator.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{
    format_generation_json, format_generation_text, format_plan_json, format_plan_text,
};
pub use route::{GenerateOverrides, RunContext};
