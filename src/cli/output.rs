//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GenError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &GenError) -> String {
    if e.is_configuration() {
        format!("error: {}\nhint: check the [generator] and [catalog] sections", e)
    } else {
        format!("error: {}", e)
    }
}
