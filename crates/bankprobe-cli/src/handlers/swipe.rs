//! Swipe plan preview

use crate::commands::OutputFormat;
use crate::error::{CliError, CliResult};
use bankprobe::{swipe_plan, Direction, Viewport};

/// Coordinates of a swipe on a `viewport`-sized screen
pub fn render_swipe(direction: Direction, viewport: Viewport, format: OutputFormat) -> CliResult<String> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(CliError::invalid_argument(format!(
            "screen size must be non-zero, got {viewport}"
        )));
    }
    let plan = swipe_plan(direction, viewport);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => Ok(format!(
            "swipe {direction} on {viewport}: ({},{}) -> ({},{})\n",
            plan.start.x, plan.start.y, plan.end.x, plan.end.y
        )),
    }
}
