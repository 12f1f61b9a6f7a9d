use crate::error::Result;
use crate::math::Point3;
use crate::params::ParameterSet;

use super::{BoxSpec, ShapeDefinition};

/// Thickness of the shelf and of every panel.
const PANEL_THICKNESS: f64 = 10.0;

/// Gap between the cavity edge and the centre line of a side panel.
const SIDE_OFFSET: f64 = 5.0;

/// Wall-recess fixture: a shelf, two side panels and a back panel around a
/// `width × height × depth` cavity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Niche;

impl Niche {
    pub const TEMPLATE: &'static str = "niche";
}

impl ShapeDefinition for Niche {
    fn template_name(&self) -> &str {
        Self::TEMPLATE
    }

    fn geometry(&self, params: &ParameterSet) -> Result<Vec<BoxSpec>> {
        let width = params.require("width")?;
        let height = params.require("height")?;
        let depth = params.require("depth")?;

        let styled = |spec: BoxSpec, color: &str| spec.with_color(color).with_edge_style("red", "blue", 2.0);

        Ok(vec![
            styled(
                BoxSpec::new(width, PANEL_THICKNESS, depth, Point3::origin()),
                "white",
            )
            .with_selectable([7]),
            styled(
                BoxSpec::new(
                    PANEL_THICKNESS,
                    height,
                    depth,
                    Point3::new(-(width / 2.0) - SIDE_OFFSET, 0.0, 0.0),
                ),
                "grey",
            )
            .with_selectable([11]),
            styled(
                BoxSpec::new(
                    PANEL_THICKNESS,
                    height,
                    depth,
                    Point3::new((width / 2.0) + SIDE_OFFSET, 0.0, 0.0),
                ),
                "grey",
            )
            .with_selectable([12]),
            styled(
                BoxSpec::new(width, height, PANEL_THICKNESS, Point3::origin()),
                "grey",
            ),
        ])
    }
}
