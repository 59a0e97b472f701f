use crate::{
    foundation::core::{Coordinate, Delta},
    foundation::error::{DrillError, DrillResult},
};

/// Tuning for [`MovementViewport::fit`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportConfig {
    /// Width, in steps, of the smallest frame ever shown.
    #[serde(default = "default_min_steps_visible")]
    pub min_steps_visible: f64,
    /// Extra steps added around the path when it outgrows the minimum frame.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_min_steps_visible() -> f64 {
    20.0
}

fn default_margin() -> f64 {
    4.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_steps_visible: default_min_steps_visible(),
            margin: default_margin(),
        }
    }
}

impl ViewportConfig {
    /// Check that the config can frame anything.
    pub fn validate(&self) -> DrillResult<()> {
        if !self.min_steps_visible.is_finite() || self.min_steps_visible <= 0.0 {
            return Err(DrillError::validation(
                "viewport min_steps_visible must be finite and > 0",
            ));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(DrillError::validation(
                "viewport margin must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Window, in steps, that frames one performer's path.
///
/// `south`/`north` bound the `x` axis and `west`/`east` bound the `y` axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovementViewport {
    /// Extent along `x`.
    pub width: f64,
    /// Extent along `y`.
    pub height: f64,
    /// High `x` edge.
    pub north: f64,
    /// Low `x` edge.
    pub south: f64,
    /// High `y` edge.
    pub east: f64,
    /// Low `y` edge.
    pub west: f64,
}

#[derive(Clone, Copy, Debug, Default)]
struct Extents {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Extents {
    fn of_path(path: &[Delta]) -> Self {
        let mut ext = Self::default();
        let (mut x, mut y) = (0.0_f64, 0.0_f64);
        for d in path {
            x += d.x;
            y += d.y;
            ext.min_x = ext.min_x.min(x);
            ext.max_x = ext.max_x.max(x);
            ext.min_y = ext.min_y.min(y);
            ext.max_y = ext.max_y.max(y);
        }
        ext
    }
}

impl MovementViewport {
    /// Frame the path walked from `start` by the relative displacements in `path`.
    ///
    /// `aspect_ratio` is the container's height / width and is preserved by the result. The
    /// frame is at least the configured minimum and is centered on the path's bounding box.
    #[tracing::instrument(skip(path), fields(path_len = path.len()))]
    pub fn fit(
        start: Coordinate,
        path: &[Delta],
        aspect_ratio: f64,
        config: &ViewportConfig,
    ) -> DrillResult<Self> {
        config.validate()?;
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(DrillError::validation(
                "viewport aspect ratio must be finite and > 0",
            ));
        }

        let ext = Extents::of_path(path);
        let overall_x = ext.max_x - ext.min_x;
        let overall_y = ext.max_y - ext.min_y;

        let mut width = config.min_steps_visible;
        let mut height = width * aspect_ratio;
        if overall_x + config.margin > width {
            width = overall_x + config.margin;
            height = width * aspect_ratio;
        }
        if overall_y + config.margin > height {
            height = overall_y + config.margin;
            width = height / aspect_ratio;
        }

        let south = start.x + ext.max_x - overall_x / 2.0 - width / 2.0;
        let west = start.y + ext.max_y - overall_y / 2.0 - height / 2.0;
        Ok(Self {
            width,
            height,
            north: south + width,
            south,
            east: west + height,
            west,
        })
    }

    /// Center of the frame.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            self.south + self.width / 2.0,
            self.west + self.height / 2.0,
        )
    }

    /// Whether `p` lies inside the frame, edges included.
    pub fn contains(&self, p: Coordinate) -> bool {
        (self.south..=self.north).contains(&p.x) && (self.west..=self.east).contains(&p.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/movement.rs"]
mod tests;
