//! Path styles for markers and polygons.

/// Stroke/fill style of a drawn layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    /// Marker radius in pixels; `None` for polygons
    pub radius: Option<f64>,
}

/// Partial style update; absent fields keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StylePatch {
    pub color: Option<&'static str>,
    pub weight: Option<f64>,
    pub fill_color: Option<&'static str>,
    pub fill_opacity: Option<f64>,
    pub radius: Option<f64>,
}

impl PathStyle {
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(fill_color) = patch.fill_color {
            self.fill_color = fill_color;
        }
        if let Some(fill_opacity) = patch.fill_opacity {
            self.fill_opacity = fill_opacity;
        }
        if patch.radius.is_some() && self.radius.is_some() {
            self.radius = patch.radius;
        }
    }
}

impl From<PathStyle> for StylePatch {
    fn from(style: PathStyle) -> Self {
        Self {
            color: Some(style.color),
            weight: Some(style.weight),
            fill_color: Some(style.fill_color),
            fill_opacity: Some(style.fill_opacity),
            radius: style.radius,
        }
    }
}

pub const FLASH_COLOR: &str = "rgba(255,255,255,0.95)";

pub const MARKER: PathStyle = PathStyle {
    color: "rgba(255,255,255,0.70)",
    weight: 2.0,
    fill_color: "rgba(255,255,255,0.35)",
    fill_opacity: 0.55,
    radius: Some(7.0),
};

pub const MARKER_HOVER: StylePatch = StylePatch {
    color: Some("rgba(255,255,255,0.95)"),
    weight: None,
    fill_color: None,
    fill_opacity: Some(0.75),
    radius: Some(9.0),
};

/// Marker mouse-out restores only what hover changed
pub const MARKER_OUT: StylePatch = StylePatch {
    color: Some(MARKER.color),
    weight: None,
    fill_color: None,
    fill_opacity: Some(MARKER.fill_opacity),
    radius: MARKER.radius,
};

pub const POLYGON: PathStyle = PathStyle {
    color: "rgba(255,255,255,0.65)",
    weight: 2.0,
    fill_color: "rgba(255,255,255,0.20)",
    fill_opacity: 0.25,
    radius: None,
};

pub const POLYGON_HOVER: StylePatch = StylePatch {
    color: Some("rgba(255,255,255,0.90)"),
    weight: Some(3.0),
    fill_color: None,
    fill_opacity: Some(0.35),
    radius: None,
};

pub const FLASH: StylePatch = StylePatch {
    color: Some(FLASH_COLOR),
    weight: None,
    fill_color: None,
    fill_opacity: None,
    radius: None,
};
