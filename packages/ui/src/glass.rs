//! Glass fill visual.

use dioxus::prelude::*;

pub const VIEW_WIDTH: f64 = 140.0;
pub const VIEW_HEIGHT: f64 = 250.0;

/// Rounded glass outline inside the 140×250 view box.
pub const GLASS_PATH: &str = "M30,10 L110,10 Q120,10 120,20 L120,230 Q120,240 110,240 \
L30,240 Q20,240 20,230 L20,20 Q20,10 30,10 Z";

/// Clip rectangle for a given fill fraction, anchored to the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassGeometry {
    pub clip_y: f64,
    pub fill_height: f64,
}

impl GlassGeometry {
    pub fn for_fraction(fraction: f64) -> Self {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let fill_height = VIEW_HEIGHT * fraction;
        Self {
            clip_y: VIEW_HEIGHT - fill_height,
            fill_height,
        }
    }
}

#[component]
pub fn Glass(fill_fraction: f64) -> Element {
    let geometry = GlassGeometry::for_fraction(fill_fraction);

    rsx! {
        div {
            class: "glass",
            style: "width: {VIEW_WIDTH}px; height: {VIEW_HEIGHT}px",
            svg {
                width: "100%",
                height: "100%",
                view_box: "0 0 {VIEW_WIDTH} {VIEW_HEIGHT}",
                defs {
                    clipPath {
                        id: "glass-clip",
                        rect {
                            x: "0",
                            y: "{geometry.clip_y}",
                            width: "{VIEW_WIDTH}",
                            height: "{geometry.fill_height}",
                        }
                    }
                }
                // Outline
                path {
                    d: GLASS_PATH,
                    fill: "#e0f7fa",
                    stroke: "#0077b6",
                    stroke_width: "3",
                }
                // Water
                path {
                    d: GLASS_PATH,
                    fill: "#00b4d8",
                    clip_path: "url(#glass-clip)",
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_full() {
        assert_eq!(
            GlassGeometry::for_fraction(0.0),
            GlassGeometry {
                clip_y: 250.0,
                fill_height: 0.0
            }
        );
        assert_eq!(
            GlassGeometry::for_fraction(1.0),
            GlassGeometry {
                clip_y: 0.0,
                fill_height: 250.0
            }
        );
    }

    #[test]
    fn test_fill_is_anchored_to_bottom() {
        let g = GlassGeometry::for_fraction(0.2);
        assert!((g.fill_height - 50.0).abs() < 1e-9);
        assert!((g.clip_y + g.fill_height - VIEW_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(GlassGeometry::for_fraction(3.0).fill_height, 250.0);
        assert_eq!(GlassGeometry::for_fraction(-1.0).fill_height, 0.0);
        assert_eq!(GlassGeometry::for_fraction(f64::NAN).fill_height, 0.0);
    }
}
