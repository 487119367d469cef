//! Radar Chart Model
//!
//! Chart-ready comparison data extracted from the analysis response, plus
//! the fixed five-axis geometry and an SVG renderer used by the report
//! export. Axes start at the top (-90°) and proceed clockwise; radii scale
//! linearly with the metric value over a 0-10 range.

use serde::{Deserialize, Serialize};

/// Chart canvas edge in SVG units.
const CHART_SIZE: f64 = 400.0;
/// Outer radius as a fraction of the canvas.
const RADIUS_RATIO: f64 = 0.35;
/// Metric values at which background reference rings are drawn.
const RING_VALUES: [f64; 5] = [2.0, 4.0, 6.0, 8.0, 10.0];

/// One distinct stroke/fill color per wing, cycled.
pub const PALETTE: [&str; 4] = ["#ea580c", "#3b82f6", "#10b981", "#f59e0b"];

/// Axis display labels, in drawing order.
pub const AXIS_LABELS: [&str; 5] = [
    "Sécurité Passive",
    "Performance / Plané",
    "Maniabilité",
    "Accessibilité",
    "Vitesse / Pénétration",
];

/// The five rated dimensions of a wing, each conceptually in [0, 10].
///
/// Missing fields deserialize to 0; out-of-range model output is clamped.
/// Higher accessibility means easier to fly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RadarMetrics {
    #[serde(default)]
    pub safety: f64,
    #[serde(default)]
    pub performance: f64,
    #[serde(default)]
    pub handling: f64,
    #[serde(default)]
    pub accessibility: f64,
    #[serde(default)]
    pub speed: f64,
}

impl RadarMetrics {
    /// Values in axis order (safety, performance, handling, accessibility, speed).
    pub fn values(&self) -> [f64; 5] {
        [
            self.safety,
            self.performance,
            self.handling,
            self.accessibility,
            self.speed,
        ]
    }

    /// Clamp every metric into [0, 10]. NaN collapses to 0.
    pub fn clamped(&self) -> Self {
        let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 10.0) };
        Self {
            safety: clamp(self.safety),
            performance: clamp(self.performance),
            handling: clamp(self.handling),
            accessibility: clamp(self.accessibility),
            speed: clamp(self.speed),
        }
    }
}

/// One wing's entry in the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarData {
    /// Wing display name
    pub label: String,
    pub metrics: RadarMetrics,
}

/// Cartesian point on an axis at a given metric value.
///
/// Axis 0 points straight up; the remaining axes follow clockwise at equal
/// angular spacing. `value` 10 lands on the outer radius.
pub fn axis_point(axis: usize, value: f64) -> (f64, f64) {
    let center = CHART_SIZE / 2.0;
    let radius = CHART_SIZE * RADIUS_RATIO;
    let angle_step = std::f64::consts::TAU / AXIS_LABELS.len() as f64;
    let angle = axis as f64 * angle_step - std::f64::consts::FRAC_PI_2;
    let r = radius * value / 10.0;
    (center + r * angle.cos(), center + r * angle.sin())
}

/// Render the comparison as a standalone SVG document.
pub fn render_svg(data: &[RadarData]) -> String {
    let center = CHART_SIZE / 2.0;
    let radius = CHART_SIZE * RADIUS_RATIO;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{s}\" height=\"{s}\" viewBox=\"0 0 {s} {s}\" style=\"background:#0f172a\">\n",
        s = CHART_SIZE
    ));

    // Background reference rings
    for v in RING_VALUES {
        svg.push_str(&format!(
            "  <circle cx=\"{center}\" cy=\"{center}\" r=\"{:.1}\" fill=\"none\" stroke=\"#1e293b\" stroke-width=\"1\"/>\n",
            radius * v / 10.0
        ));
    }

    // Axes and labels
    for (i, label) in AXIS_LABELS.iter().enumerate() {
        let (x, y) = axis_point(i, 10.0);
        let (lx, ly) = axis_point(i, 11.5);
        svg.push_str(&format!(
            "  <line x1=\"{center}\" y1=\"{center}\" x2=\"{x:.1}\" y2=\"{y:.1}\" stroke=\"#1e293b\" stroke-width=\"1\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{lx:.1}\" y=\"{ly:.1}\" fill=\"#94a3b8\" font-size=\"10\" font-weight=\"900\" text-anchor=\"middle\">{}</text>\n",
            xml_escape(label)
        ));
    }

    // Data polygons, one color per wing
    for (wing_idx, wing) in data.iter().enumerate() {
        let color = PALETTE[wing_idx % PALETTE.len()];
        let metrics = wing.metrics.clamped();
        let points: Vec<String> = metrics
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let (x, y) = axis_point(i, *v);
                format!("{x:.1},{y:.1}")
            })
            .collect();
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"{color}\" fill-opacity=\"0.2\" stroke=\"{color}\" stroke-width=\"3\"/>\n",
            points.join(" ")
        ));
        for (i, v) in metrics.values().iter().enumerate() {
            let (x, y) = axis_point(i, *v);
            svg.push_str(&format!(
                "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" fill=\"{color}\"/>\n"
            ));
        }
    }

    // Legend
    for (i, wing) in data.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let y = CHART_SIZE - 14.0 * (data.len() - i) as f64;
        svg.push_str(&format!(
            "  <circle cx=\"12\" cy=\"{:.1}\" r=\"5\" fill=\"{color}\"/>\n",
            y - 4.0
        ));
        svg.push_str(&format!(
            "  <text x=\"22\" y=\"{y:.1}\" fill=\"#ffffff\" font-size=\"11\">{}</text>\n",
            xml_escape(&wing.label)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_first_axis_points_up() {
        let (x, y) = axis_point(0, 10.0);
        assert!(approx(x, 200.0));
        assert!(approx(y, 200.0 - 140.0));
    }

    #[test]
    fn test_radius_scales_with_value() {
        let (_, y_full) = axis_point(0, 10.0);
        let (_, y_half) = axis_point(0, 5.0);
        // half the value covers half the radial distance
        assert!(approx(200.0 - y_half, (200.0 - y_full) / 2.0));
    }

    #[test]
    fn test_zero_value_is_center() {
        for axis in 0..5 {
            let (x, y) = axis_point(axis, 0.0);
            assert!(approx(x, 200.0));
            assert!(approx(y, 200.0));
        }
    }

    #[test]
    fn test_clamping() {
        let metrics = RadarMetrics {
            safety: 14.0,
            performance: -2.0,
            handling: f64::NAN,
            accessibility: 7.5,
            speed: 10.0,
        };
        let clamped = metrics.clamped();
        assert_eq!(clamped.safety, 10.0);
        assert_eq!(clamped.performance, 0.0);
        assert_eq!(clamped.handling, 0.0);
        assert_eq!(clamped.accessibility, 7.5);
        assert_eq!(clamped.speed, 10.0);
    }

    #[test]
    fn test_missing_metrics_deserialize_to_zero() {
        let wing: RadarData =
            serde_json::from_str(r#"{"label": "Epsilon", "metrics": {"safety": 9}}"#).unwrap();
        assert_eq!(wing.metrics.safety, 9.0);
        assert_eq!(wing.metrics.speed, 0.0);
    }

    #[test]
    fn test_svg_contains_rings_and_polygons() {
        let data = vec![
            RadarData {
                label: "Epsilon".to_string(),
                metrics: RadarMetrics {
                    safety: 9.0,
                    performance: 5.0,
                    handling: 7.0,
                    accessibility: 9.0,
                    speed: 4.0,
                },
            },
            RadarData {
                label: "Alpina 4".to_string(),
                metrics: RadarMetrics::default(),
            },
        ];
        let svg = render_svg(&data);
        assert_eq!(svg.matches("<polygon").count(), 2);
        // five rings plus ten data points
        assert!(svg.matches("<circle").count() >= 15);
        assert!(svg.contains(PALETTE[0]));
        assert!(svg.contains(PALETTE[1]));
        assert!(svg.contains("Alpina 4"));
    }
}
