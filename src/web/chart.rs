//! SVG bar chart for the result page

use std::fmt::Write;

use super::render::escape;
use crate::metrics::Comparison;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 400.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 40.0;
const MARGIN_SIDE: f64 = 24.0;

pub const USER_COLOR: &str = "orange";
pub const MODEL_COLOR: &str = "steelblue";

/// Render one bar per comparison row, left to right in row order
pub fn bar_chart(comparison: &Comparison) -> String {
    let rows = &comparison.rows;
    let max = comparison.max_error();
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let slot = (WIDTH - 2.0 * MARGIN_SIDE) / rows.len().max(1) as f64;
    let bar_width = slot * 0.6;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" xmlns="http://www.w3.org/2000/svg">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = write!(
        svg,
        r#"<text x="{}" y="24" text-anchor="middle" font-weight="bold">Mean Absolute Error (MAE) - Comparison</text>"#,
        WIDTH / 2.0
    );

    for (i, row) in rows.iter().enumerate() {
        let bar_height = if max > 0.0 {
            row.mean_absolute_error / max * plot_height
        } else {
            0.0
        };
        let x = MARGIN_SIDE + slot * i as f64 + (slot - bar_width) / 2.0;
        let y = MARGIN_TOP + plot_height - bar_height;
        let center = x + bar_width / 2.0;
        let color = if row.is_user { USER_COLOR } else { MODEL_COLOR };

        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {:.2}</title></rect>"#,
            x,
            y,
            bar_width,
            bar_height,
            color,
            escape(&row.label),
            row.mean_absolute_error
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{:.2}</text>"#,
            center,
            y - 6.0,
            row.mean_absolute_error
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            center,
            HEIGHT - MARGIN_BOTTOM + 20.0,
            escape(&row.label)
        );
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ResultRow;

    fn chart(rows: Vec<ResultRow>) -> String {
        let user_mae = rows.iter().find(|r| r.is_user).map_or(0.0, |r| r.mean_absolute_error);
        bar_chart(&Comparison { user_mae, rows })
    }

    fn row(label: &str, mae: f64, is_user: bool) -> ResultRow {
        ResultRow {
            label: label.to_string(),
            mean_absolute_error: mae,
            is_user,
        }
    }

    #[test]
    fn test_user_bar_highlighted() {
        let svg = chart(vec![row("You", 3.0, true), row("model1_pred", 6.0, false)]);

        assert_eq!(svg.matches(r#"fill="orange""#).count(), 1);
        assert_eq!(svg.matches(r#"fill="steelblue""#).count(), 1);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_bars_keep_row_order() {
        let svg = chart(vec![
            row("You", 5.0, true),
            row("model1_pred", 1.0, false),
            row("model2_pred", 9.0, false),
        ]);

        let you = svg.find(">You<").unwrap();
        let m1 = svg.find(">model1_pred<").unwrap();
        let m2 = svg.find(">model2_pred<").unwrap();
        assert!(you < m1 && m1 < m2);
    }

    #[test]
    fn test_tallest_bar_fills_plot() {
        let svg = chart(vec![row("You", 2.0, true), row("model1_pred", 4.0, false)]);
        let full = format!(r#"height="{:.1}""#, HEIGHT - MARGIN_TOP - MARGIN_BOTTOM);
        assert!(svg.contains(&full));
    }

    #[test]
    fn test_all_zero_errors() {
        let svg = chart(vec![row("You", 0.0, true), row("model1_pred", 0.0, false)]);
        assert_eq!(svg.matches(r#"height="0.0""#).count(), 2);
        assert!(!svg.contains("NaN"));
    }
}
