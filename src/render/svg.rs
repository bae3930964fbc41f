//! SVG rendering of the activity card
//!
//! Produces a standalone document: title and total, the sparkline with its
//! filled area and day markers, then one proportional bar per day.

use std::fmt::Write;

use crate::activity::ActivitySummary;

const CARD_WIDTH: f64 = 320.0;
const MARGIN: f64 = 12.0;
const HEADER_HEIGHT: f64 = 28.0;
const ROW_HEIGHT: f64 = 20.0;
const LABEL_WIDTH: f64 = 56.0;
const COUNT_WIDTH: f64 = 40.0;
const BAR_HEIGHT: f64 = 12.0;
const MARKER_RADIUS: f64 = 2.2;

const GRADIENT_START: &str = "#ffd89b";
const GRADIENT_END: &str = "#ff9900";
const TRACK_COLOR: &str = "#f3f4f6";
const MUTED_COLOR: &str = "#666";
const COUNT_COLOR: &str = "#333";

/// Just the sparkline, sized to the configured chart dimensions
pub fn render_sparkline(summary: &ActivitySummary) -> String {
    let geometry = &summary.sparkline;
    let dims = geometry.dimensions;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = dims.width,
        h = dims.height
    );
    svg.push_str(&gradient_defs());
    svg.push_str(&sparkline_body(summary));
    svg.push_str("</svg>\n");
    svg
}

/// The full card: header, sparkline, totals and per-day bars
pub fn render_card(summary: &ActivitySummary) -> String {
    let dims = summary.sparkline.dimensions;
    let chart_top = MARGIN + HEADER_HEIGHT;
    let rows_top = chart_top + dims.height + MARGIN;
    let height = rows_top + ROW_HEIGHT * summary.days.len() as f64 + MARGIN;
    let bar_x = MARGIN + LABEL_WIDTH;
    let bar_width = CARD_WIDTH - bar_x - COUNT_WIDTH - MARGIN;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = CARD_WIDTH,
        h = height
    );
    svg.push_str(&gradient_defs());

    let _ = writeln!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="14" font-weight="700">Activity (last 7 days)</text>"#,
        x = MARGIN,
        y = MARGIN + 14.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="13" fill="{muted}" text-anchor="end">{total} activities</text>"#,
        x = CARD_WIDTH - MARGIN,
        y = MARGIN + 14.0,
        muted = MUTED_COLOR,
        total = summary.total
    );

    let _ = writeln!(svg, r#"<g transform="translate({},{})">"#, MARGIN, chart_top);
    svg.push_str(&sparkline_body(summary));
    svg.push_str("</g>\n");

    let totals_x = MARGIN + dims.width + 10.0;
    let _ = writeln!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="12" font-weight="600" fill="{muted}">{total} total</text>"#,
        x = totals_x,
        y = chart_top + dims.height / 2.0 - 2.0,
        muted = MUTED_COLOR,
        total = summary.total
    );
    let _ = writeln!(
        svg,
        r#"<text x="{x}" y="{y}" font-size="12" fill="{muted}">Max/day: {max}</text>"#,
        x = totals_x,
        y = chart_top + dims.height / 2.0 + 12.0,
        muted = MUTED_COLOR,
        max = summary.max_count
    );

    for (i, day) in summary.days.iter().enumerate() {
        let y = rows_top + ROW_HEIGHT * i as f64;
        let text_y = y + BAR_HEIGHT - 1.0;
        let fill = bar_width * f64::from(day.bar_percent) / 100.0;

        let _ = writeln!(
            svg,
            r#"<text x="{x}" y="{ty}" font-size="13" font-weight="700">{label} <tspan font-weight="400" fill="{muted}">{num}</tspan></text>"#,
            x = MARGIN,
            ty = text_y,
            label = escape(&day.label),
            muted = MUTED_COLOR,
            num = day.day_number
        );
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{r}" fill="{track}"/>"#,
            x = bar_x,
            y = y,
            w = bar_width,
            h = BAR_HEIGHT,
            r = BAR_HEIGHT / 2.0,
            track = TRACK_COLOR
        );
        if fill > 0.0 {
            let _ = writeln!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{r}" fill="url(#gradBar)"/>"#,
                x = bar_x,
                y = y,
                w = fill,
                h = BAR_HEIGHT,
                r = BAR_HEIGHT / 2.0
            );
        }
        let _ = writeln!(
            svg,
            r#"<text x="{x}" y="{ty}" font-size="13" fill="{color}" text-anchor="end">{count}</text>"#,
            x = CARD_WIDTH - MARGIN,
            color = COUNT_COLOR,
            ty = text_y,
            count = day.count
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn gradient_defs() -> String {
    format!(
        concat!(
            "<defs>\n",
            r#"<linearGradient id="gradSpark" x1="0" x2="1"><stop offset="0%" stop-color="{a}" stop-opacity="0.9"/><stop offset="100%" stop-color="{b}" stop-opacity="0.9"/></linearGradient>"#,
            "\n",
            r#"<linearGradient id="gradBar" x1="0" x2="1"><stop offset="0%" stop-color="{a}"/><stop offset="100%" stop-color="{b}"/></linearGradient>"#,
            "\n</defs>\n"
        ),
        a = GRADIENT_START,
        b = GRADIENT_END
    )
}

fn sparkline_body(summary: &ActivitySummary) -> String {
    let geometry = &summary.sparkline;
    let mut body = String::new();

    let _ = writeln!(
        body,
        r#"<polyline points="{}" fill="url(#gradSpark)" fill-opacity="0.12" stroke="none"/>"#,
        geometry.area_attr()
    );
    let _ = writeln!(
        body,
        r#"<polyline points="{}" fill="none" stroke="url(#gradSpark)" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#,
        geometry.points_attr()
    );
    for point in &geometry.points {
        let _ = writeln!(
            body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            point.x, point.y, MARKER_RADIUS, GRADIENT_END
        );
    }

    body
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
