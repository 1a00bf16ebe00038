//! Inline SVG charts for the results page

use std::fmt::Write;

use super::view::escape;

const WIDTH: f64 = 420.0;
const HEIGHT: f64 = 240.0;
const MARGIN: f64 = 32.0;
const BAR_COLOR: &str = "#4c78a8";
const LINE_COLOR: &str = "#e45756";

fn open_svg(out: &mut String, title: &str) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{t}">"#,
        w = WIDTH,
        h = HEIGHT,
        t = escape(title),
    );
    let _ = write!(
        out,
        r#"<text x="{x}" y="18" text-anchor="middle" font-size="14" font-weight="bold">{t}</text>"#,
        x = WIDTH / 2.0,
        t = escape(title),
    );
    let _ = write!(
        out,
        r##"<line x1="{m}" y1="{b}" x2="{r}" y2="{b}" stroke="#333"/>"##,
        m = MARGIN,
        b = HEIGHT - MARGIN,
        r = WIDTH - MARGIN / 2.0,
    );
}

/// Vertical bar chart, one bar per (label, count) in the given order
pub fn bar_chart(title: &str, bars: &[(String, usize)]) -> String {
    let mut out = String::new();
    open_svg(&mut out, title);

    let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1) as f64;
    let plot_width = WIDTH - MARGIN * 1.5;
    let plot_height = HEIGHT - MARGIN * 2.0;
    let slot = plot_width / bars.len().max(1) as f64;
    let bar_width = slot * 0.6;

    for (i, (label, count)) in bars.iter().enumerate() {
        let height = *count as f64 / max * plot_height;
        let x = MARGIN + slot * i as f64 + (slot - bar_width) / 2.0;
        let y = HEIGHT - MARGIN - height;

        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{BAR_COLOR}"><title>{label}: {count}</title></rect>"#,
            label = escape(label),
        );
        let _ = write!(
            out,
            r#"<text x="{cx:.1}" y="{ty:.1}" text-anchor="middle" font-size="12">{count}</text>"#,
            cx = x + bar_width / 2.0,
            ty = y - 4.0,
        );
        let _ = write!(
            out,
            r#"<text x="{cx:.1}" y="{ly:.1}" text-anchor="middle" font-size="12">{label}</text>"#,
            cx = x + bar_width / 2.0,
            ly = HEIGHT - MARGIN + 16.0,
            label = escape(label),
        );
    }

    out.push_str("</svg>");
    out
}

/// Line chart of values against their position in the series
pub fn line_chart(title: &str, values: &[f64]) -> String {
    let mut out = String::new();
    open_svg(&mut out, title);

    let max = values.iter().copied().fold(0.0_f64, f64::max).max(1.0);
    let plot_width = WIDTH - MARGIN * 1.5;
    let plot_height = HEIGHT - MARGIN * 2.0;
    let step = if values.len() > 1 {
        plot_width / (values.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = MARGIN + step * i as f64;
            let y = HEIGHT - MARGIN - value / max * plot_height;
            (x, y)
        })
        .collect();

    if points.len() > 1 {
        let path = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            out,
            r#"<polyline points="{path}" fill="none" stroke="{LINE_COLOR}" stroke-width="2"/>"#
        );
    }

    for (i, (x, y)) in points.iter().enumerate() {
        let _ = write!(
            out,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{LINE_COLOR}"><title>#{n}: {v}</title></circle>"#,
            n = i + 1,
            v = values[i],
        );
    }

    let _ = write!(
        out,
        r#"<text x="4" y="{ty:.1}" font-size="11">{max}</text>"#,
        ty = MARGIN + 4.0,
    );

    out.push_str("</svg>");
    out
}
