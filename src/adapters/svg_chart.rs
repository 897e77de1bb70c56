//! SVG rendering of the buy-and-hold, gross and net equity curves.

use crate::domain::equity::{EquityCurve, EquityCurves};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const PADDING: f64 = 50.0;

fn polyline(curve: &EquityCurve, min: f64, scale_x: f64, scale_y: f64, stroke: &str) -> String {
    let points: Vec<String> = curve
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (point.equity - min) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    format!(
        r#"  <polyline fill="none" stroke="{}" stroke-width="1.5" points="{}"/>"#,
        stroke,
        points.join(" ")
    )
}

pub fn render_equity_chart(curves: &EquityCurves, title: &str) -> String {
    let all: Vec<f64> = [&curves.buy_hold, &curves.gross, &curves.net]
        .iter()
        .flat_map(|c| c.values())
        .collect();
    if all.is_empty() {
        return "No equity data available.".to_string();
    }

    let min_equity = all.iter().copied().fold(f64::INFINITY, f64::min);
    let max_equity = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_equity - min_equity;
    let scale_y = if range > 0.0 {
        plot_height / range
    } else {
        1.0
    };
    let len = curves.buy_hold.len();
    let scale_x = if len > 1 {
        plot_width / (len - 1) as f64
    } else {
        0.0
    };

    let first = curves.buy_hold.points.first().map(|p| p.date.to_string());
    let last = curves.buy_hold.points.last().map(|p| p.date.to_string());

    let mut lines = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            WIDTH, HEIGHT, WIDTH, HEIGHT
        ),
        format!(r#"  <rect width="{:.0}" height="{:.0}" fill="white"/>"#, WIDTH, HEIGHT),
        format!(
            r#"  <text x="{:.0}" y="25" font-family="sans-serif" font-size="16" text-anchor="middle">{}</text>"#,
            WIDTH / 2.0,
            escape(title)
        ),
        format!(
            r#"  <line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{b:.0}" stroke="black"/>"#,
            p = PADDING,
            b = HEIGHT - PADDING
        ),
        format!(
            r#"  <line x1="{p:.0}" y1="{b:.0}" x2="{r:.0}" y2="{b:.0}" stroke="black"/>"#,
            p = PADDING,
            b = HEIGHT - PADDING,
            r = WIDTH - PADDING
        ),
        format!(
            r#"  <text x="5" y="{:.0}" font-family="sans-serif" font-size="10">{:.2}</text>"#,
            PADDING,
            max_equity
        ),
        format!(
            r#"  <text x="5" y="{:.0}" font-family="sans-serif" font-size="10">{:.2}</text>"#,
            HEIGHT - PADDING,
            min_equity
        ),
    ];

    if let (Some(first), Some(last)) = (first, last) {
        lines.push(format!(
            r#"  <text x="{:.0}" y="{:.0}" font-family="sans-serif" font-size="10">{}</text>"#,
            PADDING,
            HEIGHT - PADDING + 15.0,
            first
        ));
        lines.push(format!(
            r#"  <text x="{:.0}" y="{:.0}" font-family="sans-serif" font-size="10" text-anchor="end">{}</text>"#,
            WIDTH - PADDING,
            HEIGHT - PADDING + 15.0,
            last
        ));
    }

    let series = [
        (&curves.buy_hold, "gray", "Buy & Hold"),
        (&curves.gross, "blue", "Strategy (gross)"),
        (&curves.net, "green", "Strategy (net)"),
    ];
    for (i, (curve, stroke, label)) in series.iter().enumerate() {
        lines.push(polyline(curve, min_equity, scale_x, scale_y, stroke));
        lines.push(format!(
            r#"  <text x="{:.0}" y="{:.0}" font-family="sans-serif" font-size="11" fill="{}">{}</text>"#,
            PADDING + 10.0,
            PADDING + 15.0 + i as f64 * 14.0,
            stroke,
            escape(label)
        ));
    }

    lines.push("</svg>".to_string());
    lines.join("\n") + "\n"
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
