use std::fs;
use std::path::Path;

use plotly::common::{Marker, MarkerSymbol, Mode, Title};
use plotly::layout::Axis;
use plotly::{Bar, Layout, Plot, Scatter};

use crate::config::ChartMode;
use crate::error::CompareError;
use crate::plot::layout::{MagnitudeChart, SeriesChart};
use crate::session::Comparison;

fn magnitude_plot(chart: &MagnitudeChart) -> Plot {
    let mut plot = Plot::new();

    if !chart.bars.is_empty() {
        let x: Vec<String> = chart
            .bars
            .iter()
            .map(|bar| format!("{} ({})", bar.name, bar.label))
            .collect();
        let y: Vec<f64> = chart.bars.iter().map(|bar| bar.value).collect();
        plot.add_trace(Bar::new(x, y).name("Mean"));
    }

    let title = match (chart.placeholder, chart.delta.as_deref()) {
        (Some(msg), _) => format!("{} | {}", chart.title, msg),
        (None, Some(delta)) => format!("{} | {}", chart.title, delta),
        (None, None) => chart.title.clone(),
    };
    let layout = Layout::new()
        .title(Title::new(&title))
        .y_axis(Axis::new().range(vec![0.0, chart.scale]));
    plot.set_layout(layout);
    plot
}

fn series_plot(chart: &SeriesChart) -> Plot {
    let mut plot = Plot::new();

    let traces = [
        (&chart.a, &chart.names.0, "A", MarkerSymbol::Circle),
        (&chart.b, &chart.names.1, "B", MarkerSymbol::Square),
    ];
    for (values, name, side, symbol) in traces {
        if values.is_empty() {
            continue;
        }
        let x: Vec<usize> = (1..=values.len()).collect();
        let trace = Scatter::new(x, values.clone())
            .mode(Mode::LinesMarkers)
            .name(&format!("{side}: {name}"))
            .marker(Marker::new().symbol(symbol));
        plot.add_trace(trace);
    }

    let title = match chart.placeholder {
        Some(msg) => format!("{} | {}", chart.title, msg),
        None => chart.title.clone(),
    };
    let (lo, hi) = chart.y_range;
    let layout = Layout::new()
        .title(Title::new(&title))
        .x_axis(
            Axis::new()
                .title(Title::new("Sample"))
                .range(vec![1.0, chart.x_len as f64]),
        )
        .y_axis(Axis::new().range(vec![lo, hi]));
    plot.set_layout(layout);
    plot
}

/// Build the plotly figure for a comparison in its chart mode.
///
/// Source labels end up inside the page's inline script, so they are escaped here.
pub fn comparison_plot(cmp: &Comparison) -> Plot {
    let (a_name, b_name) = (html_escape(&cmp.a.source), html_escape(&cmp.b.source));
    let names = (a_name.as_str(), b_name.as_str());
    match cmp.chart_mode {
        ChartMode::Magnitude => magnitude_plot(&MagnitudeChart::build(&cmp.result, names, &cmp.title())),
        ChartMode::Series => series_plot(&SeriesChart::build(
            cmp.a.samples(),
            cmp.b.samples(),
            names,
            &cmp.title(),
        )),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone HTML page for a comparison.
pub fn render_html(cmp: &Comparison) -> String {
    let plot_html = comparison_plot(cmp).to_inline_html(None);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
</head>
<body>
<p>A ({a_name}) mean: {a_mean} (n={a_n}) &nbsp; B ({b_name}) mean: {b_mean} (n={b_n}) &nbsp; Delta: {delta}</p>
{plot_html}
</body>
</html>
"#,
        title = html_escape(&cmp.title()),
        a_name = html_escape(&cmp.a.source),
        b_name = html_escape(&cmp.b.source),
        a_mean = format_mean(cmp.result.mean_a),
        b_mean = format_mean(cmp.result.mean_b),
        a_n = cmp.result.count_a,
        b_n = cmp.result.count_b,
        delta = cmp.result.delta_label(),
        plot_html = plot_html,
    )
}

pub fn write_html(cmp: &Comparison, path: &Path) -> Result<(), CompareError> {
    fs::write(path, render_html(cmp))?;
    tracing::info!(path = %path.display(), "wrote comparison chart");
    Ok(())
}

pub fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| format!("{m:.6}")).unwrap_or_else(|| "N/A".to_string())
}
