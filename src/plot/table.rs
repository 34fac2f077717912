use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use itertools::{EitherOrBoth, Itertools};

use crate::plot::plot_html::format_mean;
use crate::session::Comparison;

/// Means, counts and delta as a terminal table.
pub fn summary_table(cmp: &Comparison) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Side", "Source", "n", "Mean"]);

    table.add_row(vec![
        Cell::new("A"),
        Cell::new(&cmp.a.source),
        Cell::new(cmp.result.count_a),
        Cell::new(format_mean(cmp.result.mean_a)),
    ]);
    table.add_row(vec![
        Cell::new("B"),
        Cell::new(&cmp.b.source),
        Cell::new(cmp.result.count_b),
        Cell::new(format_mean(cmp.result.mean_b)),
    ]);
    table.add_row(vec![
        Cell::new("Delta"),
        Cell::new("B vs A"),
        Cell::new(""),
        Cell::new(cmp.result.delta_label()),
    ]);
    table
}

/// A and B samples side by side; the shorter column simply ends.
pub fn series_table(cmp: &Comparison) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#".to_string(),
        format!("A: {}", cmp.a.source),
        format!("B: {}", cmp.b.source),
    ]);

    let rows = cmp.a.samples().iter().zip_longest(cmp.b.samples());
    for (i, pair) in rows.enumerate() {
        let (a, b) = match pair {
            EitherOrBoth::Both(a, b) => (a.to_string(), b.to_string()),
            EitherOrBoth::Left(a) => (a.to_string(), String::new()),
            EitherOrBoth::Right(b) => (String::new(), b.to_string()),
        };
        table.add_row(vec![(i + 1).to_string(), a, b]);
    }
    table
}
