//! Chart generation for the expense breakdown.
//!
//! The chart is produced as an ECharts configuration so any front end that
//! embeds ECharts can render it with `chart.setOption(options)`.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{JsFunction, Orient, Tooltip, Trigger},
    series::Pie,
};
use serde_json::{Map, Value};

use crate::aggregation::{CategoryTotal, category_share};

/// A doughnut chart of expense totals per category.
///
/// Slices follow the order of `category_totals`. Hovering a slice shows its
/// amount in rupees and its whole-percent share of all expenses.
pub fn expense_chart(category_totals: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .map(|total| (total.total, total.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses").subtext("Grouped by category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .formatter(share_formatter(category_totals)),
        )
        .legend(Legend::new().orient(Orient::Vertical).left("right"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

/// The chart options as a JSON string.
pub fn expense_chart_options(category_totals: &[CategoryTotal]) -> String {
    expense_chart(category_totals).to_string()
}

/// Formats a slice as `label: ₹value (N%)`.
///
/// Shares are rounded by [category_share], not taken from ECharts' own `percent`.
fn share_formatter(category_totals: &[CategoryTotal]) -> JsFunction {
    let all: f64 = category_totals.iter().map(|total| total.total).sum();
    let shares: Map<String, Value> = category_totals
        .iter()
        .map(|total| {
            (
                total.category.clone(),
                Value::from(category_share(total.total, all)),
            )
        })
        .collect();

    JsFunction::new_with_args(
        "params",
        &format!(
            "const shares = {};
            const currencyFormatter = new Intl.NumberFormat('en-IN', {{
              style: 'currency',
              currency: 'INR'
            }});
            return `${{params.name}}: ${{currencyFormatter.format(params.value)}} (${{shares[params.name] ?? 0}}%)`;",
            Value::Object(shares)
        ),
    )
}
