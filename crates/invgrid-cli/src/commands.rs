//! Command runners.

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use serde_json::Value;
use tracing::{debug, info};

use invgrid_cli::dataset::{load_rows, load_schema, parse_filter_arg};
use invgrid_cli::render::{footer, page_table};
use invgrid_filter::FilterEngine;
use invgrid_gateway::{MemoryGateway, Row, TableController};
use invgrid_model::{FilterValue, SortOrder};
use invgrid_table::PaginationTracker;

use crate::cli::{ListArgs, SchemaArgs};

pub async fn run_list(args: &ListArgs) -> Result<()> {
    let rows = load_rows(&args.data)?;
    info!(rows = rows.len(), "dataset loaded");

    let fields = match &args.schema {
        Some(path) => load_schema(path)?,
        None => Vec::new(),
    };
    if fields.is_empty() && !args.filters.is_empty() {
        bail!("--filter requires --schema");
    }

    let mut engine = FilterEngine::new(fields).context("build filter engine")?;
    engine.set_search_query(args.search.clone());
    for raw in &args.filters {
        let (key, value) = parse_filter_arg(engine.fields(), raw)?;
        engine
            .set_filter(&key, value)
            .with_context(|| format!("set filter `{key}`"))?;
    }
    debug!(active = engine.active_filters_count(), "filters applied");

    let filtered: Vec<Row> = engine
        .apply_filters(&rows)
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map.clone()),
            _ => None,
        })
        .collect();

    // The filtered set plays the remote table: the gateway paginates and
    // sorts it the way the real backend would.
    let mut tracker = PaginationTracker::new().with_page_size(args.page_size);
    if let Some(sort) = &args.sort {
        tracker = tracker.with_default_sort(sort.as_str(), SortOrder::from_descending(args.desc));
    }
    let mut controller = TableController::new(MemoryGateway::new().with_rows(filtered))
        .with_tracker(tracker);
    controller.set_page(args.page).await;

    if let Some(error) = controller.last_error() {
        bail!("fetch failed: {error}");
    }
    println!("{}", page_table(controller.rows()));
    println!("{}", footer(controller.pagination_info()));
    Ok(())
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let fields = load_schema(&args.schema)?;
    let mut table = Table::new();
    table.set_header(vec!["Key", "Label", "Kind", "Options", "Default"]);
    for field in &fields {
        table.add_row(vec![
            field.key.clone(),
            field.label.clone(),
            field.kind.to_string(),
            field
                .options
                .iter()
                .map(|option| option.value.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            field
                .default
                .as_ref()
                .map(describe_default)
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");
    info!(fields = fields.len(), "schema ok");
    Ok(())
}

fn describe_default(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(text) => text.clone(),
        FilterValue::Number(Some(number)) => number.to_string(),
        FilterValue::Flag(flag) => flag.to_string(),
        FilterValue::Date(Some(date)) => date.to_string(),
        FilterValue::DateRange(Some(start), Some(end)) => format!("{start}..{end}"),
        _ => String::new(),
    }
}
