// WasteDesk - ui/render.rs
//
// Plain-text rendering of list pages, filter catalogs, the dashboard
// summary, and action notices. Formatting only: every figure comes from
// app-layer models.

use crate::app::control::{FilterInfo, PagerInfo, TableModel};
use crate::app::state::{DashboardSummary, Notice};
use crate::core::model::{Collector, ViewKind};
use std::io::{self, Write};

const COLUMN_GAP: &str = "  ";

/// Title-case view name for headings.
fn heading(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Zones => "Zones",
        ViewKind::Collectors => "Collectors",
        ViewKind::Requests => "Collection Requests",
    }
}

/// Pager line shown under every table.
pub fn footer(view: ViewKind, pager: &PagerInfo) -> String {
    let shown = if pager.end_item == 0 {
        "0".to_string()
    } else {
        format!("{}–{}", pager.start_item, pager.end_item)
    };
    let mut line = format!(
        "Showing {shown} of {} {view} · page {} of {}",
        pager.filtered_count, pager.page, pager.total_pages
    );
    match pager.active_filters {
        0 => {}
        1 => line.push_str(" · 1 filter active"),
        n => line.push_str(&format!(" · {n} filters active")),
    }
    line
}

/// Render one page of a view as an aligned table with heading and footer.
pub fn render_table(out: &mut dyn Write, table: &TableModel) -> io::Result<()> {
    writeln!(out, "{}", heading(table.view))?;
    if !table.active.is_empty() {
        let active: Vec<String> = table
            .active
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        writeln!(out, "Filters: {}", active.join(", "))?;
    }

    if table.rows.is_empty() {
        if table.pager.record_count == 0 {
            writeln!(out, "No {} yet.", table.view)?;
        } else {
            writeln!(out, "No {} match the current filters.", table.view)?;
        }
    } else {
        let widths = column_widths(table.columns, &table.rows);
        write_row(out, table.columns.iter().copied(), &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(out, rule.iter().map(String::as_str), &widths)?;
        for row in &table.rows {
            write_row(out, row.iter().map(String::as_str), &widths)?;
        }
    }

    writeln!(out, "{}", footer(table.view, &table.pager))
}

fn column_widths(columns: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn write_row<'a>(
    out: &mut dyn Write,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", padded.join(COLUMN_GAP).trim_end())
}

/// List the filters a view offers, their kinds, and current values.
pub fn render_filters(out: &mut dyn Write, view: ViewKind, filters: &[FilterInfo]) -> io::Result<()> {
    writeln!(out, "Filters for {view}:")?;
    let name_width = filters.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for info in filters {
        let mut line = format!("  {:<name_width$}  {:<6}  {}", info.name, info.kind, info.label);
        if !info.options.is_empty() {
            line.push_str(&format!(" [{}]", info.options.join("|")));
        }
        if let Some(current) = &info.current {
            line.push_str(&format!(" = {current}"));
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Headline figures plus the recent collectors block.
pub fn render_summary(
    out: &mut dyn Write,
    summary: &DashboardSummary,
    recent: &[Collector],
) -> io::Result<()> {
    writeln!(out, "Dashboard")?;
    writeln!(out, "  Zones:                 {}", summary.zones)?;
    writeln!(
        out,
        "  Collectors:            {} ({} active)",
        summary.collectors, summary.active_collectors
    )?;
    writeln!(out, "  Collections completed: {}", summary.collections_completed)?;
    let r = &summary.requests;
    writeln!(
        out,
        "  Requests:              {} pending, {} accepted, {} rejected, {} completed",
        r.pending, r.accepted, r.rejected, r.completed
    )?;
    writeln!(out, "  Requested weight:      {} kg", summary.requested_weight_kg)?;
    writeln!(out, "  Collected weight:      {} kg", summary.collected_weight_kg)?;

    if !recent.is_empty() {
        writeln!(out, "Recent collectors")?;
        for collector in recent {
            writeln!(
                out,
                "  {} <{}>  {}  {}",
                collector.name,
                collector.email,
                collector.zone,
                collector.status.label()
            )?;
        }
    }
    Ok(())
}

pub fn render_notice(out: &mut dyn Write, notice: &Notice) -> io::Result<()> {
    writeln!(out, "[{}] {}", notice.title, notice.description)
}
