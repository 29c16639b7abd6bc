// WasteDesk - app/control.rs
//
// Object-safe handle over a `ListView<R>` so the dashboard can drive any
// of its three views without knowing the record type. Produces
// render-ready `TableModel`s; the UI layer only formats them.

use crate::core::export::{self, ExportFormat};
use crate::core::list_view::ListView;
use crate::core::model::ViewKind;
use crate::core::record::ListRecord;
use crate::util::error::{ExportError, FilterError};
use std::io::Write;
use std::path::Path;

/// Position and counts shown beneath a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: usize,
    pub total_pages: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub filtered_count: usize,
    pub record_count: usize,
    pub active_filters: usize,
}

/// One page of a view, flattened to strings.
#[derive(Debug, Clone)]
pub struct TableModel {
    pub view: ViewKind,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
    pub pager: PagerInfo,

    /// Active filters as `(name, value)` for the header line.
    pub active: Vec<(&'static str, String)>,
}

/// Description of one filter a view offers, with its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub options: &'static [&'static str],
    pub current: Option<String>,
}

/// Type-erased list operations, shared by all record types.
pub trait ListControl {
    fn view(&self) -> ViewKind;

    fn set_filter_input(&mut self, name: &str, raw: &str) -> Result<(), FilterError>;

    fn clear_filter(&mut self, name: &str) -> Result<(), FilterError>;

    fn reset_filters(&mut self);

    fn change_page(&mut self, page: usize);

    fn next_page(&mut self);

    fn prev_page(&mut self);

    fn first_page(&mut self);

    fn last_page(&mut self);

    fn table(&self) -> TableModel;

    fn filter_catalog(&self) -> Vec<FilterInfo>;

    /// Write every record passing the filters (all pages) to `writer`.
    fn export_filtered(
        &self,
        format: ExportFormat,
        writer: &mut dyn Write,
        export_path: &Path,
    ) -> Result<usize, ExportError>;
}

impl<R: ListRecord> ListControl for ListView<R> {
    fn view(&self) -> ViewKind {
        R::VIEW
    }

    fn set_filter_input(&mut self, name: &str, raw: &str) -> Result<(), FilterError> {
        ListView::set_filter_input(self, name, raw)
    }

    fn clear_filter(&mut self, name: &str) -> Result<(), FilterError> {
        ListView::clear_filter(self, name)
    }

    fn reset_filters(&mut self) {
        ListView::reset_filters(self)
    }

    fn change_page(&mut self, page: usize) {
        ListView::change_page(self, page)
    }

    fn next_page(&mut self) {
        ListView::next_page(self)
    }

    fn prev_page(&mut self) {
        ListView::prev_page(self)
    }

    fn first_page(&mut self) {
        ListView::first_page(self)
    }

    fn last_page(&mut self) {
        ListView::last_page(self)
    }

    fn table(&self) -> TableModel {
        let snap = self.snapshot();
        TableModel {
            view: R::VIEW,
            columns: R::columns(),
            rows: snap.items.iter().map(|r| r.cells()).collect(),
            pager: PagerInfo {
                page: snap.page,
                total_pages: snap.total_pages,
                start_item: snap.start_item,
                end_item: snap.end_item,
                filtered_count: snap.filtered_count,
                record_count: snap.record_count,
                active_filters: snap.active_filters,
            },
            active: self
                .filter_state()
                .iter()
                .map(|(name, value)| (name, value.to_string()))
                .collect(),
        }
    }

    fn filter_catalog(&self) -> Vec<FilterInfo> {
        self.filters()
            .iter()
            .map(|def| FilterInfo {
                name: def.name,
                label: def.label,
                kind: def.kind.describe(),
                options: def.options(),
                current: self.filter_state().get(def.name).map(|v| v.to_string()),
            })
            .collect()
    }

    fn export_filtered(
        &self,
        format: ExportFormat,
        writer: &mut dyn Write,
        export_path: &Path,
    ) -> Result<usize, ExportError> {
        let records = self.filtered();
        let count = export::export(format, &records, writer, export_path)?;
        tracing::info!(
            view = R::VIEW.label(),
            count,
            path = %export_path.display(),
            "Exported filtered records"
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Collector;
    use crate::core::sample;

    #[test]
    fn test_table_reflects_page_and_filters() {
        let mut view = ListView::new(sample::collectors(), 2);
        let control: &mut dyn ListControl = &mut view;
        control.set_filter_input("status", "active").unwrap();
        let table = control.table();
        assert_eq!(table.view, ViewKind::Collectors);
        assert_eq!(table.columns, Collector::columns());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.pager.filtered_count, 3);
        assert_eq!(table.pager.total_pages, 2);
        assert_eq!(table.active, vec![("status", "active".to_string())]);

        control.next_page();
        let table = control.table();
        assert_eq!(table.pager.page, 2);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], "Emily Davis");
    }

    #[test]
    fn test_catalog_reports_current_values() {
        let mut view = ListView::new(sample::zones(), 5);
        view.set_filter_input("utilization", "70..89").unwrap();
        let catalog = ListControl::filter_catalog(&view);
        let names: Vec<&str> = catalog.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "utilization", "band"]);
        assert_eq!(catalog[1].current.as_deref(), Some("70..89"));
        assert_eq!(catalog[2].options, &["low", "medium", "high"]);
        assert_eq!(catalog[0].current, None);
    }

    #[test]
    fn test_export_covers_all_pages() {
        let mut view = ListView::new(sample::zones(), 2);
        view.set_filter_input("band", "low").unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let count = view
            .export_filtered(ExportFormat::Csv, &mut buf, Path::new("zones.csv"))
            .unwrap();
        assert_eq!(count, 4);
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.lines().count(), 5);
    }
}
