// WasteDesk - app/state.rs
//
// Dashboard state: the three list views, the pending delete confirmation,
// the open request form, and the history of action notices. Owned by whichever front end is
// driving the session (one-shot CLI command or interactive browser).

use crate::app::control::ListControl;
use crate::app::dataset::Dataset;
use crate::app::forms::{self, CollectorField, EventDetails, RequestForm};
use crate::core::list_view::ListView;
use crate::core::model::{
    Address, CollectionRequest, Collector, CollectorStatus, RequestStatus, ViewKind, Zone,
};
use crate::core::record::ListRecord;
use crate::util::constants;
use crate::util::error::ActionError;
use chrono::NaiveTime;
use std::collections::VecDeque;

/// Sizing knobs for a dashboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub page_size: usize,
    pub recent_collectors: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: constants::DEFAULT_PAGE_SIZE,
            recent_collectors: constants::DEFAULT_RECENT_COLLECTORS,
        }
    }
}

/// Feedback for a completed action (title plus one-line description).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A deletion awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub view: ViewKind,
    pub id: String,

    /// Name of the record at the time the deletion was requested.
    pub title: String,
}

/// Request counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub completed: usize,
}

/// Headline figures derived from the current records.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub zones: usize,
    pub collectors: usize,
    pub active_collectors: usize,

    /// Completed collections summed over all zones.
    pub collections_completed: u64,

    pub requests: RequestCounts,

    /// Garbage weight summed over all requests, in kilograms.
    pub requested_weight_kg: f64,

    /// Weight of every collected item recorded so far, in kilograms.
    pub collected_weight_kg: f64,
}

/// Top-level dashboard state.
pub struct DashboardState {
    pub zones: ListView<Zone>,
    pub collectors: ListView<Collector>,
    pub requests: ListView<CollectionRequest>,
    pending_delete: Option<PendingDelete>,
    request_form: Option<RequestForm>,
    notices: VecDeque<Notice>,
    recent_collectors: usize,
}

impl DashboardState {
    /// Open all three views over `dataset`.
    pub fn new(dataset: Dataset, settings: ViewSettings) -> Self {
        tracing::info!(
            zones = dataset.zones.len(),
            collectors = dataset.collectors.len(),
            requests = dataset.requests.len(),
            page_size = settings.page_size,
            "Dashboard opened"
        );
        Self {
            zones: ListView::new(dataset.zones, settings.page_size),
            collectors: ListView::new(dataset.collectors, settings.page_size),
            requests: ListView::new(dataset.requests, settings.page_size),
            pending_delete: None,
            request_form: None,
            notices: VecDeque::new(),
            recent_collectors: settings.recent_collectors,
        }
    }

    pub fn view(&self, kind: ViewKind) -> &dyn ListControl {
        match kind {
            ViewKind::Zones => &self.zones,
            ViewKind::Collectors => &self.collectors,
            ViewKind::Requests => &self.requests,
        }
    }

    pub fn view_mut(&mut self, kind: ViewKind) -> &mut dyn ListControl {
        match kind {
            ViewKind::Zones => &mut self.zones,
            ViewKind::Collectors => &mut self.collectors,
            ViewKind::Requests => &mut self.requests,
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Add a zone with zeroed counters. The id is one past the largest
    /// numeric id in use, so ids are never reused after a deletion.
    pub fn add_zone(&mut self, name: &str) -> Result<Notice, ActionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ActionError::EmptyZoneName);
        }
        let next_id = self
            .zones
            .records()
            .iter()
            .filter_map(|z| z.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        self.zones.push(Zone::new(next_id.to_string(), name));
        tracing::info!(id = next_id, name, "Zone added");
        Ok(self.record_notice(Notice::new(
            "Zone Added",
            format!("{name} has been added successfully"),
        )))
    }

    /// Select a record for deletion. Nothing is removed until
    /// `confirm_delete`.
    pub fn request_delete(&mut self, view: ViewKind, id: &str) -> Result<&PendingDelete, ActionError> {
        let id = id.trim();
        let title = match view {
            ViewKind::Zones => self.zones.find(id).map(ListRecord::title),
            ViewKind::Collectors => self.collectors.find(id).map(ListRecord::title),
            ViewKind::Requests => self.requests.find(id).map(ListRecord::title),
        }
        .ok_or_else(|| ActionError::NotFound {
            view: view.label(),
            id: id.to_string(),
        })?;

        tracing::debug!(view = view.label(), id, "Delete requested");
        Ok(self.pending_delete.insert(PendingDelete {
            view,
            id: id.to_string(),
            title,
        }))
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Drop the pending deletion without removing anything.
    pub fn cancel_delete(&mut self) -> Option<PendingDelete> {
        self.pending_delete.take()
    }

    /// Remove the record selected by `request_delete`.
    ///
    /// The notice names the record actually removed.
    pub fn confirm_delete(&mut self) -> Result<Notice, ActionError> {
        let pending = self
            .pending_delete
            .take()
            .ok_or(ActionError::NoPendingDelete)?;

        let removed_title = match pending.view {
            ViewKind::Zones => self.zones.remove(&pending.id).map(|r| r.title()),
            ViewKind::Collectors => self.collectors.remove(&pending.id).map(|r| r.title()),
            ViewKind::Requests => self.requests.remove(&pending.id).map(|r| r.title()),
        }
        .ok_or_else(|| ActionError::NotFound {
            view: pending.view.label(),
            id: pending.id.clone(),
        })?;

        tracing::info!(view = pending.view.label(), id = %pending.id, "Record deleted");
        let title = match pending.view {
            ViewKind::Zones => "Zone Deleted",
            ViewKind::Collectors => "Collector Deleted",
            ViewKind::Requests => "Request Deleted",
        };
        Ok(self.record_notice(Notice::new(
            title,
            format!("{removed_title} has been removed"),
        )))
    }

    pub fn accept_request(&mut self, id: &str) -> Result<Notice, ActionError> {
        self.decide_request(id, RequestStatus::Accepted)?;
        Ok(self.record_notice(Notice::new(
            "Collection Request Accepted",
            format!("You have accepted collection request #{}", id.trim()),
        )))
    }

    pub fn reject_request(&mut self, id: &str) -> Result<Notice, ActionError> {
        self.decide_request(id, RequestStatus::Rejected)?;
        Ok(self.record_notice(Notice::new(
            "Collection Request Rejected",
            format!("You have rejected collection request #{}", id.trim()),
        )))
    }

    /// Move a pending request to `outcome`. Only pending requests can be
    /// decided.
    fn decide_request(&mut self, id: &str, outcome: RequestStatus) -> Result<(), ActionError> {
        let id = id.trim();
        let current = self
            .requests
            .find(id)
            .map(|r| r.status)
            .ok_or_else(|| ActionError::NotFound {
                view: ViewKind::Requests.label(),
                id: id.to_string(),
            })?;
        if current != RequestStatus::Pending {
            return Err(ActionError::NotPending {
                id: id.to_string(),
                status: current.token(),
            });
        }
        self.requests.update(id, |r| r.status = outcome);
        tracing::info!(id, status = outcome.token(), "Collection request decided");
        Ok(())
    }

    /// Append a weighed item to an accepted or completed request.
    pub fn record_collected_item(
        &mut self,
        id: &str,
        kind: &str,
        weight_kg: f64,
    ) -> Result<Notice, ActionError> {
        let id = id.trim();
        let status = self
            .requests
            .find(id)
            .map(|r| r.status)
            .ok_or_else(|| ActionError::NotFound {
                view: ViewKind::Requests.label(),
                id: id.to_string(),
            })?;
        if !matches!(status, RequestStatus::Accepted | RequestStatus::Completed) {
            return Err(ActionError::NotCollectable {
                id: id.to_string(),
                status: status.token(),
            });
        }

        let item = forms::collected_item(kind, weight_kg)?;
        let label = item.kind.label();
        let total = self
            .requests
            .update(id, |r| {
                r.collected.push(item);
                r.collected_weight()
            })
            .unwrap_or(weight_kg);
        tracing::info!(id, kind = label, weight_kg, total, "Collected item recorded");
        Ok(self.record_notice(Notice::new(
            "Item Recorded",
            format!("{weight_kg} kg of {label} recorded for collection request #{id}"),
        )))
    }

    /// Change one field of a collector.
    pub fn update_collector(&mut self, id: &str, field: &str, value: &str) -> Result<Notice, ActionError> {
        let id = id.trim();
        if self.collectors.find(id).is_none() {
            return Err(ActionError::NotFound {
                view: ViewKind::Collectors.label(),
                id: id.to_string(),
            });
        }
        let change = CollectorField::parse(field, value)?;
        let name = self
            .collectors
            .update(id, |c| {
                change.apply(c);
                c.name.clone()
            })
            .unwrap_or_default();
        tracing::info!(id, field, "Collector updated");
        Ok(self.record_notice(Notice::new(
            "Collector Updated",
            format!("{name}'s information has been updated"),
        )))
    }

    // -------------------------------------------------------------------------
    // Request wizard
    // -------------------------------------------------------------------------

    /// Open a blank request form, replacing any form already open.
    pub fn start_request(&mut self) -> &RequestForm {
        tracing::debug!("Request form opened");
        self.request_form.insert(RequestForm::new())
    }

    pub fn request_form(&self) -> Option<&RequestForm> {
        self.request_form.as_ref()
    }

    /// Close the form without creating a request.
    pub fn discard_request(&mut self) -> Option<RequestForm> {
        self.request_form.take()
    }

    pub fn submit_address(&mut self, address: Address) -> Result<Notice, ActionError> {
        self.request_form
            .as_mut()
            .ok_or(ActionError::NoRequestForm)?
            .submit_address(address)?;
        Ok(self.record_notice(Notice::new(
            "Address Saved",
            "Your address has been successfully saved",
        )))
    }

    pub fn back_to_address(&mut self) -> Result<(), ActionError> {
        self.request_form
            .as_mut()
            .ok_or(ActionError::NoRequestForm)?
            .back()
    }

    /// File the form as a pending request and close it. The id is one past
    /// the largest in use; the pickup time is the default slot.
    pub fn submit_event(&mut self, details: EventDetails) -> Result<Notice, ActionError> {
        let address = self
            .request_form
            .as_ref()
            .ok_or(ActionError::NoRequestForm)?
            .submit_event(&details)?;

        let id = self
            .requests
            .records()
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let (hour, minute) = constants::DEFAULT_PICKUP_TIME;
        self.requests.push(CollectionRequest {
            id,
            status: RequestStatus::Pending,
            garbage_weight: details.garbage_weight,
            date: details.date,
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default(),
            address,
            notes: details.notes.trim().to_string(),
            collected: Vec::new(),
        });
        self.request_form = None;
        tracing::info!(id, weight = details.garbage_weight, "Collection request created");
        Ok(self.record_notice(Notice::new(
            "Collection Request Created",
            "Your garbage collection request has been submitted.",
        )))
    }

    fn record_notice(&mut self, notice: Notice) -> Notice {
        if self.notices.len() >= constants::MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice.clone());
        notice
    }

    /// Notices from oldest to newest.
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    /// The first collectors in list order, as shown on the overview.
    pub fn recent_collectors(&self) -> &[Collector] {
        let records = self.collectors.records();
        &records[..records.len().min(self.recent_collectors)]
    }

    pub fn summary(&self) -> DashboardSummary {
        let mut requests = RequestCounts::default();
        for request in self.requests.records() {
            match request.status {
                RequestStatus::Pending => requests.pending += 1,
                RequestStatus::Accepted => requests.accepted += 1,
                RequestStatus::Rejected => requests.rejected += 1,
                RequestStatus::Completed => requests.completed += 1,
            }
        }

        DashboardSummary {
            zones: self.zones.records().len(),
            collectors: self.collectors.records().len(),
            active_collectors: self
                .collectors
                .records()
                .iter()
                .filter(|c| c.status == CollectorStatus::Active)
                .count(),
            collections_completed: self
                .zones
                .records()
                .iter()
                .map(|z| u64::from(z.completed))
                .sum(),
            requests,
            requested_weight_kg: self
                .requests
                .records()
                .iter()
                .map(|r| r.garbage_weight)
                .sum(),
            collected_weight_kg: self
                .requests
                .records()
                .iter()
                .map(CollectionRequest::collected_weight)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> DashboardState {
        DashboardState::new(Dataset::sample(), ViewSettings::default())
    }

    #[test]
    fn test_add_zone_assigns_next_id() {
        let mut state = dashboard();
        let notice = state.add_zone("  Lakeside  ").unwrap();
        assert_eq!(notice.description, "Lakeside has been added successfully");
        let added = state.zones.find("11").unwrap();
        assert_eq!(added.name, "Lakeside");
        assert_eq!(added.utilization, 0);
        assert!(matches!(state.add_zone("   "), Err(ActionError::EmptyZoneName)));
    }

    #[test]
    fn test_add_zone_after_delete_does_not_reuse_id() {
        let mut state = dashboard();
        state.request_delete(ViewKind::Zones, "3").unwrap();
        state.confirm_delete().unwrap();
        state.add_zone("New").unwrap();
        let ids: Vec<&str> = state.zones.records().iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids.iter().filter(|id| **id == "11").count(), 1);
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_delete_notice_names_removed_record() {
        let mut state = dashboard();
        let pending = state.request_delete(ViewKind::Collectors, "2").unwrap();
        assert_eq!(pending.title, "Jane Smith");
        let notice = state.confirm_delete().unwrap();
        assert_eq!(notice.title, "Collector Deleted");
        assert_eq!(notice.description, "Jane Smith has been removed");
        assert!(state.collectors.find("2").is_none());
        assert!(state.pending_delete().is_none());
        assert_eq!(state.notices().count(), 1);
    }

    #[test]
    fn test_cancel_and_missing_delete() {
        let mut state = dashboard();
        assert!(matches!(
            state.request_delete(ViewKind::Zones, "99"),
            Err(ActionError::NotFound { .. })
        ));
        state.request_delete(ViewKind::Zones, "1").unwrap();
        assert!(state.cancel_delete().is_some());
        assert!(matches!(state.confirm_delete(), Err(ActionError::NoPendingDelete)));
        assert_eq!(state.zones.records().len(), 10);
    }

    #[test]
    fn test_delete_on_last_page_clamps() {
        let mut state = dashboard();
        state.zones.set_filter_input("utilization", ">=70").unwrap();
        // 75, 90, 95, 85, 70, 92 -> six zones, two pages of five
        state.zones.change_page(2);
        assert_eq!(state.zones.snapshot().items.len(), 1);
        state.request_delete(ViewKind::Zones, "9").unwrap();
        state.confirm_delete().unwrap();
        let snap = state.zones.snapshot();
        assert_eq!(snap.total_pages, 1);
        assert_eq!(snap.page, 1);
        assert_eq!(snap.items.len(), 5);
    }

    #[test]
    fn test_accept_only_pending() {
        let mut state = dashboard();
        state.requests.set_filter_input("status", "pending").unwrap();
        assert_eq!(state.requests.filtered_count(), 2);

        let notice = state.accept_request("1").unwrap();
        assert_eq!(notice.title, "Collection Request Accepted");
        assert_eq!(state.requests.filtered_count(), 1);
        assert_eq!(state.requests.find("1").unwrap().status, RequestStatus::Accepted);

        match state.reject_request("1") {
            Err(ActionError::NotPending { status, .. }) => assert_eq!(status, "accepted"),
            other => panic!("unexpected: {other:?}"),
        }
        state.reject_request("2").unwrap();
        assert_eq!(state.requests.filtered_count(), 0);
        assert!(matches!(
            state.accept_request("42"),
            Err(ActionError::NotFound { .. })
        ));
    }

    #[test]
    fn test_summary_figures() {
        let state = dashboard();
        let summary = state.summary();
        assert_eq!(summary.zones, 10);
        assert_eq!(summary.collectors, 5);
        assert_eq!(summary.active_collectors, 3);
        assert_eq!(summary.collections_completed, 291);
        assert_eq!(
            summary.requests,
            RequestCounts {
                pending: 2,
                accepted: 1,
                rejected: 1,
                completed: 1,
            }
        );
        assert_eq!(summary.requested_weight_kg, 275.0);
        assert_eq!(summary.collected_weight_kg, 20.5);
    }

    #[test]
    fn test_recent_collectors_limit() {
        let state = DashboardState::new(
            Dataset::sample(),
            ViewSettings {
                page_size: 5,
                recent_collectors: 2,
            },
        );
        let names: Vec<&str> = state.recent_collectors().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith"]);
    }

    #[test]
    fn test_view_dispatch() {
        let mut state = dashboard();
        for kind in ViewKind::all() {
            assert_eq!(state.view(*kind).view(), *kind);
        }
        state.view_mut(ViewKind::Requests).set_filter_input("city", "chandigarh").unwrap();
        assert_eq!(state.requests.filtered_count(), 2);
    }

    fn canal_road() -> Address {
        Address {
            house_number: "12".to_string(),
            street: "Canal Road".to_string(),
            city: "Ludhiana".to_string(),
            district: "Ludhiana".to_string(),
            state: "Punjab".to_string(),
            pincode: "141001".to_string(),
        }
    }

    fn pickup(weight: f64) -> EventDetails {
        EventDetails {
            garbage_weight: weight,
            date: chrono::NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            notes: " Side gate ".to_string(),
        }
    }

    #[test]
    fn test_request_wizard_creates_pending_request() {
        let mut state = dashboard();
        state.requests.set_filter_input("status", "pending").unwrap();
        assert!(matches!(
            state.submit_address(canal_road()),
            Err(ActionError::NoRequestForm)
        ));

        state.start_request();
        let saved = state.submit_address(canal_road()).unwrap();
        assert_eq!(saved.title, "Address Saved");
        state.back_to_address().unwrap();
        state.submit_address(canal_road()).unwrap();

        let notice = state.submit_event(pickup(18.0)).unwrap();
        assert_eq!(notice.title, "Collection Request Created");
        assert_eq!(
            notice.description,
            "Your garbage collection request has been submitted."
        );
        assert!(state.request_form().is_none());

        let created = state.requests.find("6").unwrap();
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.time.format("%H:%M").to_string(), "10:00");
        assert_eq!(created.notes, "Side gate");
        assert_eq!(created.address.city, "Ludhiana");
        assert_eq!(state.requests.filtered_count(), 3, "filtered set refreshed");
    }

    #[test]
    fn test_request_wizard_rejects_zero_weight() {
        let mut state = dashboard();
        state.start_request();
        state.submit_address(canal_road()).unwrap();
        assert!(matches!(
            state.submit_event(pickup(0.0)),
            Err(ActionError::InvalidInput(_))
        ));
        assert!(state.request_form().is_some(), "form stays open after a bad submit");
        assert_eq!(state.requests.records().len(), 5);
        assert!(state.discard_request().is_some());
    }

    #[test]
    fn test_record_collected_item() {
        let mut state = dashboard();
        let notice = state.record_collected_item("3", "aluminium-cans", 6.5).unwrap();
        assert_eq!(notice.title, "Item Recorded");
        assert_eq!(
            notice.description,
            "6.5 kg of Aluminium cans recorded for collection request #3"
        );
        state.record_collected_item("3", "paper", 2.0).unwrap();
        assert_eq!(state.requests.find("3").unwrap().collected_weight(), 8.5);
        assert_eq!(state.summary().collected_weight_kg, 29.0);

        assert!(matches!(
            state.record_collected_item("1", "paper", 2.0),
            Err(ActionError::NotCollectable { status: "pending", .. })
        ));
        assert!(matches!(
            state.record_collected_item("3", "paper", 0.0),
            Err(ActionError::InvalidInput(_))
        ));
        assert!(matches!(
            state.record_collected_item("77", "paper", 1.0),
            Err(ActionError::NotFound { .. })
        ));
        assert_eq!(state.requests.find("3").unwrap().collected.len(), 2);
    }

    #[test]
    fn test_update_collector_refreshes_filters() {
        let mut state = dashboard();
        state.collectors.set_filter_input("status", "active").unwrap();
        assert_eq!(state.collectors.filtered_count(), 3);

        let notice = state.update_collector("1", "status", "inactive").unwrap();
        assert_eq!(notice.title, "Collector Updated");
        assert_eq!(notice.description, "John Doe's information has been updated");
        assert_eq!(state.collectors.filtered_count(), 2);

        state.update_collector("1", "name", "John Q. Doe").unwrap();
        assert_eq!(state.collectors.find("1").unwrap().name, "John Q. Doe");
        assert!(matches!(
            state.update_collector("1", "email", "not-an-email"),
            Err(ActionError::InvalidInput(_))
        ));
        assert!(matches!(
            state.update_collector("9", "name", "Nobody"),
            Err(ActionError::NotFound { .. })
        ));
    }
}
