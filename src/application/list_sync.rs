//! List-Sync view: one paginated server collection shown page by page.
//!
//! The view never edits its rows locally. Every accepted mutation is followed
//! by a re-fetch of the affected page, and every fetch carries a ticket so a
//! response that arrives after the user moved on is dropped instead of applied.
//!
//! [`ListSyncView`] is the synchronous state machine; [`ListSyncController`]
//! drives it against a [`ListSource`] and reports outcomes to a [`Notifier`].

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    application::{
        error::ApiError,
        notify::{Notifier, Toast, sentence_case},
        session::SessionStore,
    },
    domain::{
        error::DomainError,
        mutation::{MutationKind, PendingMutation},
        pagination::{Page, PageFetch, PageRequest, last_page},
    },
};

/// Redirects followed when the collection keeps shrinking under a fetch.
const MAX_PAGE_REDIRECTS: usize = 3;

/// A record that can be addressed inside a page.
pub trait ListRow {
    fn row_id(&self) -> &str;

    /// Server-side status shown in the row, if the resource has one.
    fn row_status(&self) -> Option<&str> {
        None
    }
}

/// Remote collection backing a list view.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: ListRow + Clone + Send + Sync;

    /// Singular, lower-case resource name used in notifications and metrics.
    fn label(&self) -> &'static str;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageFetch<Self::Item>, ApiError>;

    async fn apply(&self, mutation: &PendingMutation) -> Result<(), ApiError>;

    /// Whether `kind` may be offered for `row`.
    fn permits(&self, _row: &Self::Item, _kind: &MutationKind) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListSyncError {
    #[error("page {requested} is outside 1..={last}")]
    PageOutOfRange { requested: u32, last: u32 },
    #[error("another action is still in progress")]
    Busy,
    #[error("no action is awaiting confirmation")]
    NothingToConfirm,
    #[error("row `{0}` is not on the current page")]
    UnknownRow(String),
    #[error("cannot {action} row `{id}` in its current state")]
    ActionUnavailable { action: &'static str, id: String },
    #[error("the list is not ready for that ({state})")]
    NotReady { state: &'static str },
    #[error("sign in required before loading this list")]
    Unauthenticated,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone)]
pub enum ViewState<T> {
    Idle {
        page: u32,
    },
    Loading {
        page: u32,
    },
    Loaded {
        page: Page<T>,
    },
    Error {
        page: u32,
        error: ApiError,
    },
    ConfirmingAction {
        page: Page<T>,
        pending: PendingMutation,
    },
    Mutating {
        page: Page<T>,
        pending: PendingMutation,
    },
}

impl<T> ViewState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "idle",
            Self::Loading { .. } => "loading",
            Self::Loaded { .. } => "loaded",
            Self::Error { .. } => "error",
            Self::ConfirmingAction { .. } => "confirming",
            Self::Mutating { .. } => "mutating",
        }
    }

    pub fn page_number(&self) -> u32 {
        match self {
            Self::Idle { page } | Self::Loading { page } | Self::Error { page, .. } => *page,
            Self::Loaded { page }
            | Self::ConfirmingAction { page, .. }
            | Self::Mutating { page, .. } => page.number(),
        }
    }

    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            Self::Loaded { page }
            | Self::ConfirmingAction { page, .. }
            | Self::Mutating { page, .. } => Some(page),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingMutation> {
        match self {
            Self::ConfirmingAction { pending, .. } | Self::Mutating { pending, .. } => {
                Some(pending)
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    fn busy(&self) -> bool {
        matches!(self, Self::ConfirmingAction { .. } | Self::Mutating { .. })
    }
}

/// Permission to complete the `Loading` state for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: PageRequest,
}

impl FetchTicket {
    pub fn request(self) -> PageRequest {
        self.request
    }

    pub fn page(self) -> u32 {
        self.request.page()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket {
    seq: u64,
    pending: PendingMutation,
}

impl MutationTicket {
    pub fn pending(&self) -> &PendingMutation {
        &self.pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    Failed(ApiError),
    /// The requested page no longer exists; load this one instead.
    Redirected(FetchTicket),
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionStep {
    AwaitingConfirmation,
    Dispatch(MutationTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Committed { refetch: FetchTicket },
    RolledBack(ApiError),
    Superseded,
}

#[derive(Debug)]
pub struct ListSyncView<T> {
    state: ViewState<T>,
    page_size: u32,
    known_last_page: Option<u32>,
    fetch_seq: u64,
    active_fetch: Option<u64>,
    mutation_seq: u64,
    active_mutation: Option<u64>,
}

impl<T: ListRow + Clone> ListSyncView<T> {
    /// A fresh view in `Loading(1)`; call [`Self::reload`] for its first ticket.
    pub fn new(page_size: u32) -> Result<Self, DomainError> {
        PageRequest::new(1, page_size)?;
        Ok(Self {
            state: ViewState::Loading { page: 1 },
            page_size,
            known_last_page: None,
            fetch_seq: 0,
            active_fetch: None,
            mutation_seq: 0,
            active_mutation: None,
        })
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.state.page_number()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    /// Row actions are only offered on a settled page.
    pub fn is_action_enabled(&self) -> bool {
        matches!(self.state, ViewState::Loaded { .. })
    }

    pub fn row(&self, id: &str) -> Option<&T> {
        self.state
            .page()
            .and_then(|page| page.items().iter().find(|row| row.row_id() == id))
    }

    /// Status to display for a row, preferring the value of an in-flight change.
    pub fn displayed_status<'a>(&'a self, row_id: &str, server_value: &'a str) -> &'a str {
        match &self.state {
            ViewState::Mutating { pending, .. } if pending.target_id().as_str() == row_id => {
                pending.optimistic_value().unwrap_or(server_value)
            }
            _ => server_value,
        }
    }

    /// Re-enter `Loading` for the current page, superseding any fetch in flight.
    pub fn reload(&mut self) -> Result<FetchTicket, ListSyncError> {
        if self.state.busy() {
            return Err(ListSyncError::Busy);
        }
        let page = self.current_page();
        self.begin_fetch(page)
    }

    pub fn go_to_page(&mut self, page: u32) -> Result<FetchTicket, ListSyncError> {
        if self.state.busy() {
            return Err(ListSyncError::Busy);
        }
        let last = match &self.state {
            ViewState::Loaded { page } => page.last_page(),
            _ => self.known_last_page.unwrap_or(1),
        };
        if page == 0 || page > last {
            return Err(ListSyncError::PageOutOfRange {
                requested: page,
                last,
            });
        }
        self.begin_fetch(page)
    }

    /// Enter the list at `page` without a known page count, e.g. from a saved
    /// location. A page past the end comes back as a redirect to the last one.
    pub fn open(&mut self, page: u32) -> Result<FetchTicket, ListSyncError> {
        if self.state.busy() {
            return Err(ListSyncError::Busy);
        }
        if page == 0 {
            return Err(ListSyncError::PageOutOfRange {
                requested: page,
                last: self.known_last_page.unwrap_or(1),
            });
        }
        self.begin_fetch(page)
    }

    pub fn retry(&mut self) -> Result<FetchTicket, ListSyncError> {
        match self.state {
            ViewState::Error { page, .. } => self.begin_fetch(page),
            ref other => Err(ListSyncError::NotReady {
                state: other.name(),
            }),
        }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageFetch<T>, ApiError>,
    ) -> FetchOutcome {
        let current = matches!(self.state, ViewState::Loading { page } if page == ticket.page());
        if self.active_fetch != Some(ticket.seq) || !current {
            debug!(
                target = "gratiswag_admin::list_sync",
                page = ticket.page(),
                "discarding superseded page response"
            );
            return FetchOutcome::Superseded;
        }
        self.active_fetch = None;

        match result {
            Ok(PageFetch::Page(page)) if page.number() == ticket.page() => {
                self.known_last_page = Some(page.last_page());
                self.state = ViewState::Loaded { page };
                FetchOutcome::Loaded
            }
            Ok(PageFetch::Page(page)) => self.fail_fetch(
                ticket.page(),
                ApiError::malformed(format!(
                    "asked for page {} but the server answered page {}",
                    ticket.page(),
                    page.number()
                )),
            ),
            Ok(PageFetch::BeyondEnd { total_pages, .. }) => {
                let target = last_page(total_pages);
                if target >= ticket.page() {
                    return self.fail_fetch(
                        ticket.page(),
                        ApiError::malformed(format!(
                            "page {} reported out of range with {total_pages} pages",
                            ticket.page()
                        )),
                    );
                }
                self.known_last_page = Some(target);
                match self.begin_fetch(target) {
                    Ok(next) => FetchOutcome::Redirected(next),
                    Err(err) => {
                        self.fail_fetch(ticket.page(), ApiError::malformed(err.to_string()))
                    }
                }
            }
            Err(error) => self.fail_fetch(ticket.page(), error),
        }
    }

    pub fn request_action(
        &mut self,
        mutation: PendingMutation,
    ) -> Result<ActionStep, ListSyncError> {
        let state = std::mem::replace(&mut self.state, ViewState::Idle { page: 1 });
        match state {
            ViewState::Loaded { page } => {
                let known = page
                    .items()
                    .iter()
                    .any(|row| row.row_id() == mutation.target_id().as_str());
                if !known {
                    let id = mutation.target_id().to_string();
                    self.state = ViewState::Loaded { page };
                    return Err(ListSyncError::UnknownRow(id));
                }
                if mutation.kind().is_destructive() {
                    self.state = ViewState::ConfirmingAction {
                        page,
                        pending: mutation,
                    };
                    Ok(ActionStep::AwaitingConfirmation)
                } else {
                    let ticket = self.begin_mutation(page, mutation);
                    Ok(ActionStep::Dispatch(ticket))
                }
            }
            other => {
                let err = if other.busy() {
                    ListSyncError::Busy
                } else {
                    ListSyncError::NotReady {
                        state: other.name(),
                    }
                };
                self.state = other;
                Err(err)
            }
        }
    }

    pub fn confirm(&mut self) -> Result<MutationTicket, ListSyncError> {
        let state = std::mem::replace(&mut self.state, ViewState::Idle { page: 1 });
        match state {
            ViewState::ConfirmingAction { page, pending } => {
                Ok(self.begin_mutation(page, pending))
            }
            other => {
                let err = if matches!(other, ViewState::Mutating { .. }) {
                    ListSyncError::Busy
                } else {
                    ListSyncError::NothingToConfirm
                };
                self.state = other;
                Err(err)
            }
        }
    }

    pub fn cancel(&mut self) -> Result<(), ListSyncError> {
        let state = std::mem::replace(&mut self.state, ViewState::Idle { page: 1 });
        match state {
            ViewState::ConfirmingAction { page, .. } => {
                self.state = ViewState::Loaded { page };
                Ok(())
            }
            other => {
                self.state = other;
                Err(ListSyncError::NothingToConfirm)
            }
        }
    }

    pub fn complete_mutation(
        &mut self,
        ticket: &MutationTicket,
        result: Result<(), ApiError>,
    ) -> MutationOutcome {
        if self.active_mutation != Some(ticket.seq)
            || !matches!(self.state, ViewState::Mutating { .. })
        {
            debug!(
                target = "gratiswag_admin::list_sync",
                id = %ticket.pending.target_id(),
                "discarding mutation result for a detached view"
            );
            return MutationOutcome::Superseded;
        }
        self.active_mutation = None;

        let state = std::mem::replace(&mut self.state, ViewState::Idle { page: 1 });
        let ViewState::Mutating { page, pending } = state else {
            self.state = state;
            return MutationOutcome::Superseded;
        };

        match result {
            Ok(()) => {
                let emptied = matches!(pending.kind(), MutationKind::Delete)
                    && page.items().len() == 1
                    && page.number() > 1;
                let target = if emptied {
                    page.number() - 1
                } else {
                    page.number()
                };
                match self.begin_fetch(target) {
                    Ok(refetch) => MutationOutcome::Committed { refetch },
                    Err(err) => {
                        warn!(
                            target = "gratiswag_admin::list_sync",
                            error = %err,
                            "failed to schedule refetch after mutation"
                        );
                        self.state = ViewState::Loaded { page };
                        MutationOutcome::RolledBack(ApiError::malformed(err.to_string()))
                    }
                }
            }
            Err(error) => {
                self.state = ViewState::Loaded { page };
                MutationOutcome::RolledBack(error)
            }
        }
    }

    /// Park the view after the session went away; in-flight results are dropped.
    pub fn suspend(&mut self) {
        let page = self.current_page();
        self.state = ViewState::Idle { page };
        self.active_fetch = None;
        self.active_mutation = None;
    }

    fn begin_fetch(&mut self, page: u32) -> Result<FetchTicket, ListSyncError> {
        let request = PageRequest::new(page, self.page_size)?;
        self.fetch_seq += 1;
        self.active_fetch = Some(self.fetch_seq);
        self.state = ViewState::Loading { page };
        Ok(FetchTicket {
            seq: self.fetch_seq,
            request,
        })
    }

    fn begin_mutation(&mut self, page: Page<T>, pending: PendingMutation) -> MutationTicket {
        self.mutation_seq += 1;
        self.active_mutation = Some(self.mutation_seq);
        let ticket = MutationTicket {
            seq: self.mutation_seq,
            pending: pending.clone(),
        };
        self.state = ViewState::Mutating { page, pending };
        ticket
    }

    fn fail_fetch(&mut self, page: u32, error: ApiError) -> FetchOutcome {
        self.state = ViewState::Error {
            page,
            error: error.clone(),
        };
        FetchOutcome::Failed(error)
    }
}

/// How a triggered or confirmed action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    AwaitingConfirmation,
    Committed,
    RolledBack(ApiError),
    Discarded,
}

/// Drives a [`ListSyncView`] against its remote source.
pub struct ListSyncController<S: ListSource> {
    source: S,
    sessions: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    view: ListSyncView<S::Item>,
}

impl<S: ListSource> ListSyncController<S> {
    pub fn new(
        source: S,
        sessions: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
    ) -> Result<Self, ListSyncError> {
        Ok(Self {
            source,
            sessions,
            notifier,
            view: ListSyncView::new(page_size)?,
        })
    }

    pub fn view(&self) -> &ListSyncView<S::Item> {
        &self.view
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the current page. Remote failures land in `ViewState::Error`.
    pub async fn load(&mut self) -> Result<(), ListSyncError> {
        self.ensure_session()?;
        let ticket = self.view.reload()?;
        self.run_fetch(ticket).await
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<(), ListSyncError> {
        self.ensure_session()?;
        let ticket = self.view.go_to_page(page)?;
        self.run_fetch(ticket).await
    }

    pub async fn open(&mut self, page: u32) -> Result<(), ListSyncError> {
        self.ensure_session()?;
        let ticket = self.view.open(page)?;
        self.run_fetch(ticket).await
    }

    pub async fn retry(&mut self) -> Result<(), ListSyncError> {
        self.ensure_session()?;
        let ticket = self.view.retry()?;
        self.run_fetch(ticket).await
    }

    pub async fn trigger(&mut self, mutation: PendingMutation) -> Result<ActionResult, ListSyncError> {
        self.ensure_session()?;
        if let Some(row) = self.view.row(mutation.target_id().as_str())
            && !self.source.permits(row, mutation.kind())
        {
            return Err(ListSyncError::ActionUnavailable {
                action: mutation.kind().verb(),
                id: mutation.target_id().to_string(),
            });
        }
        match self.view.request_action(mutation)? {
            ActionStep::AwaitingConfirmation => Ok(ActionResult::AwaitingConfirmation),
            ActionStep::Dispatch(ticket) => self.run_mutation(ticket).await,
        }
    }

    pub async fn confirm(&mut self) -> Result<ActionResult, ListSyncError> {
        self.ensure_session()?;
        let ticket = self.view.confirm()?;
        self.run_mutation(ticket).await
    }

    pub fn cancel(&mut self) -> Result<(), ListSyncError> {
        self.view.cancel()
    }

    pub fn detach(&mut self) {
        self.view.suspend();
    }

    fn ensure_session(&mut self) -> Result<(), ListSyncError> {
        if self.sessions.is_authenticated() {
            return Ok(());
        }
        self.view.suspend();
        Err(ListSyncError::Unauthenticated)
    }

    async fn run_fetch(&mut self, mut ticket: FetchTicket) -> Result<(), ListSyncError> {
        for _ in 0..=MAX_PAGE_REDIRECTS {
            self.ensure_session()?;
            let result = self.source.fetch_page(ticket.request()).await;
            match self.view.complete_fetch(ticket, result) {
                FetchOutcome::Loaded | FetchOutcome::Superseded => return Ok(()),
                FetchOutcome::Failed(error) => {
                    debug!(
                        target = "gratiswag_admin::list_sync",
                        resource = self.source.label(),
                        page = ticket.page(),
                        error = %error,
                        "page fetch failed"
                    );
                    return Ok(());
                }
                FetchOutcome::Redirected(next) => {
                    debug!(
                        target = "gratiswag_admin::list_sync",
                        resource = self.source.label(),
                        from = ticket.page(),
                        to = next.page(),
                        "requested page no longer exists"
                    );
                    ticket = next;
                }
            }
        }
        self.view.complete_fetch(
            ticket,
            Err(ApiError::malformed("page count kept shrinking while loading")),
        );
        Ok(())
    }

    async fn run_mutation(&mut self, ticket: MutationTicket) -> Result<ActionResult, ListSyncError> {
        let label = self.source.label();
        let result = self.source.apply(ticket.pending()).await;
        let kind = ticket.pending().kind().clone();
        match self.view.complete_mutation(&ticket, result) {
            MutationOutcome::Committed { refetch } => {
                self.notifier.notify(Toast::success(format!(
                    "{} {} successfully",
                    sentence_case(label),
                    kind.past_tense()
                )));
                counter!("gratiswag_list_refetch_total", "resource" => label).increment(1);
                self.run_fetch(refetch).await?;
                Ok(ActionResult::Committed)
            }
            MutationOutcome::RolledBack(error) => {
                self.notifier.notify(Toast::error(format!(
                    "Failed to {} {label}: {}",
                    kind.verb(),
                    error.message()
                )));
                Ok(ActionResult::RolledBack(error))
            }
            MutationOutcome::Superseded => Ok(ActionResult::Discarded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::RecordId;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        status: String,
    }

    impl ListRow for Row {
        fn row_id(&self) -> &str {
            &self.id
        }

        fn row_status(&self) -> Option<&str> {
            Some(&self.status)
        }
    }

    fn rows(ids: &[&str]) -> Vec<Row> {
        ids.iter()
            .map(|id| Row {
                id: (*id).to_string(),
                status: "pending".to_string(),
            })
            .collect()
    }

    fn page(ids: &[&str], number: u32, total_items: u64, total_pages: u32) -> PageFetch<Row> {
        PageFetch::Page(Page::new(rows(ids), number, 10, total_items, total_pages).expect("page"))
    }

    fn id(value: &str) -> RecordId {
        RecordId::new(value).expect("id")
    }

    fn loaded_view(ids: &[&str], number: u32, total_items: u64, total_pages: u32) -> ListSyncView<Row> {
        let mut view = ListSyncView::new(10).expect("view");
        let ticket = view.reload().expect("ticket");
        view.complete_fetch(ticket, Ok(page(ids, 1, total_items, total_pages)));
        if number != 1 {
            let ticket = view.go_to_page(number).expect("page ticket");
            view.complete_fetch(ticket, Ok(page(ids, number, total_items, total_pages)));
        }
        assert_eq!(view.state().name(), "loaded");
        view
    }

    #[test]
    fn starts_loading_first_page() {
        let view = ListSyncView::<Row>::new(10).expect("view");
        assert_eq!(view.state().name(), "loading");
        assert_eq!(view.current_page(), 1);
        assert!(ListSyncView::<Row>::new(0).is_err());
    }

    #[test]
    fn page_change_replaces_items() {
        let mut view = loaded_view(&["a", "b"], 1, 21, 3);
        let ticket = view.go_to_page(2).expect("ticket");
        assert_eq!(ticket.request().query_pairs()[0].1, "2");
        assert!(view.is_loading());

        assert_eq!(
            view.complete_fetch(ticket, Ok(page(&["c", "d"], 2, 21, 3))),
            FetchOutcome::Loaded
        );
        let current = view.state().page().expect("page");
        assert_eq!(current.number(), 2);
        assert_eq!(current.items()[0].id, "c");
    }

    #[test]
    fn out_of_range_pages_are_rejected_locally() {
        let mut view = loaded_view(&["a"], 1, 21, 3);
        assert_eq!(
            view.go_to_page(4),
            Err(ListSyncError::PageOutOfRange {
                requested: 4,
                last: 3
            })
        );
        assert!(matches!(
            view.go_to_page(0),
            Err(ListSyncError::PageOutOfRange { .. })
        ));
        assert_eq!(view.state().name(), "loaded");
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut view = loaded_view(&["a"], 1, 30, 3);
        let stale = view.go_to_page(2).expect("page 2");
        let fresh = view.go_to_page(3).expect("page 3");

        assert_eq!(
            view.complete_fetch(stale, Ok(page(&["b"], 2, 30, 3))),
            FetchOutcome::Superseded
        );
        assert!(view.is_loading());
        assert_eq!(view.current_page(), 3);

        assert_eq!(
            view.complete_fetch(fresh, Ok(page(&["c"], 3, 30, 3))),
            FetchOutcome::Loaded
        );
        assert_eq!(view.state().page().expect("page").items()[0].id, "c");
    }

    #[test]
    fn fetch_failure_enters_error_and_retry_reloads() {
        let mut view = ListSyncView::<Row>::new(10).expect("view");
        let ticket = view.reload().expect("ticket");
        let outcome = view.complete_fetch(ticket, Err(ApiError::network("offline")));
        assert_eq!(outcome, FetchOutcome::Failed(ApiError::network("offline")));
        assert_eq!(view.state().name(), "error");

        let retry = view.retry().expect("retry");
        assert_eq!(retry.page(), 1);
        assert!(view.is_loading());
    }

    #[test]
    fn delete_requires_confirmation_and_cancel_restores() {
        let mut view = loaded_view(&["a", "b"], 1, 2, 1);
        let step = view
            .request_action(PendingMutation::delete(id("a")))
            .expect("step");
        assert_eq!(step, ActionStep::AwaitingConfirmation);
        assert_eq!(view.state().name(), "confirming");
        assert!(!view.is_action_enabled());

        view.cancel().expect("cancel");
        assert_eq!(view.state().name(), "loaded");
        assert_eq!(view.state().page().expect("page").items().len(), 2);
    }

    #[test]
    fn second_trigger_while_mutating_is_rejected() {
        let mut view = loaded_view(&["a", "b"], 1, 2, 1);
        let step = view
            .request_action(PendingMutation::approve(id("a")))
            .expect("dispatch");
        assert!(matches!(step, ActionStep::Dispatch(_)));
        assert_eq!(
            view.request_action(PendingMutation::approve(id("a"))),
            Err(ListSyncError::Busy)
        );
        assert_eq!(view.confirm(), Err(ListSyncError::Busy));
        assert!(matches!(view.reload(), Err(ListSyncError::Busy)));
    }

    #[test]
    fn deleting_last_row_of_later_page_refetches_previous_page() {
        let mut view = loaded_view(&["k"], 2, 11, 2);
        view.request_action(PendingMutation::delete(id("k")))
            .expect("confirming");
        let ticket = view.confirm().expect("mutating");
        match view.complete_mutation(&ticket, Ok(())) {
            MutationOutcome::Committed { refetch } => assert_eq!(refetch.page(), 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn failed_mutation_restores_rows_and_optimistic_status() {
        let mut view = loaded_view(&["o1"], 1, 1, 1);
        let ActionStep::Dispatch(ticket) = view
            .request_action(PendingMutation::status_change(id("o1"), "delivered"))
            .expect("dispatch")
        else {
            panic!("status change should dispatch immediately");
        };
        assert_eq!(view.displayed_status("o1", "pending"), "delivered");

        let outcome = view.complete_mutation(&ticket, Err(ApiError::from_status(500, None)));
        assert!(matches!(outcome, MutationOutcome::RolledBack(_)));
        assert_eq!(view.state().name(), "loaded");
        assert_eq!(view.displayed_status("o1", "pending"), "pending");
    }

    #[test]
    fn beyond_end_response_redirects_to_last_page() {
        let mut view = loaded_view(&["a"], 3, 21, 3);
        let ticket = view.reload().expect("ticket");
        let outcome = view.complete_fetch(
            ticket,
            Ok(PageFetch::BeyondEnd {
                total_items: 20,
                total_pages: 2,
            }),
        );
        match outcome {
            FetchOutcome::Redirected(next) => assert_eq!(next.page(), 2),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn open_skips_range_check_until_the_page_count_is_known() {
        let mut view = ListSyncView::<Row>::new(10).expect("view");
        assert!(matches!(
            view.go_to_page(4),
            Err(ListSyncError::PageOutOfRange { requested: 4, last: 1 })
        ));
        let ticket = view.open(4).expect("ticket");
        assert_eq!(ticket.page(), 4);
        assert_eq!(
            view.complete_fetch(ticket, Ok(page(&["x"], 4, 31, 4))),
            FetchOutcome::Loaded
        );
        assert!(matches!(
            view.open(0),
            Err(ListSyncError::PageOutOfRange { requested: 0, .. })
        ));
    }

    #[test]
    fn suspend_parks_view_and_drops_late_results() {
        let mut view = loaded_view(&["a"], 1, 1, 1);
        let ticket = view.reload().expect("ticket");
        view.suspend();
        assert_eq!(view.state().name(), "idle");
        assert_eq!(
            view.complete_fetch(ticket, Ok(page(&["a"], 1, 1, 1))),
            FetchOutcome::Superseded
        );
    }

    #[test]
    fn unknown_rows_cannot_be_targeted() {
        let mut view = loaded_view(&["a"], 1, 1, 1);
        assert_eq!(
            view.request_action(PendingMutation::delete(id("zzz"))),
            Err(ListSyncError::UnknownRow("zzz".to_string()))
        );
        assert_eq!(view.state().name(), "loaded");
    }
}
