//! State behind a competition list: the public catalog or one tab of the
//! admin back office.
//!
//! Mutations are never applied locally. Each successful create, update,
//! archive or delete is followed by a full re-fetch of the current tab.

use chrono::{DateTime, Utc};
use storage::{
    dto::{
        competition::{CreateCompetitionRequest, UpdateCompetitionRequest},
        filter::{CompetitionQuery, FilterSelection, ListOrder},
    },
    models::Competition,
    services::filter,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ClientError, Result};
use crate::facade::QueryFacade;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Loaded,
    Empty,
    Editing(EditTarget),
    /// An archive, restore or delete call is in flight
    Mutating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A dismissible message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn info(title: &str, message: &str) -> Self {
        Self {
            level: Level::Info,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn error(title: &str, error: &ClientError) -> Self {
        Self {
            level: Level::Error,
            title: title.to_string(),
            message: error.to_string(),
        }
    }
}

/// What to show when no competition is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The search text matched nothing
    SearchMiss,
    /// The filter selection matched nothing
    FilterMiss,
    /// The archived tab has nothing in it
    NoArchived,
    /// Nothing has been created yet
    NothingYet,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            Self::SearchMiss => "Try adjusting your search query",
            Self::FilterMiss => "Try adjusting your filter criteria",
            Self::NoArchived => "No archived competitions found",
            Self::NothingYet => "Start by adding a new competition",
        }
    }

    /// Whether the empty state offers to create a competition
    pub fn offers_create(&self) -> bool {
        matches!(self, Self::NothingYet)
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Handle on one issued fetch. Only the newest ticket may replace the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: CompetitionQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &CompetitionQuery {
        &self.query
    }
}

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this competition?";

pub struct ListController {
    facade: QueryFacade,
    archived: bool,
    order: ListOrder,
    selection: FilterSelection,
    search: String,
    records: Vec<Competition>,
    state: ViewState,
    form: Option<CreateCompetitionRequest>,
    notifications: Vec<Notification>,
    generation: u64,
}

impl ListController {
    /// Public catalog: active competitions in store order
    pub fn catalog(facade: QueryFacade) -> Self {
        Self::new(facade, false, ListOrder::Store)
    }

    /// Admin list for the active or archived tab, newest first
    pub fn admin(facade: QueryFacade, archived: bool) -> Self {
        Self::new(facade, archived, ListOrder::Newest)
    }

    fn new(facade: QueryFacade, archived: bool, order: ListOrder) -> Self {
        Self {
            facade,
            archived,
            order,
            selection: FilterSelection::all(),
            search: String::new(),
            records: Vec::new(),
            state: ViewState::Loading,
            form: None,
            notifications: Vec::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_archived_tab(&self) -> bool {
        self.archived
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    /// The full record collection of the last successful fetch
    pub fn records(&self) -> &[Competition] {
        &self.records
    }

    pub fn form(&self) -> Option<&CreateCompetitionRequest> {
        self.form.as_ref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        (index < self.notifications.len()).then(|| self.notifications.remove(index))
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Start a fetch of the current tab and selection
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        if !matches!(self.state, ViewState::Editing(_)) {
            self.state = ViewState::Loading;
        }

        FetchTicket {
            generation: self.generation,
            query: CompetitionQuery::new(self.selection.clone(), self.archived, self.order),
        }
    }

    /// Apply the outcome of a fetch.
    ///
    /// Results of superseded tickets are dropped. A failure keeps the
    /// previous records and raises one error notification.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Competition>>,
    ) -> Result<()> {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "Discarding superseded fetch"
            );
            return Ok(());
        }

        match result {
            Ok(records) => {
                self.records = records;
                self.settle();
                Ok(())
            }
            Err(e) => {
                self.notifications
                    .push(Notification::error("Error fetching competitions", &e));
                self.settle();
                Err(e)
            }
        }
    }

    /// Re-fetch the current tab
    pub async fn refresh(&mut self) -> Result<()> {
        let ticket = self.begin_fetch();
        let result = self
            .facade
            .fetch_at(ticket.query(), Utc::now())
            .await;
        self.complete_fetch(ticket, result)
    }

    /// Switch between the active and archived tab and load it
    pub async fn switch_tab(&mut self, archived: bool) -> Result<()> {
        self.archived = archived;
        self.records.clear();
        self.refresh().await
    }

    /// Replace the filter selection and load the matching records
    pub async fn set_selection(&mut self, selection: FilterSelection) -> Result<()> {
        self.selection = selection;
        self.refresh().await
    }

    pub async fn clear_filters(&mut self) -> Result<()> {
        self.set_selection(FilterSelection::all()).await
    }

    /// Title search over the loaded records; never reaches the backend
    pub fn search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Records passing the selection and the search
    pub fn visible(&self) -> Vec<Competition> {
        self.visible_at(Utc::now())
    }

    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<Competition> {
        let filtered = filter::apply_at(&self.records, &self.selection, now);
        filter::search(&filtered, &self.search)
    }

    /// Contextual empty state, or `None` when something is visible
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible().is_empty() {
            return None;
        }

        Some(if !self.search.trim().is_empty() {
            EmptyState::SearchMiss
        } else if !self.selection.is_unconstrained() {
            EmptyState::FilterMiss
        } else if self.archived {
            EmptyState::NoArchived
        } else {
            EmptyState::NothingYet
        })
    }

    /// Open the form: `None` creates, `Some` edits a copy of the record
    pub fn edit(&mut self, record: Option<&Competition>) -> &CreateCompetitionRequest {
        let (target, form) = match record {
            Some(record) => (
                EditTarget::Existing(record.id),
                CreateCompetitionRequest::from(record),
            ),
            None => (EditTarget::New, CreateCompetitionRequest::default()),
        };

        self.state = ViewState::Editing(target);
        self.form.insert(form)
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.state, ViewState::Editing(_)) {
            self.form = None;
            self.state = ViewState::Loaded;
            self.settle();
        }
    }

    /// Validate and store the open form.
    ///
    /// Validation failures leave the form open and raise no notification.
    pub async fn submit(&mut self, form: CreateCompetitionRequest) -> Result<Competition> {
        let ViewState::Editing(target) = self.state else {
            return Err(ClientError::NotEditing);
        };

        if let Err(errors) = form.validate() {
            self.form = Some(form);
            return Err(errors.into());
        }

        let backend = self.facade.backend();
        let result = match target {
            EditTarget::New => backend.create(&form).await,
            EditTarget::Existing(id) => {
                backend
                    .update(id, &UpdateCompetitionRequest::from(form.clone()))
                    .await
            }
        };

        match result {
            Ok(competition) => {
                let (title, message) = match target {
                    EditTarget::New => (
                        "Competition created",
                        "The competition has been created successfully.",
                    ),
                    EditTarget::Existing(_) => (
                        "Competition updated",
                        "The competition has been updated successfully.",
                    ),
                };
                self.notifications.push(Notification::info(title, message));
                self.form = None;
                self.state = ViewState::Loading;
                self.reload_after_mutation().await;
                Ok(competition)
            }
            Err(e) => {
                self.notifications.push(Notification::error("Error", &e));
                self.form = Some(form);
                Err(e)
            }
        }
    }

    /// Move a competition in or out of the archive, then reload
    pub async fn archive(&mut self, id: Uuid, archived: bool) -> Result<()> {
        self.state = ViewState::Mutating;

        match self.facade.backend().set_archived(id, archived).await {
            Ok(_) => {
                let notification = if archived {
                    Notification::info(
                        "Competition archived",
                        "The competition has been moved to archives.",
                    )
                } else {
                    Notification::info(
                        "Competition restored",
                        "The competition has been restored from archives.",
                    )
                };
                self.notifications.push(notification);
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                self.notifications.push(Notification::error("Error", &e));
                self.settle();
                Err(e)
            }
        }
    }

    /// Delete a competition after confirmation, then reload.
    ///
    /// Returns `false` when the user declined and nothing was sent.
    pub async fn delete(&mut self, id: Uuid, confirm: &dyn Confirm) -> Result<bool> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }

        self.state = ViewState::Mutating;

        match self.facade.backend().delete(id).await {
            Ok(()) => {
                self.notifications.push(Notification::info(
                    "Competition deleted",
                    "The competition has been permanently deleted.",
                ));
                self.reload_after_mutation().await;
                Ok(true)
            }
            Err(e) => {
                self.notifications.push(Notification::error("Error", &e));
                self.settle();
                Err(e)
            }
        }
    }

    /// Reload after a write that already succeeded. A failed reload has
    /// raised its own notification and does not fail the write.
    async fn reload_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!(error = %e, "Reload after mutation failed");
        }
    }

    fn settle(&mut self) {
        if matches!(self.state, ViewState::Editing(_)) {
            return;
        }
        self.state = if self.records.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Loaded
        };
    }
}
