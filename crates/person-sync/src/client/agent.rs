//! # Client Sync Agent
//!
//! Drives a client [`Document`] from user actions and server replies. The agent owns the
//! document, the [`ViewRegistry`] of rendered persons, and the list of user-visible
//! notices.
//!
//! ## Confirm, then render
//!
//! A write is reflected in the document only after the server confirmed it, and what gets
//! rendered is the server's reply, not the payload that was sent. A failed request leaves
//! the document byte-for-byte as it was, appends one short notice and logs the details
//! at `warn`.
//!
//! ## Double submission
//!
//! Every write takes `&mut self` and holds it across the network call, so a second write
//! through the same agent cannot start while one is in flight. Operations requested from
//! the wrong state are refused before any request is issued. A write whose future is
//! dropped before the reply arrives counts as failed: the view goes back to where it was.

use crate::client::dom::Document;
use crate::client::error::{FormError, SyncError};
use crate::client::registry::{DraftState, PendingWrite, ViewEntry, ViewRegistry, ViewState};
use crate::client::transport::{PersonTransport, TransportError};
use crate::client::view;
use crate::model::{dom_key, Person, PersonId};
use tracing::{debug, info, instrument, warn};

/// Notice shown when the server could not be reached at all.
pub const CONNECTION_NOTICE: &str = "Error connecting to the server.";

/// Synchronizes a document with the server through a [`PersonTransport`].
///
/// ```rust
/// use person_sync::client::ClientSyncAgent;
/// use person_sync::client::transport::MockTransport;
///
/// #[tokio::main]
/// async fn main() {
///     let transport = MockTransport::new();
///     transport.reply_list(Ok(vec![]));
///
///     let mut agent = ClientSyncAgent::new(transport);
///     assert_eq!(agent.load_all().await.unwrap(), 0);
/// }
/// ```
pub struct ClientSyncAgent<T: PersonTransport> {
    transport: T,
    document: Document,
    registry: ViewRegistry,
    notices: Vec<String>,
}

impl<T: PersonTransport> ClientSyncAgent<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            document: Document::new(),
            registry: ViewRegistry::new(),
            notices: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for user input: typing into form fields, ticking boxes.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Notices shown to the user so far, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Fetches the collection and renders every person.
    ///
    /// Persons already rendered are re-rendered in place; a person whose edit form is open
    /// or who has a write in flight is left alone. Returns the number of persons fetched.
    #[instrument(skip(self))]
    pub async fn load_all(&mut self) -> Result<usize, SyncError> {
        let persons = match self.transport.list().await {
            Ok(persons) => persons,
            Err(e) => return Err(self.report("Loading persons", e)),
        };

        let count = persons.len();
        for person in persons {
            match self.registry.state(person.id) {
                None | Some(ViewState::Rendered) => self.show(person),
                Some(state) => debug!(id = %person.id, ?state, "Skipping busy view"),
            }
        }
        info!(count, "Loaded persons");
        Ok(count)
    }

    /// Opens the edit form of a rendered person. No request is issued.
    #[instrument(skip(self))]
    pub fn begin_edit(&mut self, id: PersonId) -> Result<(), SyncError> {
        let entry = self.expect_state(id, ViewState::Rendered, "edit")?;
        let person = entry.person.clone();
        view::render_edit_form(&mut self.document, &person);
        self.registry.set_state(id, ViewState::Editing);
        Ok(())
    }

    /// Closes an edit form without saving, showing the last confirmed values again.
    #[instrument(skip(self))]
    pub fn cancel_edit(&mut self, id: PersonId) -> Result<(), SyncError> {
        let entry = self.expect_state(id, ViewState::Editing, "cancel editing")?;
        let person = entry.person.clone();
        view::render(&mut self.document, &person);
        self.registry.set_state(id, ViewState::Rendered);
        Ok(())
    }

    /// Sends the edit form of `id` and, once confirmed, shows the stored result.
    ///
    /// On any failure the form stays open with the user's input.
    #[instrument(skip(self))]
    pub async fn submit_edit(&mut self, id: PersonId) -> Result<Person, SyncError> {
        let entry = self.expect_state(id, ViewState::Editing, "save")?;
        let current = entry.person.created_at;
        let fields = view::read_edit_form(&self.document, id)
            .map_err(|e| self.reject_input("Update", e))?;
        let candidate = Person::with_fields(id, fields, current);

        let pending =
            PendingWrite::view(&mut self.registry, id, ViewState::Saving, ViewState::Editing);
        match self.transport.update(&candidate).await {
            Ok(updated) if updated.id == id => {
                pending.confirm();
                info!(%id, "Update confirmed");
                self.show(updated.clone());
                Ok(updated)
            }
            Ok(updated) => {
                drop(pending);
                let e = TransportError::Decode(format!(
                    "update of {id} answered with person {}",
                    updated.id
                ));
                Err(self.report("Update", e))
            }
            Err(e) => {
                drop(pending);
                Err(self.report("Update", e))
            }
        }
    }

    /// Deletes a rendered person and removes its node once the server confirmed.
    #[instrument(skip(self))]
    pub async fn submit_delete(&mut self, id: PersonId) -> Result<(), SyncError> {
        self.expect_state(id, ViewState::Rendered, "delete")?;

        let pending =
            PendingWrite::view(&mut self.registry, id, ViewState::Removing, ViewState::Rendered);
        match self.transport.delete(id).await {
            Ok(()) => {
                pending.confirm();
                info!(%id, "Delete confirmed");
                view::remove(&mut self.document, &dom_key(id));
                self.registry.remove(id);
                Ok(())
            }
            Err(e) => {
                drop(pending);
                Err(self.report("Delete", e))
            }
        }
    }

    /// Opens the create form. No request is issued.
    #[instrument(skip(self))]
    pub fn begin_create(&mut self) -> Result<(), SyncError> {
        if self.registry.draft().is_some() {
            return Err(SyncError::DraftOpen);
        }
        view::render_create_form(&mut self.document);
        self.registry.set_draft(Some(DraftState::Drafting));
        Ok(())
    }

    /// Sends the create form and, once confirmed, closes it and shows the new person.
    ///
    /// On any failure the form stays open with the user's input.
    #[instrument(skip(self))]
    pub async fn submit_create(&mut self) -> Result<Person, SyncError> {
        if self.registry.draft() != Some(DraftState::Drafting) {
            return Err(SyncError::NoDraft("create"));
        }
        let fields =
            view::read_create_form(&self.document).map_err(|e| self.reject_input("Create", e))?;

        let pending =
            PendingWrite::draft(&mut self.registry, DraftState::Creating, DraftState::Drafting);
        match self.transport.create(&fields).await {
            Ok(created) => {
                pending.confirm();
                info!(id = %created.id, "Create confirmed");
                view::remove_create_form(&mut self.document);
                self.registry.set_draft(None);
                self.show(created.clone());
                Ok(created)
            }
            Err(e) => {
                drop(pending);
                Err(self.report("Create", e))
            }
        }
    }

    fn show(&mut self, person: Person) {
        view::render(&mut self.document, &person);
        self.registry.confirm(person);
    }

    fn expect_state(
        &self,
        id: PersonId,
        expected: ViewState,
        action: &'static str,
    ) -> Result<&ViewEntry, SyncError> {
        let entry = self.registry.get(id).ok_or(SyncError::UnknownView(id))?;
        if entry.state != expected {
            return Err(SyncError::InvalidState {
                action,
                id,
                state: entry.state,
            });
        }
        Ok(entry)
    }

    fn reject_input(&mut self, action: &str, error: FormError) -> SyncError {
        warn!(action, error = %error, "Invalid input");
        self.notices.push(format!("{action} not sent: {error}."));
        SyncError::InvalidInput(error)
    }

    fn report(&mut self, action: &str, error: TransportError) -> SyncError {
        warn!(action, error = %error, "Request failed");
        let notice = match &error {
            TransportError::Network(_) => CONNECTION_NOTICE.to_string(),
            TransportError::Rejected { .. } => format!("{action} failed on the server."),
            TransportError::Encode(_) | TransportError::Decode(_) => {
                format!("{action} failed: unexpected response from the server.")
            }
        };
        self.notices.push(notice);
        SyncError::Transport(error)
    }
}
