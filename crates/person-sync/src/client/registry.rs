//! Bookkeeping for the persons currently shown in a client document.

use crate::model::{Person, PersonId};
use std::collections::BTreeMap;

/// Where a rendered person is in its edit/delete cycle.
///
/// ```text
/// Rendered -> Editing -> Saving -> Rendered      (confirmed)
///                               -> Editing       (failed)
/// Rendered -> Removing -> (gone)                 (confirmed)
///                      -> Rendered               (failed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Rendered,
    Editing,
    Saving,
    Removing,
}

/// State of the create form. `None` in the registry means no form is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Drafting,
    Creating,
}

/// A rendered person: the last server-confirmed copy plus its view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewEntry {
    pub person: Person,
    pub state: ViewState,
}

/// Every person rendered in the document, keyed by id, plus the create form state.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    entries: BTreeMap<PersonId, ViewEntry>,
    draft: Option<DraftState>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a confirmed person as `Rendered`, replacing any previous entry.
    pub fn confirm(&mut self, person: Person) {
        self.entries.insert(
            person.id,
            ViewEntry {
                person,
                state: ViewState::Rendered,
            },
        );
    }

    pub fn get(&self, id: PersonId) -> Option<&ViewEntry> {
        self.entries.get(&id)
    }

    pub fn state(&self, id: PersonId) -> Option<ViewState> {
        self.entries.get(&id).map(|entry| entry.state)
    }

    /// Moves a person to `state`. Returns `false` when the person is not rendered.
    pub fn set_state(&mut self, id: PersonId, state: ViewState) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.state = state;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: PersonId) -> Option<ViewEntry> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn draft(&self) -> Option<DraftState> {
        self.draft
    }

    pub fn set_draft(&mut self, draft: Option<DraftState>) {
        self.draft = draft;
    }
}

enum Rollback {
    View(PersonId, ViewState),
    Draft(DraftState),
}

/// Marks a view busy for the duration of one write.
///
/// Unless [`confirm`](PendingWrite::confirm) is called, dropping the guard puts the view
/// back into the state it was in before the write. That covers a failed request as well
/// as a request future dropped before it completed.
pub(crate) struct PendingWrite<'a> {
    registry: &'a mut ViewRegistry,
    rollback: Option<Rollback>,
}

impl<'a> PendingWrite<'a> {
    pub(crate) fn view(
        registry: &'a mut ViewRegistry,
        id: PersonId,
        busy: ViewState,
        previous: ViewState,
    ) -> Self {
        registry.set_state(id, busy);
        Self {
            registry,
            rollback: Some(Rollback::View(id, previous)),
        }
    }

    pub(crate) fn draft(registry: &'a mut ViewRegistry, busy: DraftState, previous: DraftState) -> Self {
        registry.set_draft(Some(busy));
        Self {
            registry,
            rollback: Some(Rollback::Draft(previous)),
        }
    }

    /// The server confirmed the write; the caller now owns the view state.
    pub(crate) fn confirm(mut self) {
        self.rollback = None;
    }
}

impl Drop for PendingWrite<'_> {
    fn drop(&mut self) {
        match self.rollback.take() {
            Some(Rollback::View(id, previous)) => {
                self.registry.set_state(id, previous);
            }
            Some(Rollback::Draft(previous)) => self.registry.set_draft(Some(previous)),
            None => {}
        }
    }
}
