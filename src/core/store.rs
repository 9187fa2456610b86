//! Customer store: reactive state mirrored from the customers service.
//!
//! Every action follows the same cycle: mark the store as loading and clear the
//! previous error, make one API call, write the result (or the normalized error
//! message) into the state, and clear the loading flag on the way out. The flag
//! is cleared by a drop guard, so an action future dropped mid-flight leaves the
//! store idle as well.
//!
//! Views observe the state through [`CustomerStore::subscribe`]. Actions take
//! `&self` and may run concurrently; there is no sequencing or cancellation, so
//! the last action to resume wins.

use tokio::sync::watch;

use crate::api::models::{Customer, CustomerRequest, ValidationError};
use crate::core::services::traits::CustomerApi;
use crate::core::services::types::SearchType;
use crate::error::ApiError;
use crate::utils::error_helpers::describe_api_error;

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Last list or search result, in server order
    pub customers: Vec<Customer>,
    /// Last successfully fetched single record
    pub current_customer: Option<Customer>,
    /// True while an action's request is in flight
    pub loading: bool,
    /// Message from the most recent failed action
    pub error: Option<String>,
    /// Field-level rejections from the last failed create/update
    pub validation_errors: Vec<ValidationError>,
}

/// Clears `loading` when the action that raised it finishes or is dropped.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<StoreState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| state.loading = false);
    }
}

pub struct CustomerStore<A> {
    api: A,
    state: watch::Sender<StoreState>,
}

impl<A: CustomerApi> CustomerStore<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { api, state }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| {
            state.error = None;
            state.validation_errors.clear();
        });
    }

    /// Raise `loading` and drop the previous error, applying `reset` in the
    /// same update.
    fn begin(&self, reset: impl FnOnce(&mut StoreState)) -> LoadingGuard<'_> {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
            reset(state);
        });
        LoadingGuard { state: &self.state }
    }

    /// Store the normalized message, applying `also` in the same update.
    fn record_error(&self, error: &ApiError, also: impl FnOnce(&mut StoreState)) {
        let message = describe_api_error(error);
        self.state.send_modify(|state| {
            state.error = Some(message);
            also(state);
        });
    }

    fn record_form_error(&self, error: &ApiError) {
        let errors = error.validation_errors().to_vec();
        self.record_error(error, |state| {
            if !errors.is_empty() {
                state.validation_errors = errors;
            }
        });
    }

    /// Replace the list with the full server list. On failure the list is kept.
    pub async fn fetch_customers(&self) {
        let _loading = self.begin(|_| {});

        match self.api.list_customers().await {
            Ok(customers) => self.state.send_modify(|state| state.customers = customers),
            Err(err) => {
                log::error!("Error fetching customers: {}", err);
                self.record_error(&err, |_| {});
            }
        }
    }

    /// Load a single record into `current_customer`, which is cleared before the request.
    pub async fn fetch_customer_by_id(&self, id: &str) {
        let _loading = self.begin(|state| state.current_customer = None);

        match self.api.get_customer_by_id(id).await {
            Ok(customer) => self
                .state
                .send_modify(|state| state.current_customer = Some(customer)),
            Err(err) => {
                log::error!("Error fetching customer with ID {}: {}", id, err);
                self.record_error(&err, |_| {});
            }
        }
    }

    /// Show the single match (or nothing) as the customer list. A failed
    /// search empties the list.
    pub async fn search_customers(&self, search_type: SearchType, value: &str) {
        let _loading = self.begin(|_| {});

        let result = match search_type {
            SearchType::Id => self.api.get_customer_by_id(value).await.map(Some),
            SearchType::Email => self.api.get_customer_by_email(value).await,
            SearchType::Name => self.api.get_customer_by_name(value).await,
        };

        match result {
            Ok(found) => self
                .state
                .send_modify(|state| state.customers = found.into_iter().collect()),
            Err(err) => {
                log::error!("Error searching customers by {}: {}", search_type, err);
                self.record_error(&err, |state| state.customers.clear());
            }
        }
    }

    /// Create a customer and append it to the list.
    ///
    /// Unlike the fetch actions, the error is both stored and returned so a
    /// form can react at the call site.
    pub async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, ApiError> {
        let _loading = self.begin(|state| state.validation_errors.clear());

        match self.api.create_customer(request).await {
            Ok(customer) => {
                let appended = customer.clone();
                self.state.send_modify(|state| state.customers.push(appended));
                Ok(customer)
            }
            Err(err) => {
                log::error!("Error creating customer: {}", err);
                self.record_form_error(&err);
                Err(err)
            }
        }
    }

    /// Replace a customer, updating the list entry and `current_customer` when
    /// they carry the same id. Errors are stored and returned.
    pub async fn update_customer(
        &self,
        id: &str,
        request: &CustomerRequest,
    ) -> Result<Customer, ApiError> {
        let _loading = self.begin(|state| state.validation_errors.clear());

        match self.api.update_customer(id, request).await {
            Ok(customer) => {
                let updated = customer.clone();
                self.state.send_modify(|state| {
                    if let Some(entry) = state.customers.iter_mut().find(|c| c.id == id) {
                        *entry = updated.clone();
                    }
                    if state.current_customer.as_ref().is_some_and(|c| c.id == id) {
                        state.current_customer = Some(updated);
                    }
                });
                Ok(customer)
            }
            Err(err) => {
                log::error!("Error updating customer with ID {}: {}", id, err);
                self.record_form_error(&err);
                Err(err)
            }
        }
    }

    /// Delete a customer. Returns whether the server accepted the deletion;
    /// the error itself is only stored.
    pub async fn delete_customer(&self, id: &str) -> bool {
        let _loading = self.begin(|_| {});

        match self.api.delete_customer(id).await {
            Ok(()) => {
                self.state.send_modify(|state| {
                    state.customers.retain(|c| c.id != id);
                    if state.current_customer.as_ref().is_some_and(|c| c.id == id) {
                        state.current_customer = None;
                    }
                });
                true
            }
            Err(err) => {
                log::error!("Error deleting customer with ID {}: {}", id, err);
                self.record_error(&err, |_| {});
                false
            }
        }
    }
}
