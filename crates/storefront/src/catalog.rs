//! Async catalog store.
//!
//! [`CatalogStore`] is the single writer of a [`CatalogState`]. Each
//! operation takes a ticket, performs its request against the catalog API
//! without holding the lock, and feeds the outcome back through the
//! reducer. Each operation reports a [`Completion`]: parts of the state
//! claimed by a newer request are left alone, and a completion superseded
//! everywhere is discarded.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, instrument, warn};
use vitrina_core::catalog::{CatalogAction, CatalogState, Completion, Operation, SortDirection};
use vitrina_core::{Product, ProductId, ReviewDraft, SellerId, UserId};

use crate::api::{ApiError, CatalogClient};

/// Shared handle to a catalog state and the client that fills it.
#[derive(Clone)]
pub struct CatalogStore {
    client: CatalogClient,
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(CatalogState::new())),
        }
    }

    /// Read access to the current state.
    pub async fn state(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().await
    }

    /// Reload every product, replacing both the list and the view.
    ///
    /// Returns [`Completion::Partial`] when a search issued meanwhile already
    /// replaced the list; the view is still filled.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording the failure in the state.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::FetchAll,
            self.client.list_products(),
            CatalogAction::ProductsLoaded,
        )
        .await
    }

    /// Load the products of one shop, replacing both the list and the view.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording the failure in the state.
    #[instrument(skip(self), fields(seller_id = %seller_id))]
    pub async fn fetch_by_seller(&self, seller_id: &SellerId) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::FetchBySeller,
            self.client.list_products_by_seller(seller_id),
            CatalogAction::ProductsLoaded,
        )
        .await
    }

    /// Load one product with its reviews into the detail slot.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording the failure in the state.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_by_id(&self, id: &ProductId) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::FetchById,
            self.client.get_product(id),
            CatalogAction::DetailLoaded,
        )
        .await
    }

    /// Search by name. Results replace the list; call [`Self::sort`] to show them.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording the failure in the state.
    #[instrument(skip(self))]
    pub async fn search(&self, name: &str) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::Search,
            self.client.search_products(name),
            CatalogAction::SearchResults,
        )
        .await
    }

    /// Create a product and append the stored record to the view.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording the failure in the state.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &Product) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::Create,
            self.client.create_product(product),
            CatalogAction::ProductCreated,
        )
        .await
    }

    /// Edit a product and replace the matching record in the view.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording the failure in the state.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn edit(&self, product: &Product) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::Edit,
            self.client.edit_product(product),
            CatalogAction::ProductEdited,
        )
        .await
    }

    /// Post a review and put it at the top of the open product's reviews.
    ///
    /// # Errors
    ///
    /// Returns the API error. Review failures are not written to the shared
    /// error slot.
    #[instrument(skip(self, review), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn create_review(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        review: &ReviewDraft,
    ) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::CreateReview,
            self.client.create_review(user_id, product_id, review),
            CatalogAction::ReviewCreated,
        )
        .await
    }

    /// Edit a review and move it to the top of the open product's reviews.
    ///
    /// # Errors
    ///
    /// Returns the API error. Review failures are not written to the shared
    /// error slot.
    #[instrument(skip(self, review))]
    pub async fn edit_review(&self, review: &ReviewDraft) -> Result<Completion, ApiError> {
        self.dispatch(
            Operation::EditReview,
            self.client.edit_review(review),
            CatalogAction::ReviewEdited,
        )
        .await
    }

    /// Re-derive the view from the list in the given price order.
    pub async fn sort(&self, direction: SortDirection) {
        self.state
            .write()
            .await
            .apply(CatalogAction::Sort(direction));
    }

    async fn dispatch<T, F>(
        &self,
        operation: Operation,
        request: F,
        on_success: fn(T) -> CatalogAction,
    ) -> Result<Completion, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let ticket = self.state.write().await.begin(operation);
        let outcome = request.await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(value) => {
                let completion = state.complete(&ticket, on_success(value));
                if !completion.is_applied() {
                    debug!(
                        ?operation,
                        ?completion,
                        seq = ticket.seq(),
                        "Catalog response overtaken by a newer request"
                    );
                }
                Ok(completion)
            }
            Err(err) => {
                warn!(?operation, error = %err, "Catalog operation failed");
                let completion = state.complete(&ticket, CatalogAction::Failed(operation));
                if completion.is_discarded() {
                    debug!(?operation, seq = ticket.seq(), "Discarded stale catalog failure");
                }
                Err(err)
            }
        }
    }
}
