//! Product catalog state for the storefront.
//!
//! [`CatalogState`] holds what a shop page shows: the products as the server
//! returned them (`all`), the sortable projection the shopper sees (`view`),
//! the currently opened product with its reviews (`details`), and a single
//! shared error slot.
//!
//! State only changes through [`CatalogAction`]s applied by the reducer.
//! The error slot is last-write-wins: every successful operation clears it
//! and every reported failure overwrites it with its fixed code and message.

mod sort;
mod ticket;

pub use sort::{SortDirection, by_price};
pub use ticket::{Completion, Sequencer, Slice, Ticket};

use serde::Serialize;

use crate::types::{Product, ProductDetail, Review};

/// A catalog request that can succeed or fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchAll,
    FetchBySeller,
    FetchById,
    Search,
    Create,
    Edit,
    CreateReview,
    EditReview,
}

impl Operation {
    /// The slices of the state this operation replaces wholesale.
    #[must_use]
    pub const fn writes(self) -> &'static [Slice] {
        match self {
            Self::FetchAll | Self::FetchBySeller => &[Slice::All, Slice::View],
            Self::Search => &[Slice::All],
            Self::FetchById => &[Slice::Detail],
            Self::Create | Self::Edit | Self::CreateReview | Self::EditReview => &[],
        }
    }

    /// The error recorded when this operation fails.
    ///
    /// Review operations are not reported through the shared error slot;
    /// their failures go back to the caller instead.
    #[must_use]
    pub fn failure(self) -> Option<ErrorState> {
        let (code, message) = match self {
            Self::FetchAll => (404, "An error ocurred while getting all the products"),
            Self::FetchBySeller => (404, "An error ocurred while getting the shop products"),
            Self::FetchById => (
                404,
                "An error ocurred while searching the product through its Id",
            ),
            Self::Search => (404, "An error ocurred while searching for the product"),
            Self::Create => (400, "An error ocurred while creating the product"),
            Self::Edit => (404, "An error ocurred when editing the product"),
            Self::CreateReview | Self::EditReview => return None,
        };
        Some(ErrorState::new(code, message))
    }
}

/// The shared catalog error slot.
///
/// Both fields are `None` when the last completed operation succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ErrorState {
    pub code: Option<u16>,
    pub message: Option<String>,
}

impl ErrorState {
    #[must_use]
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.code.is_none() && self.message.is_none()
    }
}

/// State transitions for the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
    /// A full product list arrived (`fetch_all` or `fetch_by_seller`).
    /// `None` means the response carried no list.
    ProductsLoaded(Option<Vec<Product>>),
    /// Search results arrived.
    SearchResults(Option<Vec<Product>>),
    DetailLoaded(ProductDetail),
    ProductCreated(Product),
    ProductEdited(Product),
    ReviewCreated(Review),
    ReviewEdited(Review),
    /// An operation failed.
    Failed(Operation),
    /// Re-derive the view from `all` in the given price order.
    Sort(SortDirection),
}

/// Catalog state owned by a single writer.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    all: Vec<Product>,
    view: Vec<Product>,
    details: ProductDetail,
    error: ErrorState,
    sequencer: Sequencer,
}

impl CatalogState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Products in server order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.all
    }

    /// Products as currently displayed.
    #[must_use]
    pub fn view(&self) -> &[Product] {
        &self.view
    }

    /// The currently opened product.
    #[must_use]
    pub const fn details(&self) -> &ProductDetail {
        &self.details
    }

    #[must_use]
    pub const fn error(&self) -> &ErrorState {
        &self.error
    }

    /// Register a new request for `operation` and return its ticket.
    pub fn begin(&mut self, operation: Operation) -> Ticket {
        self.sequencer.issue(operation)
    }

    /// Apply the completion of the request identified by `ticket`.
    ///
    /// Slices claimed by a request issued after this one are left alone. A
    /// completion that still owns at least one slice also writes the error
    /// slot; a fully discarded one changes nothing.
    pub fn complete(&mut self, ticket: &Ticket, action: CatalogAction) -> Completion {
        let completion = self.sequencer.completion(ticket);
        if !completion.is_discarded() {
            let sequencer = &self.sequencer;
            let writable = Writable {
                all: sequencer.is_current(ticket, Slice::All),
                view: sequencer.is_current(ticket, Slice::View),
                detail: sequencer.is_current(ticket, Slice::Detail),
            };
            self.write(action, writable);
        }
        completion
    }

    /// Apply `action` unconditionally.
    pub fn apply(&mut self, action: CatalogAction) {
        self.write(action, Writable::EVERYTHING);
    }

    fn write(&mut self, action: CatalogAction, writable: Writable) {
        match action {
            CatalogAction::ProductsLoaded(products) => {
                let products = products.unwrap_or_default();
                if writable.view {
                    self.view.clone_from(&products);
                }
                if writable.all {
                    self.all = products;
                }
                self.clear_error();
            }
            CatalogAction::SearchResults(products) => {
                if writable.all {
                    self.all = products.unwrap_or_default();
                }
                self.clear_error();
            }
            CatalogAction::DetailLoaded(detail) => {
                if writable.detail {
                    self.details = detail;
                }
                self.clear_error();
            }
            CatalogAction::ProductCreated(product) => {
                self.view.push(product);
                self.clear_error();
            }
            CatalogAction::ProductEdited(product) => {
                for existing in self.view.iter_mut().filter(|p| p.id == product.id) {
                    existing.clone_from(&product);
                }
                self.clear_error();
            }
            CatalogAction::ReviewCreated(review) => {
                self.details.reviews.insert(0, review);
                self.clear_error();
            }
            CatalogAction::ReviewEdited(review) => {
                self.details.reviews.retain(|r| r.id != review.id);
                self.details.reviews.insert(0, review);
                self.clear_error();
            }
            CatalogAction::Failed(operation) => {
                if let Some(error) = operation.failure() {
                    self.error = error;
                }
            }
            CatalogAction::Sort(direction) => {
                self.view = by_price(&self.all, direction);
            }
        }
    }

    fn clear_error(&mut self) {
        self.error = ErrorState::default();
    }
}

/// Which wholesale-replaced slices a write may touch.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
struct Writable {
    all: bool,
    view: bool,
    detail: bool,
}

impl Writable {
    const EVERYTHING: Self = Self {
        all: true,
        view: true,
        detail: true,
    };
}
