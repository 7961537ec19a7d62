//! Shop status route handler.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::Result;
use crate::shop::{ShopContext, ShopView};
use crate::state::AppState;

/// Resolve which page a shop should render.
///
/// GET /shops/{shop_name}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(shop_name): Path<String>,
) -> Result<Json<ShopView>> {
    let mut context = ShopContext::new(state.sellers().clone());
    let view = context.view(Some(&shop_name)).await?;
    Ok(Json(view))
}
