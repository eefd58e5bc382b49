use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    web::{
        data::{ListParams, Signup},
        Error, WebResult,
    },
    AppState,
};

#[tracing::instrument(name = "Listing signups", skip(app_state))]
pub async fn signups_list(
    State(app_state): State<AppState>,
    Query(params): Query<ListParams>,
) -> WebResult<Json<Vec<Signup>>> {
    let signups = sqlx::query_as::<_, Signup>(
        r#"
        SELECT id, name, email, created_at FROM pilot_signups
        ORDER BY id
        LIMIT $1 OFFSET $2
    "#,
    )
    .bind(params.limit)
    .bind(params.skip)
    .fetch_all(app_state.mm.db())
    .await?;

    Ok(Json(signups))
}

#[tracing::instrument(name = "Fetching a signup by id", skip(app_state))]
pub async fn signup_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Signup>> {
    let signup = sqlx::query_as::<_, Signup>(
        r#"SELECT id, name, email, created_at FROM pilot_signups WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(app_state.mm.db())
    .await?
    .ok_or(Error::SignupNotFound)?;

    Ok(Json(signup))
}
