use axum::{extract::State, Json};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::error;

use crate::{
    web::{
        data::{DeserSignup, Signup, ValidSignup},
        Error, WebResult,
    },
    AppState,
};

#[tracing::instrument(
    name = "Saving new signup to the database",
    skip(app_state, signup),
    fields(signup_email = %signup.email)
)]
pub async fn signup(
    State(app_state): State<AppState>,
    Json(signup): Json<DeserSignup>,
) -> WebResult<Json<Signup>> {
    // Spawn a blocking task to validate the signup info.
    let signup: ValidSignup = tokio::task::spawn_blocking(move || signup.try_into()).await??;

    let created = insert_signup(app_state.mm.db(), &signup).await?;

    // Notification is best-effort: a failed send is recorded and swallowed,
    // the signup itself has already succeeded.
    if let Err(er) = app_state.email_client.send_signup_notification(&created).await {
        error!("failed to send signup notification: {er}");
    }

    Ok(Json(created))
}

/// Tries to insert a new signup into the database and returns the stored row.
/// Uniqueness is enforced by the unique index on `email`; a constraint
/// violation from the INSERT is the duplicate-email signal, there is no
/// prior existence query.
async fn insert_signup(db: &SqlitePool, signup: &ValidSignup) -> WebResult<Signup> {
    let query_result = sqlx::query_as::<_, Signup>(
        r#"
        INSERT INTO pilot_signups (name, email, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, created_at
    "#,
    )
    .bind(signup.name.as_ref())
    .bind(signup.email.as_ref())
    .bind(Utc::now())
    .fetch_one(db)
    .await;

    match query_result {
        Err(sqlx::Error::Database(db_er)) if db_er.is_unique_violation() => Err(Error::EmailTaken),
        other => Ok(other?),
    }
}
