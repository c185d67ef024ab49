//! Notes REST API — list/search, tags, read, create and update.
//!
//! Filesystem work runs on the blocking pool; every failure is rendered by
//! `NotesError` as a `{code, message}` body.

use actix_web::{web, HttpRequest, HttpResponse};
use quicknotes_types::{HttpError, ListNotesInput, Note, NoteInput, PartialNote};
use std::sync::Arc;

use crate::error::{NotesError, NotesResult};
use crate::notes::{search, NoteStore};
use crate::AppState;

/// Run a store operation off the async workers
async fn with_store<T, F>(data: &web::Data<AppState>, op: F) -> NotesResult<T>
where
    F: FnOnce(&NoteStore) -> NotesResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&data.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| NotesError::io("note store task failed", std::io::Error::other(e)))?
}

/// Bind a note from a JSON body, or from the query string when the body is empty
/// (`?title=..&content=..&tags=a&tags=b`).
fn bind_note_input(req: &HttpRequest, body: &[u8]) -> NotesResult<NoteInput> {
    if !body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(body)
            .map_err(|e| NotesError::Bind(format!("invalid note body: {}", e)));
    }

    let mut input = NoteInput::default();
    let mut has_title = false;
    for (key, value) in url::form_urlencoded::parse(req.query_string().as_bytes()) {
        match key.as_ref() {
            "title" => {
                input.title = value.into_owned();
                has_title = true;
            }
            "content" => input.content = value.into_owned(),
            "tags" | "tags[]" => input.tags.push(value.into_owned()),
            _ => {}
        }
    }

    if !has_title {
        return Err(NotesError::Bind("title is required".to_string()));
    }
    Ok(input)
}

// --- List notes ---

#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "notes",
    params(ListNotesInput),
    responses(
        (status = 200, description = "Matching note metadata", body = [PartialNote]),
        (status = 400, description = "Malformed query", body = HttpError),
        (status = 500, description = "A note could not be read or parsed", body = HttpError)
    )
)]
pub(crate) async fn list_notes(
    data: web::Data<AppState>,
    query: web::Query<ListNotesInput>,
) -> NotesResult<HttpResponse> {
    let query = query.into_inner();
    let notes = with_store(&data, move |store| search::search(store, &query)).await?;
    Ok(HttpResponse::Ok().json(notes))
}

// --- Tags ---

#[utoipa::path(
    get,
    path = "/api/notes/tags",
    tag = "notes",
    responses(
        (status = 200, description = "Distinct tags, sorted", body = [String]),
        (status = 500, description = "A note could not be read or parsed", body = HttpError)
    )
)]
pub(crate) async fn list_tags(data: web::Data<AppState>) -> NotesResult<HttpResponse> {
    let tags = with_store(&data, search::collect_tags).await?;
    Ok(HttpResponse::Ok().json(tags))
}

// --- Read note ---

#[utoipa::path(
    get,
    path = "/api/notes/{path}",
    tag = "notes",
    params(("path" = String, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Note with its body rendered to HTML", body = Note),
        (status = 400, description = "Invalid identifier", body = HttpError),
        (status = 500, description = "Note missing or unreadable", body = HttpError)
    )
)]
pub(crate) async fn get_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> NotesResult<HttpResponse> {
    let id = path.into_inner();
    let note = with_store(&data, move |store| store.get_note(&id)).await?;
    Ok(HttpResponse::Ok().json(note))
}

// --- Create note ---

#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "notes",
    request_body = NoteInput,
    responses(
        (status = 201, description = "Note written", body = PartialNote),
        (status = 400, description = "Missing title or unusable file name", body = HttpError),
        (status = 500, description = "Note could not be written", body = HttpError)
    )
)]
pub(crate) async fn create_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> NotesResult<HttpResponse> {
    let input = bind_note_input(&req, &body)?;
    let created = with_store(&data, move |store| store.create_note(&input)).await?;
    Ok(HttpResponse::Created().json(created))
}

// --- Update note ---

#[utoipa::path(
    put,
    path = "/api/notes/{path}",
    tag = "notes",
    params(("path" = String, Path, description = "Note identifier")),
    request_body = NoteInput,
    responses(
        (status = 204, description = "Note rewritten"),
        (status = 400, description = "Missing path or title", body = HttpError),
        (status = 500, description = "Note missing or not writable", body = HttpError)
    )
)]
pub(crate) async fn update_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
) -> NotesResult<HttpResponse> {
    let id = path.into_inner();
    if id.is_empty() {
        return Err(missing_path_error());
    }
    let input = bind_note_input(&req, &body)?;
    with_store(&data, move |store| store.update_note(&id, &input)).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn update_without_path() -> NotesResult<HttpResponse> {
    Err(missing_path_error())
}

fn missing_path_error() -> NotesError {
    NotesError::Validation("path parameter is required".to_string())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _req| NotesError::Bind(err.to_string()).into()),
            )
            .route("", web::get().to(list_notes))
            .route("/", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/", web::post().to(create_note))
            .route("", web::put().to(update_without_path))
            .route("/", web::put().to(update_without_path))
            .route("/tags", web::get().to(list_tags))
            .route("/{path}", web::get().to(get_note))
            .route("/{path}", web::put().to(update_note)),
    );
}
