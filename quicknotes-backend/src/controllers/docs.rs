//! OpenAPI document for the notes API, served with Swagger UI at `/swagger/`.

use actix_web::web;
use quicknotes_types::{HttpError, Note, NoteInput, PartialNote, SortOrder};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::notes;

pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "quicknotes", description = "Markdown notes with YAML front-matter"),
    paths(
        notes::list_notes,
        notes::list_tags,
        notes::get_note,
        notes::create_note,
        notes::update_note
    ),
    components(schemas(Note, PartialNote, NoteInput, SortOrder, HttpError)),
    tags((name = "notes", description = "Search, read, create and update notes"))
)]
pub struct ApiDoc;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/swagger/{_:.*}").url(OPENAPI_JSON, ApiDoc::openapi()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[::core::prelude::v1::test]
    fn test_document_lists_note_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/notes"));
        assert!(paths.contains_key("/api/notes/tags"));
        assert!(paths["/api/notes/{path}"].get("get").is_some());
        assert!(paths["/api/notes/{path}"].get("put").is_some());
        assert!(doc["components"]["schemas"].get("PartialNote").is_some());
    }

    #[actix_web::test]
    async fn test_serves_openapi_json_and_ui() {
        let app = test::init_service(App::new().configure(config)).await;

        let req = test::TestRequest::get().uri(OPENAPI_JSON).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let doc: serde_json::Value = test::read_body_json(resp).await;
        assert!(doc["paths"].get("/api/notes/{path}").is_some());

        let req = test::TestRequest::get().uri("/swagger/index.html").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
