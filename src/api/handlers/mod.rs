use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::service::{ListPage, ListService, ServiceError};
use crate::views;

// ============================================================
// Error Handling
// ============================================================

/// Missing lists are reported as-is. Storage failures are logged in full
/// server-side and clients only see a generic page.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::ListNotFound(name) => {
                tracing::warn!("List not found: {}", name);
                (
                    StatusCode::NOT_FOUND,
                    Html(views::error_page(
                        "Not Found",
                        &format!("There is no list called \"{}\".", name),
                    )),
                )
                    .into_response()
            }
            ServiceError::Storage(e) => {
                tracing::error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page("Error", "Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

impl IntoResponse for ListPage {
    fn into_response(self) -> Response {
        match self {
            ListPage::Show { title, items } => Html(views::list_page(&title, &items)).into_response(),
            ListPage::Redirect(path) => Redirect::to(&path).into_response(),
        }
    }
}

// ============================================================
// Lists
// ============================================================

pub async fn default_list(
    State(service): State<ListService>,
) -> Result<ListPage, ServiceError> {
    service.default_list()
}

pub async fn named_list(
    State(service): State<ListService>,
    Path(list_name): Path<String>,
) -> Result<ListPage, ServiceError> {
    service.named_list(&list_name)
}

pub async fn about() -> Html<String> {
    Html(views::about_page())
}

// ============================================================
// Items
// ============================================================

/// Form posted by the add-item button.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    #[serde(rename = "newItem", default)]
    pub new_item: String,
    /// Title of the list the form was rendered in.
    pub list: String,
}

pub async fn add_item(
    State(service): State<ListService>,
    Form(form): Form<AddItemForm>,
) -> Result<Redirect, ServiceError> {
    let path = service.add_item(&form.new_item, &form.list)?;
    Ok(Redirect::to(&path))
}

/// Form posted when an item's checkbox is ticked.
#[derive(Debug, Deserialize)]
pub struct DeleteItemForm {
    #[serde(rename = "deleteItem")]
    pub delete_item: String,
    #[serde(rename = "listName")]
    pub list_name: String,
}

pub async fn delete_item(
    State(service): State<ListService>,
    Form(form): Form<DeleteItemForm>,
) -> Result<Redirect, ServiceError> {
    let path = service.delete_item(&form.delete_item, &form.list_name)?;
    Ok(Redirect::to(&path))
}
