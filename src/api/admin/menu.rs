use crate::api::errors::{client_message, error_status};
use crate::auth::extractors::VendorPrincipal;
use crate::db::{MenuOperations, RepositoryError};
use crate::enums::admin::{MenuItemResponse, MenuListResponse};
use crate::enums::common::AckResponse;
use crate::models::admin::{NewMenuItem, UpdateMenuItem};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub(super) struct CreateMenuItemReq {
    pub name: String,
    pub price_minor: i64,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub image_link: Option<String>,
}

/// Vendors may only touch items on their own menu.
fn check_item_owner(
    menu_ops: &MenuOperations,
    item_id: i32,
    vendor_canteen_id: i32,
) -> Result<(), RepositoryError> {
    let item = menu_ops.get_menu_item(item_id)?;
    if item.canteen_id != vendor_canteen_id {
        return Err(RepositoryError::Forbidden(format!(
            "Item {} belongs to another canteen",
            item_id
        )));
    }
    Ok(())
}

#[utoipa::path(
    post,
    tag = "Menu",
    path = "",
    request_body = CreateMenuItemReq,
    responses(
        (status = 200, description = "Item added to the vendor's menu", body = MenuItemResponse),
        (status = 400, description = "Invalid price", body = MenuItemResponse),
    ),
    summary = "Add a menu item"
)]
#[post("")]
pub(super) async fn create_menu_item(
    menu_ops: web::Data<MenuOperations>,
    vendor: VendorPrincipal,
    req_data: web::Json<CreateMenuItemReq>,
) -> impl Responder {
    let CreateMenuItemReq {
        name,
        price_minor,
        category,
        is_available,
        image_link,
    } = req_data.into_inner();
    match menu_ops.create_menu_item(NewMenuItem {
        canteen_id: vendor.canteen_id,
        name,
        price_minor,
        category: category.unwrap_or_else(|| "general".to_string()),
        is_available: is_available.unwrap_or(true),
        image_link,
    }) {
        Ok(item) => {
            debug!("create_menu_item: created item {}", item.item_id);
            HttpResponse::Ok().json(MenuItemResponse {
                status: "ok".to_string(),
                data: Some(item),
                error: None,
            })
        }
        Err(e) => {
            error!("create_menu_item: {}", e);
            HttpResponse::build(error_status(&e)).json(MenuItemResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    put,
    tag = "Menu",
    path = "/{item_id}",
    request_body = UpdateMenuItem,
    responses(
        (status = 200, description = "Item updated; past order snapshots unaffected", body = MenuItemResponse),
        (status = 403, description = "Item belongs to another canteen", body = MenuItemResponse),
    ),
    summary = "Update a menu item"
)]
#[put("/{item_id}")]
pub(super) async fn update_menu_item(
    menu_ops: web::Data<MenuOperations>,
    vendor: VendorPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateMenuItem>,
) -> impl Responder {
    let item_id = path.into_inner().0;
    let result = check_item_owner(&menu_ops, item_id, vendor.canteen_id)
        .and_then(|_| menu_ops.update_menu_item(item_id, req_data.into_inner()));
    match result {
        Ok(item) => HttpResponse::Ok().json(MenuItemResponse {
            status: "ok".to_string(),
            data: Some(item),
            error: None,
        }),
        Err(e) => {
            error!("update_menu_item: error updating item {}: {}", item_id, e);
            HttpResponse::build(error_status(&e)).json(MenuItemResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Menu",
    path = "/{item_id}",
    responses(
        (status = 200, description = "Item hidden from the menu", body = AckResponse),
        (status = 403, description = "Item belongs to another canteen", body = AckResponse),
    ),
    summary = "Soft-delete a menu item"
)]
#[delete("/{item_id}")]
pub(super) async fn remove_menu_item(
    menu_ops: web::Data<MenuOperations>,
    vendor: VendorPrincipal,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let item_id = path.into_inner().0;
    let result = check_item_owner(&menu_ops, item_id, vendor.canteen_id)
        .and_then(|_| menu_ops.soft_delete_menu_item(item_id));
    match result {
        Ok(()) => HttpResponse::Ok().json(AckResponse {
            status: "ok".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("remove_menu_item: error removing item {}: {}", item_id, e);
            HttpResponse::build(error_status(&e)).json(AckResponse {
                status: "error".to_string(),
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/by_canteen/{canteen_id}",
    responses(
        (status = 200, description = "Live menu for the canteen", body = MenuListResponse),
    ),
    summary = "List a canteen's menu"
)]
#[get("/by_canteen/{canteen_id}")]
pub(super) async fn get_menu_for_canteen(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let canteen_id = path.into_inner().0;
    match menu_ops.get_menu_for_canteen(canteen_id) {
        Ok(data) => HttpResponse::Ok().json(MenuListResponse {
            status: "ok".to_string(),
            data,
            error: None,
        }),
        Err(e) => {
            error!(
                "get_menu_for_canteen: error fetching canteen {}: {}",
                canteen_id, e
            );
            HttpResponse::build(error_status(&e)).json(MenuListResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(client_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/{item_id}",
    responses(
        (status = 200, description = "Menu item detail", body = MenuItemResponse),
        (status = 404, description = "No such item", body = MenuItemResponse),
    ),
    summary = "Get one menu item"
)]
#[get("/{item_id}")]
pub(super) async fn get_menu_item(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let item_id = path.into_inner().0;
    match menu_ops.get_menu_item(item_id) {
        Ok(item) => HttpResponse::Ok().json(MenuItemResponse {
            status: "ok".to_string(),
            data: Some(item),
            error: None,
        }),
        Err(e) => {
            error!("get_menu_item: error fetching item {}: {}", item_id, e);
            HttpResponse::build(error_status(&e)).json(MenuItemResponse {
                status: "error".to_string(),
                data: None,
                error: Some(client_message(&e)),
            })
        }
    }
}
