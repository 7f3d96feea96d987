#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use restaurant_order::Endpoints;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const PLACED_ORDER_ID: i64 = 42;

/// In-process stand-in for the three backend functions.
#[derive(Clone)]
pub struct StubBackend {
    pub menu_status: StatusCode,
    pub order_status: StatusCode,
    pub menu_queries: Arc<Mutex<Vec<Option<String>>>>,
    pub orders: Arc<Mutex<Vec<Value>>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            menu_status: StatusCode::OK,
            order_status: StatusCode::CREATED,
            menu_queries: Arc::default(),
            orders: Arc::default(),
        }
    }
}

impl StubBackend {
    pub fn failing_menu() -> Self {
        Self {
            menu_status: StatusCode::INTERNAL_SERVER_ERROR,
            ..Self::default()
        }
    }

    pub fn rejecting_orders() -> Self {
        Self {
            order_status: StatusCode::BAD_REQUEST,
            ..Self::default()
        }
    }

    pub async fn spawn(self) -> Endpoints {
        let app = Router::new()
            .route("/menu", get(menu))
            .route("/orders", post(create_order))
            .route("/order", get(get_order))
            .route("/garbage", get(garbage))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub backend");
        });

        Endpoints::with_base(&format!("http://{addr}"))
    }
}

// Address nothing listens on
pub async fn closed_endpoints() -> Endpoints {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    drop(listener);
    Endpoints::with_base(&format!("http://{addr}"))
}

pub fn menu_fixture() -> Vec<Value> {
    vec![
        json!({"id": "1", "name": "Caesar Salad", "description": "Romaine, parmesan, croutons",
               "price": 10.0, "oldPrice": 15.99, "image": "salad.jpg", "category": "Salads"}),
        json!({"id": "2", "name": "Margherita Pizza", "description": "Tomato, mozzarella, basil",
               "price": 18.5, "image": "pizza.jpg", "category": "Main Courses"}),
        json!({"id": "3", "name": "Grilled Salmon", "description": "Lemon butter sauce",
               "price": 24.0, "image": "salmon.jpg", "category": "Main Courses"}),
        json!({"id": "4", "name": "Chocolate Lava Cake", "description": "Molten center",
               "price": 8.5, "image": "cake.jpg", "category": "Desserts"}),
        json!({"id": "5", "name": "Greek Salad", "description": "Feta and olives",
               "price": 11.0, "image": "greek.jpg", "category": "Salads"}),
    ]
}

async fn menu(
    State(backend): State<StubBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let category = params.get("category").cloned();
    backend.menu_queries.lock().await.push(category.clone());

    if !backend.menu_status.is_success() {
        return (backend.menu_status, Json(json!({"error": "boom"}))).into_response();
    }

    let dishes: Vec<Value> = menu_fixture()
        .into_iter()
        .filter(|dish| match &category {
            Some(category) => dish["category"] == category.as_str(),
            None => true,
        })
        .collect();
    Json(json!({ "dishes": dishes })).into_response()
}

async fn create_order(State(backend): State<StubBackend>, Json(body): Json<Value>) -> Response {
    if !backend.order_status.is_success() {
        return (backend.order_status, Json(json!({"error": "Missing required fields"})))
            .into_response();
    }

    backend.orders.lock().await.push(body);
    (
        backend.order_status,
        Json(json!({
            "orderId": PLACED_ORDER_ID,
            "status": "pending",
            "message": "Order created successfully"
        })),
    )
        .into_response()
}

async fn get_order(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("orderId").map(String::as_str) != Some("42") {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Order not found"}))).into_response();
    }

    Json(json!({
        "order": {
            "id": PLACED_ORDER_ID,
            "customerName": "Ann",
            "customerPhone": "+353",
            "customerEmail": "",
            "totalAmount": 28.5,
            "status": "pending",
            "createdAt": "2024-05-01T12:30:00",
            "items": [
                {"dishId": "1", "dishName": "Caesar Salad", "quantity": 2, "price": 10.0},
                {"dishId": "4", "dishName": "Chocolate Lava Cake", "quantity": 1, "price": 8.5}
            ]
        }
    }))
    .into_response()
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}
