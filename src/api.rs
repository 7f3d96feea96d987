//! Thin client for the restaurant backend. Each call is a single request
//! with no retries and no caching.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

use crate::config::Endpoints;
use crate::models::{
    Dish, MenuEnvelope, OrderDetails, OrderEnvelope, OrderRequest, OrderResponse,
};

const MENU: &str = "menu";
const CREATE_ORDER: &str = "create-order";
const GET_ORDER: &str = "get-order";

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{endpoint} returned a malformed body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub async fn get_menu(&self, category: Option<&str>) -> Result<Vec<Dish>, ApiError> {
        let url = match category {
            Some(category) => format!(
                "{}?category={}",
                self.endpoints.menu,
                urlencoding::encode(category)
            ),
            None => self.endpoints.menu.clone(),
        };

        debug!(%url, "fetching menu");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint: MENU, source })?;

        let envelope: MenuEnvelope = read_json(MENU, response).await?;
        info!(dishes = envelope.dishes.len(), category, "menu loaded");
        Ok(envelope.dishes)
    }

    pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError> {
        debug!(lines = order.items.len(), total = order.total(), "submitting order");
        let response = self
            .http
            .post(&self.endpoints.create_order)
            .json(order)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: CREATE_ORDER,
                source,
            })?;

        let created: OrderResponse = read_json(CREATE_ORDER, response).await?;
        info!(order_id = created.order_id, status = %created.status, "order created");
        Ok(created)
    }

    pub async fn get_order(&self, order_id: i64) -> Result<OrderDetails, ApiError> {
        let url = format!("{}?orderId={}", self.endpoints.get_order, order_id);

        debug!(%url, "fetching order");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: GET_ORDER,
                source,
            })?;

        let envelope: OrderEnvelope = read_json(GET_ORDER, response).await?;
        info!(order_id, status = %envelope.order.status, "order fetched");
        Ok(envelope.order)
    }
}

// Fail on any non-success status, then decode the body
async fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ApiError::Transport { endpoint, source })?;

    if !status.is_success() {
        warn!(endpoint, %status, "backend rejected request");
        return Err(ApiError::Status {
            endpoint,
            status,
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
}
