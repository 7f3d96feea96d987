use serde::{Deserialize, Deserializer, Serialize};

pub const PLACEHOLDER_CUSTOMER_NAME: &str = "Guest";
pub const PLACEHOLDER_CUSTOMER_PHONE: &str = "N/A";

/// A menu item as served by the menu endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    pub category: String,
}

impl Dish {
    // Amount saved compared to the old price, if the dish is discounted
    pub fn discount(&self) -> Option<f64> {
        self.old_price
            .filter(|old| *old > self.price)
            .map(|old| old - self.price)
    }
}

/// A dish in the cart together with how many of it were ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub dish: Dish,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(dish: Dish) -> Self {
        Self { dish, quantity: 1 }
    }

    pub fn id(&self) -> &str {
        &self.dish.id
    }

    pub fn subtotal(&self) -> f64 {
        self.dish.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER_CUSTOMER_NAME.to_string(),
            phone: PLACEHOLDER_CUSTOMER_PHONE.to_string(),
            email: None,
        }
    }
}

impl CustomerInfo {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

// Body of the create-order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub items: Vec<OrderLine>,
}

impl OrderRequest {
    pub fn new(customer: &CustomerInfo, items: &[CartItem]) -> Self {
        Self {
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            customer_email: customer
                .email
                .clone()
                .filter(|email| !email.trim().is_empty()),
            items: items.iter().map(OrderLine::from).collect(),
        }
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.dish.id.clone(),
            name: item.dish.name.clone(),
            price: item.dish.price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: i64,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub customer_email: String,
    pub total_amount: f64,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub items: Vec<OrderDetailsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailsItem {
    pub dish_id: String,
    pub dish_name: String,
    pub quantity: u32,
    pub price: f64,
}

// Response envelopes
#[derive(Debug, Serialize, Deserialize)]
pub struct MenuEnvelope {
    pub dishes: Vec<Dish>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderEnvelope {
    pub order: OrderDetails,
}

// Order file from YAML input
#[derive(Debug, Deserialize)]
pub struct OrderFile {
    pub customer: Option<CustomerInfo>,
    pub items: Vec<OrderFileLine>,
}

#[derive(Debug, Deserialize)]
pub struct OrderFileLine {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

// Backend passes nullable text columns through as JSON null
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
