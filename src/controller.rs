//! Application state for one ordering session: the loaded menu, the cart,
//! the category filter and the queue of user-facing notifications.

use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::cart::{Cart, MAX_QUANTITY};
use crate::models::{
    CartItem, CustomerInfo, Dish, OrderDetails, OrderFile, OrderRequest, OrderResponse,
};

pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn new(level: NotificationLevel, title: &str, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Placed(OrderResponse),
    EmptyCart,
    MissingCustomer,
    Failed,
}

pub struct CartController {
    api: ApiClient,
    dishes: Vec<Dish>,
    cart: Cart,
    selected_category: String,
    cart_open: bool,
    loading: bool,
    customer: CustomerInfo,
    last_order: Option<OrderResponse>,
    notifications: Vec<Notification>,
}

impl CartController {
    pub fn new(api: ApiClient, customer: CustomerInfo) -> Self {
        Self {
            api,
            dishes: Vec::new(),
            cart: Cart::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            cart_open: false,
            loading: false,
            customer,
            last_order: None,
            notifications: Vec::new(),
        }
    }

    /// Fetches the full menu. A failure leaves the dish list empty and
    /// queues an error notification; it is never returned to the caller.
    pub async fn load_menu(&mut self) {
        self.loading = true;

        match self.api.get_menu(None).await {
            Ok(dishes) => {
                info!(dishes = dishes.len(), "menu ready");
                self.dishes = dishes;
            }
            Err(e) => {
                error!(error = %e, "failed to load menu");
                self.dishes.clear();
                self.notify(
                    NotificationLevel::Error,
                    "Error",
                    "Failed to load menu. Please try again later.",
                );
            }
        }

        self.loading = false;
    }

    pub fn add_to_cart(&mut self, dish_id: &str) -> bool {
        let Some(dish) = self.dishes.iter().find(|dish| dish.id == dish_id) else {
            warn!(dish_id, "add to cart for unknown dish");
            self.notify(
                NotificationLevel::Error,
                "Unknown dish",
                format!("No dish with id {dish_id} on the menu"),
            );
            return false;
        };

        let Some(quantity) = self.cart.add(dish) else {
            let description = format!("{} is already at the limit of {MAX_QUANTITY}", dish.name);
            self.notify(NotificationLevel::Error, "Quantity limit", description);
            return false;
        };
        info!(dish_id, quantity, "added to cart");

        let description = format!("{} has been added to your cart", dish.name);
        self.notify(NotificationLevel::Success, "Added to cart", description);
        true
    }

    /// Zero removes the entry and a positive value sets it in place. Negative
    /// input and values above [`MAX_QUANTITY`] leave the cart unchanged, as do
    /// dishes not already in the cart.
    pub fn update_quantity(&mut self, dish_id: &str, quantity: i64) -> bool {
        let quantity = match u32::try_from(quantity) {
            Ok(quantity) if quantity <= MAX_QUANTITY => quantity,
            _ => {
                warn!(dish_id, quantity, "quantity out of range");
                self.notify(
                    NotificationLevel::Error,
                    "Invalid quantity",
                    format!("Quantity must be between 0 and {MAX_QUANTITY}"),
                );
                return false;
            }
        };

        let touched = self.cart.update_quantity(dish_id, quantity);
        if touched {
            info!(dish_id, quantity, "cart quantity updated");
        } else {
            self.notify(
                NotificationLevel::Error,
                "Not in cart",
                format!("Dish {dish_id} is not in the cart"),
            );
        }
        touched
    }

    /// Merges order-file lines into the cart, adding each line's quantity to
    /// whatever is already there. Returns a description of every skipped line.
    pub fn fill_from(&mut self, order: &OrderFile) -> Vec<String> {
        let mut skipped = Vec::new();

        for line in &order.items {
            if line.quantity == 0 {
                skipped.push(format!("{} (zero quantity)", line.id));
                continue;
            }

            let Some(dish) = self.dishes.iter().find(|dish| dish.id == line.id) else {
                skipped.push(format!("{} (not on the menu)", line.id));
                continue;
            };

            let existing = self.cart.get(&line.id).map_or(0, |item| item.quantity);
            let target = existing.saturating_add(line.quantity);
            if target > MAX_QUANTITY {
                skipped.push(format!("{} (over the limit of {MAX_QUANTITY})", line.id));
                continue;
            }

            if existing == 0 {
                self.cart.add(dish);
            }
            self.cart.update_quantity(&line.id, target);
            info!(dish_id = %line.id, quantity = target, "order line merged");
        }

        skipped
    }

    pub fn increment(&mut self, dish_id: &str) -> bool {
        if self.cart.increment(dish_id) {
            return true;
        }

        let description = match self.cart.get(dish_id) {
            Some(_) => format!("Dish {dish_id} is already at the limit of {MAX_QUANTITY}"),
            None => format!("Dish {dish_id} is not in the cart"),
        };
        self.notify(NotificationLevel::Error, "Cannot add more", description);
        false
    }

    // At quantity 1 this removes the line
    pub fn decrement(&mut self, dish_id: &str) -> bool {
        if self.cart.decrement(dish_id) {
            return true;
        }

        self.notify(
            NotificationLevel::Error,
            "Not in cart",
            format!("Dish {dish_id} is not in the cart"),
        );
        false
    }

    pub fn select_category(&mut self, category: &str) -> bool {
        let known = category == ALL_CATEGORIES || self.dishes.iter().any(|d| d.category == category);
        if !known {
            self.notify(
                NotificationLevel::Error,
                "Unknown category",
                format!("There is no {category} category on the menu"),
            );
            return false;
        }

        self.selected_category = category.to_string();
        true
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    pub fn set_customer(&mut self, customer: CustomerInfo) {
        self.customer = customer;
    }

    /// Submits the cart as an order. On success the cart is emptied and the
    /// drawer closed; on failure both are left as they were.
    pub async fn checkout(&mut self) -> CheckoutOutcome {
        if self.cart.is_empty() {
            self.notify(
                NotificationLevel::Info,
                "Cart is empty",
                "Add some dishes before checking out",
            );
            return CheckoutOutcome::EmptyCart;
        }

        if !self.customer.is_complete() {
            self.notify(
                NotificationLevel::Error,
                "Missing details",
                "A name and phone number are required to place an order",
            );
            return CheckoutOutcome::MissingCustomer;
        }

        let order = OrderRequest::new(&self.customer, self.cart.items());
        info!(lines = order.items.len(), total = order.total(), "checking out");

        match self.api.create_order(&order).await {
            Ok(created) => {
                self.cart.clear();
                self.cart_open = false;
                self.notify(
                    NotificationLevel::Success,
                    "Order placed",
                    format!("Order #{}: {}", created.order_id, created.message),
                );
                self.last_order = Some(created.clone());
                CheckoutOutcome::Placed(created)
            }
            Err(e) => {
                error!(error = %e, "checkout failed");
                self.notify(
                    NotificationLevel::Error,
                    "Error",
                    "Failed to place order. Please try again.",
                );
                CheckoutOutcome::Failed
            }
        }
    }

    pub async fn track_order(&mut self, order_id: i64) -> Option<OrderDetails> {
        match self.api.get_order(order_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                error!(order_id, error = %e, "failed to fetch order");
                self.notify(
                    NotificationLevel::Error,
                    "Error",
                    format!("Could not load order #{order_id}"),
                );
                None
            }
        }
    }

    // "All" first, then categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for dish in &self.dishes {
            if !categories.contains(&dish.category.as_str()) {
                categories.push(&dish.category);
            }
        }
        categories
    }

    pub fn filtered_dishes(&self) -> Vec<&Dish> {
        if self.selected_category == ALL_CATEGORIES {
            return self.dishes.iter().collect();
        }
        self.dishes
            .iter()
            .filter(|dish| dish.category == self.selected_category)
            .collect()
    }

    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    pub fn cart_items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn last_order(&self) -> Option<&OrderResponse> {
        self.last_order.as_ref()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, level: NotificationLevel, title: &str, description: impl Into<String>) {
        self.notifications
            .push(Notification::new(level, title, description));
    }
}
