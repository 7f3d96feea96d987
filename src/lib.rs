//! Terminal ordering client for a restaurant backend: browse the menu,
//! build a cart and submit orders.

pub mod api;
pub mod cart;
pub mod config;
pub mod controller;
pub mod models;
pub mod session;
pub mod view;

pub use api::{ApiClient, ApiError};
pub use cart::Cart;
pub use config::{Endpoints, Settings};
pub use controller::{CartController, CheckoutOutcome, Notification, NotificationLevel};
