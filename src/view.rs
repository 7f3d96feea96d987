//! Text renderers for the terminal session. Everything here is a pure
//! function of the data handed in.

use crate::controller::{Notification, NotificationLevel};
use crate::models::{CartItem, Dish, OrderDetails};

pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

// Selected tab is bracketed
pub fn render_category_tabs(categories: &[&str], selected: &str) -> String {
    categories
        .iter()
        .map(|category| {
            if *category == selected {
                format!("[{category}]")
            } else {
                format!(" {category} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_dish_grid(dishes: &[&Dish]) -> String {
    if dishes.is_empty() {
        return "No dishes to show\n".to_string();
    }

    let mut out = String::new();
    for dish in dishes {
        let mut line = format!("{:>4}  {}  {}", dish.id, dish.name, format_price(dish.price));
        if let (Some(old), Some(_)) = (dish.old_price, dish.discount()) {
            line.push_str(&format!(" (was {})", format_price(old)));
        }
        out.push_str(&format!("{line}  [{}]\n", dish.category));
        if !dish.description.is_empty() {
            out.push_str(&format!("      {}\n", dish.description));
        }
    }
    out
}

pub fn render_cart_drawer(items: &[CartItem], total: f64) -> String {
    let mut out = String::from("Your Cart\n");

    if items.is_empty() {
        out.push_str("  Your cart is empty\n");
        return out;
    }

    for item in items {
        out.push_str(&format!(
            "  {:>4}  {:<28} {} x {:<3} {:>10}\n",
            item.dish.id,
            item.dish.name,
            format_price(item.dish.price),
            item.quantity,
            format_price(item.subtotal())
        ));
    }
    out.push_str(&format!("  Total: {}\n", format_price(total)));
    out
}

pub fn render_order_details(order: &OrderDetails) -> String {
    let mut lines = vec![
        format!("Order #{} ({})", order.id, order.status),
        format!("  Placed:   {}", order.created_at),
        format!("  Customer: {} {}", order.customer_name, order.customer_phone),
    ];
    if !order.customer_email.is_empty() {
        lines.push(format!("  Email:    {}", order.customer_email));
    }
    lines.extend(order.items.iter().map(|item| {
        format!(
            "  {:>4}  {:<28} {} x {}",
            item.dish_id,
            item.dish_name,
            format_price(item.price),
            item.quantity
        )
    }));
    lines.push(format!("  Total: {}", format_price(order.total_amount)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_notification(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Info => "ℹ️ ",
        NotificationLevel::Success => "✅",
        NotificationLevel::Error => "❌",
    };
    format!(
        "{} {}: {}",
        marker, notification.title, notification.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderDetailsItem;

    fn dish(id: &str, price: f64, old_price: Option<f64>) -> Dish {
        Dish {
            id: id.to_string(),
            name: format!("Dish {id}"),
            description: "Tasty".to_string(),
            price,
            old_price,
            image: String::new(),
            category: "Salads".to_string(),
        }
    }

    #[test]
    fn prices_have_two_decimals() {
        assert_eq!(format_price(12.99), "$12.99");
        assert_eq!(format_price(20.0), "$20.00");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn selected_tab_is_bracketed() {
        let tabs = render_category_tabs(&["All", "Salads", "Desserts"], "Salads");
        assert!(tabs.contains("[Salads]"));
        assert!(tabs.contains(" All "));
        assert!(!tabs.contains("[All]"));
    }

    #[test]
    fn grid_shows_old_price_only_for_discounts() {
        let cheap = dish("1", 12.99, Some(15.99));
        let odd = dish("2", 9.0, Some(8.0));
        let grid = render_dish_grid(&[&cheap, &odd]);
        assert!(grid.contains("$12.99 (was $15.99)"));
        assert!(!grid.contains("(was $8.00)"));
    }

    #[test]
    fn grid_line_layout() {
        let plain = dish("12", 8.5, None);
        assert_eq!(
            render_dish_grid(&[&plain]),
            "  12  Dish 12  $8.50  [Salads]\n      Tasty\n"
        );
        assert_eq!(render_dish_grid(&[]), "No dishes to show\n");
    }

    #[test]
    fn empty_drawer_says_so() {
        let drawer = render_cart_drawer(&[], 0.0);
        assert!(drawer.contains("Your cart is empty"));
        assert!(!drawer.contains("Total"));
    }

    #[test]
    fn drawer_lists_subtotals_and_total() {
        let mut item = CartItem::new(dish("1", 10.0, None));
        item.quantity = 3;
        let drawer = render_cart_drawer(&[item], 30.0);
        assert!(drawer.contains("$30.00"));
        assert!(drawer.contains("Total: $30.00"));
    }

    #[test]
    fn order_details_skip_blank_email() {
        let order = OrderDetails {
            id: 7,
            customer_name: "Ann".to_string(),
            customer_phone: "+1".to_string(),
            customer_email: String::new(),
            total_amount: 21.98,
            status: "pending".to_string(),
            created_at: "2024-01-01T10:00:00".to_string(),
            items: vec![OrderDetailsItem {
                dish_id: "4".to_string(),
                dish_name: "Chocolate Lava Cake".to_string(),
                quantity: 2,
                price: 10.99,
            }],
        };
        let text = render_order_details(&order);
        assert!(text.starts_with("Order #7 (pending)"));
        assert!(!text.contains("Email"));
        assert!(text.contains("Chocolate Lava Cake"));
        assert!(text.contains("Total: $21.98"));
    }
}
