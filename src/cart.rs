use crate::models::{CartItem, Dish};

/// Largest quantity a single cart line may hold.
pub const MAX_QUANTITY: u32 = 999;

/// In-progress selection of dishes, one entry per dish id, kept in the
/// order the dishes were first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges into an existing entry or starts a new one at quantity 1.
    /// Returns the new quantity, or `None` when the entry is already at
    /// [`MAX_QUANTITY`].
    pub fn add(&mut self, dish: &Dish) -> Option<u32> {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == dish.id) {
            if item.quantity >= MAX_QUANTITY {
                return None;
            }
            item.quantity += 1;
            return Some(item.quantity);
        }

        self.items.push(CartItem::new(dish.clone()));
        Some(1)
    }

    /// Sets the quantity of an existing entry. Zero removes it. Entries are
    /// never created here, and quantities above [`MAX_QUANTITY`] are refused.
    /// Returns whether an entry was touched.
    pub fn update_quantity(&mut self, dish_id: &str, quantity: u32) -> bool {
        if quantity > MAX_QUANTITY {
            return false;
        }

        if quantity == 0 {
            let before = self.items.len();
            self.items.retain(|item| item.id() != dish_id);
            return self.items.len() != before;
        }

        match self.items.iter_mut().find(|item| item.id() == dish_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn increment(&mut self, dish_id: &str) -> bool {
        match self.get(dish_id) {
            Some(item) => {
                let next = item.quantity.saturating_add(1);
                self.update_quantity(dish_id, next)
            }
            None => false,
        }
    }

    pub fn decrement(&mut self, dish_id: &str) -> bool {
        match self.get(dish_id) {
            Some(item) => {
                let next = item.quantity.saturating_sub(1);
                self.update_quantity(dish_id, next)
            }
            None => false,
        }
    }

    pub fn get(&self, dish_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == dish_id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Sum of quantities across all entries
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
