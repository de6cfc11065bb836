use serde::{Deserialize, Serialize};

/// Unique identifier for an order.
///
/// Wraps the numeric id assigned by the store manager to provide type
/// safety and prevent mixing up order ids with other numeric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Creates an order ID from a raw numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for u64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Unique identifier for the user placing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a user ID from a raw numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an item ID from a raw numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One line of an order: an item and the quantity ordered.
///
/// Serializes to the wire shape the stock service consumes
/// (`{"item_id": .., "quantity": ..}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The stock item being ordered.
    pub item_id: ItemId,
    /// Quantity to check out of stock.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates an order item line.
    pub fn new(item_id: impl Into<ItemId>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// The order payload a saga execution is started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderData {
    /// The user placing the order.
    pub user_id: UserId,
    /// The ordered items.
    pub order_items: Vec<OrderItem>,
}

impl OrderData {
    /// Creates an order payload.
    pub fn new(user_id: impl Into<UserId>, order_items: Vec<OrderItem>) -> Self {
        Self {
            user_id: user_id.into(),
            order_items,
        }
    }

    /// Returns true if the order contains at least one item.
    pub fn has_items(&self) -> bool {
        !self.order_items.is_empty()
    }
}
