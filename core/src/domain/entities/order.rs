//! Order entity and its status timeline bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of status and timeline notes
pub const MAX_NOTES_LENGTH: usize = 500;

/// Order lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    ReadyForPickup,
    PickedUp,
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Cancellation is allowed before the kitchen starts preparing
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Wallet,
    Cod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Current status with the time it was set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusState {
    pub current: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// One recorded status transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub updated_by: Uuid,
    pub notes: Option<String>,
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub status: OrderStatusState,
    pub timeline: Vec<TimelineEntry>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Formats the human-facing order number for the `sequence`-th order
pub fn order_number(sequence: u64) -> String {
    format!("BMT-{:06}", sequence)
}

impl Order {
    /// Creates a pending, unpaid order with an empty timeline
    pub fn new(
        sequence: u64,
        customer_id: Uuid,
        restaurant_id: Uuid,
        payment_method: PaymentMethod,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_number: order_number(sequence),
            customer_id,
            restaurant_id,
            status: OrderStatusState {
                current: OrderStatus::Pending,
                timestamp: now,
                notes: None,
            },
            timeline: Vec::new(),
            payment_method,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the order to a new status. Notes are truncated to 500 characters.
    pub fn set_status(&mut self, status: OrderStatus, notes: Option<String>) {
        self.status = OrderStatusState {
            current: status,
            timestamp: Utc::now(),
            notes: notes.map(truncate_notes),
        };
    }

    pub fn can_be_cancelled(&self) -> bool {
        self.status.current.is_cancellable()
    }

    /// Pre-persistence transformation.
    ///
    /// `persisted_status` is the status currently stored, or `None` for a new
    /// order. When the current status differs, the timeline entry for that
    /// status is replaced, or appended if the status was never recorded.
    pub fn prepare_for_save(&mut self, persisted_status: Option<OrderStatus>) {
        let now = Utc::now();
        if persisted_status != Some(self.status.current) {
            let entry = TimelineEntry {
                status: self.status.current,
                timestamp: now,
                updated_by: self.customer_id,
                notes: self.status.notes.clone(),
            };
            match self
                .timeline
                .iter_mut()
                .find(|existing| existing.status == entry.status)
            {
                Some(existing) => *existing = entry,
                None => self.timeline.push(entry),
            }
        }
        self.updated_at = now;
    }
}

fn truncate_notes(notes: String) -> String {
    if notes.chars().count() <= MAX_NOTES_LENGTH {
        notes
    } else {
        notes.chars().take(MAX_NOTES_LENGTH).collect()
    }
}
