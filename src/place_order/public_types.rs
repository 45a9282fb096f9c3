use serde::{Deserialize, Serialize};

use crate::common::compound_types::{ReferencePair, ShipToLocation};
use crate::common::simple_types::ReferenceNumber;
use crate::counter::CounterError;
use crate::place_order::dto::SubmittedOrder;

// ======================================================
// Inputs: the form's working state
// ======================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftHeader {
    pub receiver_id: String,
    pub sender_id: String,
    pub message_type: String,
    pub business_key: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLineItem {
    pub purchase_order_line_id: String,
    pub quantity: String,
    pub unit_price: String,
    pub supplier_item_num: String,
    pub item_description: String,
}

impl DraftLineItem {
    /// A line is complete when none of its five fields is blank.
    pub fn is_complete(&self) -> bool {
        [
            &self.purchase_order_line_id,
            &self.quantity,
            &self.unit_price,
            &self.supplier_item_num,
            &self.item_description,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPurchaseOrder {
    pub po_purpose: String,
    pub po_type: String,
    pub po_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub contract_number: String,
    /// `YYYY-MM-DD`
    pub po_date: String,
    pub bill_to_code: String,
    pub buyer_name: String,
    pub buyer_email_address: String,
    #[serde(default)]
    pub references: Vec<ReferencePair>,
    pub ship_to_location: ShipToLocation,
    #[serde(default)]
    pub line_items: Vec<DraftLineItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDraft {
    pub header: DraftHeader,
    pub purchase_order: DraftPurchaseOrder,
}

// ======================================================
// Outputs
// ======================================================

/// What came back from one relay attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The relay answered. The status may still be an upstream error.
    Completed {
        status: u16,
        status_text: String,
        body: String,
    },
    /// The relay itself could not be reached.
    ConnectionFailed { message: String },
}

impl RelayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RelayOutcome::Completed { status, .. } if (200..300).contains(status))
    }
}

/// Raised to the caller when some line items will be left out of the order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropWarning {
    pub valid: usize,
    pub dropped: usize,
}

#[derive(Clone, Debug)]
pub struct PlacedOrder {
    pub order: SubmittedOrder,
    pub reference: ReferenceNumber,
    pub outcome: RelayOutcome,
}

// ======================================================
// Errors
// ======================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no complete line items")]
    NoCompleteLineItems,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("submission cancelled: {dropped} incomplete line item(s) would have been skipped")]
    UserDeclined { dropped: usize },

    #[error("could not generate an order reference: {0}")]
    Counter(#[from] CounterError),
}
