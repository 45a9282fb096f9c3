//! The wire document accepted by the order-intake API.
//!
//! Key names are fixed by the upstream schema; every value is carried as the
//! text the user entered, apart from the order date and address line 2.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedOrder {
    #[serde(rename = "B2BMessage")]
    pub message: B2BMessage,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct B2BMessage {
    pub header: MessageHeader,
    pub data: MessageData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageHeader {
    #[serde(rename = "ReceiverID")]
    pub receiver_id: String,
    #[serde(rename = "SenderID")]
    pub sender_id: String,
    pub message_type: String,
    pub business_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageData {
    pub purchase_order: PurchaseOrderDto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseOrderDto {
    #[serde(rename = "POPurpose")]
    pub po_purpose: String,
    #[serde(rename = "POType")]
    pub po_type: String,
    #[serde(rename = "PONumber")]
    pub po_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub contract_number: String,
    /// `YYYYMMDD`
    #[serde(rename = "PODate")]
    pub po_date: String,
    pub bill_to_code: String,
    pub buyer_name: String,
    pub buyer_email_address: String,
    pub references: Vec<ReferenceDto>,
    pub order_ship_to_location: ShipToLocationDto,
    #[serde(rename = "POLineItems")]
    pub po_line_items: Vec<LineItemDto>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReferenceDto {
    pub reference_type: String,
    pub reference_value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipToLocationDto {
    pub ship_to_location_name: String,
    pub ship_to_location_code: String,
    pub address: AddressDto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDto {
    #[serde(rename = "AddressLine1")]
    pub address_line1: String,
    /// Serialized as `null` when absent, never as an empty string.
    #[serde(rename = "AddressLine2")]
    pub address_line2: Option<String>,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    #[serde(rename = "Country")]
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineItemDto {
    pub purchase_order_line_id: String,
    pub quantity: String,
    pub unit_price: String,
    pub supplier_item_num: String,
    pub item_description: String,
}

/// A built order together with how many draft lines were left out of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftTransform {
    pub order: SubmittedOrder,
    pub dropped_line_items: usize,
}

impl SubmittedOrder {
    pub fn header(&self) -> &MessageHeader {
        &self.message.header
    }

    pub fn purchase_order(&self) -> &PurchaseOrderDto {
        &self.message.data.purchase_order
    }
}
