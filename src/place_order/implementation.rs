use async_fn_traits::AsyncFn1;
use tracing::{debug, info, warn};

use crate::common::compound_types::{ReferencePair, ShipToLocation};
use crate::common::simple_types::{OrderDate, ReferenceNumber};
use crate::counter::OrderReferenceCounter;
use crate::place_order::dto::*;
use crate::place_order::internal_types::*;
use crate::place_order::public_types::*;

// ======================================================
// Section 1 : Define each step in the workflow using types
// ======================================================

/// Asks whether to go ahead when incomplete line items will be skipped.
pub trait ConfirmDroppedItems: AsyncFn1<DropWarning, Output = bool> + Copy {}
impl<T> ConfirmDroppedItems for T where T: AsyncFn1<DropWarning, Output = bool> + Copy {}

/// Hands the built order to the relay and reports what happened.
pub trait SendToRelay: AsyncFn1<SubmittedOrder, Output = RelayOutcome> + Copy {}
impl<T> SendToRelay for T where T: AsyncFn1<SubmittedOrder, Output = RelayOutcome> + Copy {}

// ======================================================
// Section 2 : Implementation
// ======================================================

// ---------------------------
// ValidateLineItems step
// ---------------------------

pub(crate) fn validate_line_items(
    lines: &[DraftLineItem],
) -> Result<ValidatedLineItems<'_>, ValidationError> {
    let items: Vec<&DraftLineItem> = lines.iter().filter(|line| line.is_complete()).collect();
    if items.is_empty() {
        return Err(ValidationError::NoCompleteLineItems);
    }
    let dropped = lines.len() - items.len();
    Ok(ValidatedLineItems { items, dropped })
}

// ---------------------------
// Transform step
// ---------------------------

fn to_line_item_dto(line: &DraftLineItem) -> LineItemDto {
    LineItemDto {
        purchase_order_line_id: line.purchase_order_line_id.clone(),
        quantity: line.quantity.clone(),
        unit_price: line.unit_price.clone(),
        supplier_item_num: line.supplier_item_num.clone(),
        item_description: line.item_description.clone(),
    }
}

fn to_reference_dto(reference: &ReferencePair) -> ReferenceDto {
    ReferenceDto {
        reference_type: reference.reference_type.clone(),
        reference_value: reference.reference_value.clone(),
    }
}

fn to_ship_to_dto(location: &ShipToLocation) -> ShipToLocationDto {
    let address_line2 = Some(location.address_line2.clone()).filter(|line| !line.is_empty());
    ShipToLocationDto {
        ship_to_location_name: location.ship_to_location_name.clone(),
        ship_to_location_code: location.ship_to_location_code.clone(),
        address: AddressDto {
            address_line1: location.address_line1.clone(),
            address_line2,
            city: location.city.clone(),
            state: location.state.clone(),
            postal_code: location.postal_code.clone(),
            country: location.country.clone(),
        },
    }
}

impl SubmittedOrder {
    /// Builds the wire document from a draft, keeping only complete line items.
    pub fn from_draft(draft: &PurchaseOrderDraft) -> Result<DraftTransform, ValidationError> {
        let po = &draft.purchase_order;
        let validated = validate_line_items(&po.line_items)?;

        debug!(
            total = po.line_items.len(),
            valid = validated.items.len(),
            skipped = validated.dropped,
            "payload verification"
        );

        let order = SubmittedOrder {
            message: B2BMessage {
                header: MessageHeader {
                    receiver_id: draft.header.receiver_id.clone(),
                    sender_id: draft.header.sender_id.clone(),
                    message_type: draft.header.message_type.clone(),
                    business_key: draft.header.business_key.clone(),
                },
                data: MessageData {
                    purchase_order: PurchaseOrderDto {
                        po_purpose: po.po_purpose.clone(),
                        po_type: po.po_type.clone(),
                        po_number: po.po_number.clone(),
                        customer_id: po.customer_id.clone(),
                        customer_name: po.customer_name.clone(),
                        contract_number: po.contract_number.clone(),
                        po_date: OrderDate::new(po.po_date.as_str()).to_wire(),
                        bill_to_code: po.bill_to_code.clone(),
                        buyer_name: po.buyer_name.clone(),
                        buyer_email_address: po.buyer_email_address.clone(),
                        references: po.references.iter().map(to_reference_dto).collect(),
                        order_ship_to_location: to_ship_to_dto(&po.ship_to_location),
                        po_line_items: validated.items.into_iter().map(to_line_item_dto).collect(),
                    },
                },
            },
        };

        Ok(DraftTransform {
            order,
            dropped_line_items: validated.dropped,
        })
    }
}

// ---------------------------
// Confirm step
// ---------------------------

async fn confirm_transform(
    confirm_dropped_items: impl ConfirmDroppedItems,
    transform: DraftTransform,
) -> Result<SubmittedOrder, PlaceOrderError> {
    let dropped = transform.dropped_line_items;
    if dropped == 0 {
        return Ok(transform.order);
    }

    let warning = DropWarning {
        valid: transform.order.purchase_order().po_line_items.len(),
        dropped,
    };
    if confirm_dropped_items(warning).await {
        Ok(transform.order)
    } else {
        warn!(dropped, "submission declined");
        Err(PlaceOrderError::UserDeclined { dropped })
    }
}

// ---------------------------
// overall workflow
// ---------------------------

/// Transforms the draft, confirms any skipped lines, takes the next reference
/// number and sends the order to the relay.
///
/// The reference is taken before the relay call, so a failed call still
/// leaves the user with a number to quote. Validation and a declined
/// confirmation return before either side effect.
pub async fn place_order(
    confirm_dropped_items: impl ConfirmDroppedItems,
    send_to_relay: impl SendToRelay,
    counter: &impl OrderReferenceCounter,
    draft: &PurchaseOrderDraft,
) -> Result<PlacedOrder, PlaceOrderError> {
    let transform = SubmittedOrder::from_draft(draft)?;
    let order = confirm_transform(confirm_dropped_items, transform).await?;

    let reference = ReferenceNumber::new(counter.increment_and_get()?);
    info!(%reference, po_number = %order.purchase_order().po_number, "submitting order");

    let outcome = send_to_relay(order.clone()).await;
    match &outcome {
        RelayOutcome::Completed { status, .. } => info!(%reference, status, "relay answered"),
        RelayOutcome::ConnectionFailed { message } => warn!(%reference, %message, "relay unreachable"),
    }

    Ok(PlacedOrder {
        order,
        reference,
        outcome,
    })
}
