use chrono::{DateTime, NaiveDate, Utc};

use crate::common::compound_types::{ReferencePair, ShipToLocation};
use crate::place_order::public_types::{
    DraftHeader, DraftLineItem, DraftPurchaseOrder, PurchaseOrderDraft,
};

impl PurchaseOrderDraft {
    /// The form's nascent state: sample values, dated `today`, with a business
    /// key and PO number derived from `now`.
    pub fn sample(today: NaiveDate, now: DateTime<Utc>) -> Self {
        let key = format!("HS-{}", now.timestamp_millis());
        Self {
            header: DraftHeader {
                receiver_id: "MYTHICAL".into(),
                sender_id: "HOMESUPPLIES".into(),
                message_type: "CUSTOMER_PURCHASE_ORDER".into(),
                business_key: key.clone(),
            },
            purchase_order: DraftPurchaseOrder {
                po_purpose: "New".into(),
                po_type: "NE".into(),
                po_number: key,
                customer_id: "HOMESUPPLIES".into(),
                customer_name: "HOMESUPPLIES".into(),
                contract_number: "C87313019".into(),
                po_date: today.format("%Y-%m-%d").to_string(),
                bill_to_code: "27097115".into(),
                buyer_name: "Maxime Balistreri".into(),
                buyer_email_address: "Teresa92@example.org".into(),
                references: vec![
                    ReferencePair::new("MR", "60024251"),
                    ReferencePair::new("KK", "S"),
                ],
                ship_to_location: ShipToLocation {
                    ship_to_location_name: "HOMESUPPLIES - Oakland".into(),
                    ship_to_location_code: "HD OAK".into(),
                    address_line1: "764 OLIVE BLVD".into(),
                    address_line2: String::new(),
                    city: "OAKLAND".into(),
                    state: "CA".into(),
                    postal_code: "94765".into(),
                    country: "US".into(),
                },
                line_items: vec![
                    sample_line(
                        "1",
                        "450",
                        "180.74",
                        "bci3036586",
                        "24 Inch Wide Built-In Automatic Coffee Machine with Home Connect",
                    ),
                    sample_line(
                        "2",
                        "670",
                        "101.17",
                        "bci4455957",
                        "16-7/8\" Inch Wide Convection Countertop Toaster Oven with Air Fry",
                    ),
                    sample_line(
                        "3",
                        "140",
                        "128.45",
                        "bci4377715",
                        "10-in-1 Touchscreen Countertop Smart Oven Starter Set",
                    ),
                    sample_line(
                        "4",
                        "320",
                        "171.64",
                        "bci4392348",
                        "30 Inch Wide Built In ADA Compliant Coffee Maker",
                    ),
                ],
            },
        }
    }

    /// Same as [`PurchaseOrderDraft::sample`] using the current UTC clock.
    pub fn sample_now() -> Self {
        let now = Utc::now();
        Self::sample(now.date_naive(), now)
    }

    /// Appends a blank line item numbered after the current count.
    pub fn add_line_item(&mut self) -> &mut DraftLineItem {
        let lines = &mut self.purchase_order.line_items;
        lines.push(DraftLineItem {
            purchase_order_line_id: (lines.len() + 1).to_string(),
            ..Default::default()
        });
        let last = lines.len() - 1;
        &mut lines[last]
    }

    /// Removes the line at `index`. The last remaining line is never removed.
    pub fn remove_line_item(&mut self, index: usize) -> Option<DraftLineItem> {
        let lines = &mut self.purchase_order.line_items;
        if lines.len() <= 1 || index >= lines.len() {
            return None;
        }
        Some(lines.remove(index))
    }
}

fn sample_line(
    id: &str,
    quantity: &str,
    unit_price: &str,
    item: &str,
    description: &str,
) -> DraftLineItem {
    DraftLineItem {
        purchase_order_line_id: id.into(),
        quantity: quantity.into(),
        unit_price: unit_price.into(),
        supplier_item_num: item.into(),
        item_description: description.into(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_sample() -> PurchaseOrderDraft {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        PurchaseOrderDraft::sample(now.date_naive(), now)
    }

    #[test]
    fn sample_uses_timestamp_for_keys() {
        let draft = fixed_sample();
        assert_eq!(draft.header.business_key, "HS-1709640000000");
        assert_eq!(draft.purchase_order.po_number, draft.header.business_key);
        assert_eq!(draft.purchase_order.po_date, "2024-03-05");
        assert_eq!(draft.purchase_order.line_items.len(), 4);
        assert!(draft.purchase_order.line_items.iter().all(DraftLineItem::is_complete));
    }

    #[test]
    fn added_line_is_numbered_and_blank() {
        let mut draft = fixed_sample();
        let line = draft.add_line_item();
        assert_eq!(line.purchase_order_line_id, "5");
        assert!(!line.is_complete());
    }

    #[test]
    fn never_removes_last_line() {
        let mut draft = fixed_sample();
        for _ in 0..3 {
            assert!(draft.remove_line_item(0).is_some());
        }
        assert_eq!(draft.remove_line_item(0), None);
        assert_eq!(draft.purchase_order.line_items.len(), 1);
        assert_eq!(draft.purchase_order.line_items[0].purchase_order_line_id, "4");
    }
}
