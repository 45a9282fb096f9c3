//! Read-only summary shown after a submission attempt.

use std::fmt;

use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, CellAlignment, Table};

use crate::common::simple_types::{BillingAmount, Price, ReferenceNumber};
use crate::place_order::dto::{LineItemDto, SubmittedOrder};
use crate::place_order::public_types::{PlacedOrder, RelayOutcome};

pub const DEFAULT_COMPANY_NAME: &str = "<company>";

/// Status text some relays use when the order went out but the response
/// could not be read back.
const LIKELY_SUBMITTED: &str = "Order Likely Submitted";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Accepted,
    Submitted,
    Warning,
    Failed,
}

impl Banner {
    pub fn classify(outcome: &RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Completed { status: 202, .. } => Banner::Accepted,
            RelayOutcome::Completed { status, .. } if (200..300).contains(status) => {
                Banner::Submitted
            }
            RelayOutcome::Completed { status_text, .. }
                if status_text.contains(LIKELY_SUBMITTED) =>
            {
                Banner::Warning
            }
            _ => Banner::Failed,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Banner::Accepted | Banner::Submitted => "✓",
            Banner::Warning => "⚠",
            Banner::Failed => "✗",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Banner::Accepted => "Purchase Order Accepted",
            Banner::Submitted => "Purchase Order Submitted Successfully!",
            Banner::Warning => "Purchase Order Submitted (Response Could Not Be Verified)",
            Banner::Failed => "Purchase Order Submission Failed",
        }
    }

    pub fn message(self, company_name: &str) -> String {
        match self {
            Banner::Accepted => {
                format!("Your order has been created with {company_name}, see order number below")
            }
            Banner::Submitted => "Your order has been processed and sent to the supplier.".into(),
            Banner::Warning => {
                "Your order was sent to the API, but its response could not be verified.".into()
            }
            Banner::Failed => {
                "There was an error processing your order. Please check the details below.".into()
            }
        }
    }
}

pub fn line_total(item: &LineItemDto) -> Price {
    Price::parse(&item.unit_price).times(Price::parse(&item.quantity))
}

pub fn order_total(order: &SubmittedOrder) -> BillingAmount {
    BillingAmount::sum_prices(order.purchase_order().po_line_items.iter().map(line_total))
}

pub struct Summary<'a> {
    order: &'a SubmittedOrder,
    reference: ReferenceNumber,
    outcome: &'a RelayOutcome,
    company_name: &'a str,
}

impl<'a> Summary<'a> {
    pub fn new(
        order: &'a SubmittedOrder,
        reference: ReferenceNumber,
        outcome: &'a RelayOutcome,
        company_name: &'a str,
    ) -> Self {
        Self {
            order,
            reference,
            outcome,
            company_name,
        }
    }

    pub fn of(placed: &'a PlacedOrder, company_name: &'a str) -> Self {
        Self::new(&placed.order, placed.reference, &placed.outcome, company_name)
    }

    pub fn banner(&self) -> Banner {
        Banner::classify(self.outcome)
    }

    fn line_items_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY).set_header(vec![
            "Line",
            "Supplier Item #",
            "Description",
            "Quantity",
            "Unit Price",
            "Total",
        ]);
        for item in &self.order.purchase_order().po_line_items {
            table.add_row(vec![
                Cell::new(&item.purchase_order_line_id),
                Cell::new(&item.supplier_item_num),
                Cell::new(&item.item_description),
                Cell::new(&item.quantity).set_alignment(CellAlignment::Right),
                Cell::new(format!("${}", Price::parse(&item.unit_price)))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("${}", line_total(item))).set_alignment(CellAlignment::Right),
            ]);
        }
        table
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = self.banner();
        writeln!(f, "{} {}", banner.icon(), banner.title())?;
        writeln!(f, "{}", banner.message(self.company_name))?;
        writeln!(f)?;
        writeln!(f, "Order Reference Number: {}", self.reference)?;
        writeln!(f)?;

        writeln!(f, "== API Response ==")?;
        match self.outcome {
            RelayOutcome::Completed {
                status,
                status_text,
                body,
            } => {
                writeln!(f, "Status: {status} {status_text}")?;
                if body.is_empty() {
                    writeln!(f, "Order submitted successfully (no response body)")?;
                } else {
                    writeln!(f, "{body}")?;
                }
            }
            RelayOutcome::ConnectionFailed { message } => {
                writeln!(f, "Status: Error Connection Error")?;
                writeln!(f, "{message}")?;
            }
        }
        writeln!(f)?;

        let header = self.order.header();
        writeln!(f, "== Message Header ==")?;
        writeln!(f, "Receiver ID:     {}", header.receiver_id)?;
        writeln!(f, "Sender ID:       {}", header.sender_id)?;
        writeln!(f, "Message Type:    {}", header.message_type)?;
        writeln!(f, "Business Key:    {}", header.business_key)?;
        writeln!(f)?;

        let po = self.order.purchase_order();
        writeln!(f, "== Purchase Order Details ==")?;
        writeln!(f, "PO Number:       {}", po.po_number)?;
        writeln!(f, "PO Purpose:      {}", po.po_purpose)?;
        writeln!(f, "PO Type:         {}", po.po_type)?;
        writeln!(f, "PO Date:         {}", po.po_date)?;
        writeln!(f, "Customer ID:     {}", po.customer_id)?;
        writeln!(f, "Customer Name:   {}", po.customer_name)?;
        writeln!(f, "Contract Number: {}", po.contract_number)?;
        writeln!(f, "Bill To Code:    {}", po.bill_to_code)?;
        writeln!(f, "Buyer Name:      {}", po.buyer_name)?;
        writeln!(f, "Buyer Email:     {}", po.buyer_email_address)?;
        writeln!(f)?;

        writeln!(f, "== References ==")?;
        for reference in &po.references {
            writeln!(f, "{}  {}", reference.reference_type, reference.reference_value)?;
        }
        writeln!(f)?;

        let location = &po.order_ship_to_location;
        let address = &location.address;
        writeln!(f, "== Ship To Location ==")?;
        writeln!(
            f,
            "{} ({})",
            location.ship_to_location_name, location.ship_to_location_code
        )?;
        writeln!(f, "{}", address.address_line1)?;
        if let Some(line2) = &address.address_line2 {
            writeln!(f, "{line2}")?;
        }
        writeln!(f, "{}, {} {}", address.city, address.state, address.postal_code)?;
        writeln!(f, "{}", address.country)?;
        writeln!(f)?;

        writeln!(f, "== Line Items ==")?;
        writeln!(f, "{}", self.line_items_table())?;
        write!(f, "Total Order Amount: ${}", order_total(self.order).value())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::place_order::public_types::PurchaseOrderDraft;

    fn sample_order() -> SubmittedOrder {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let draft = PurchaseOrderDraft::sample(now.date_naive(), now);
        SubmittedOrder::from_draft(&draft).unwrap().order
    }

    fn completed(status: u16, status_text: &str, body: &str) -> RelayOutcome {
        RelayOutcome::Completed {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    #[test]
    fn classifies_banners() {
        assert_eq!(Banner::classify(&completed(202, "Accepted", "")), Banner::Accepted);
        assert_eq!(Banner::classify(&completed(201, "Created", "")), Banner::Submitted);
        assert_eq!(Banner::classify(&completed(299, "", "")), Banner::Submitted);
        assert_eq!(Banner::classify(&completed(300, "Multiple Choices", "")), Banner::Failed);
        assert_eq!(Banner::classify(&completed(500, "Internal Server Error", "")), Banner::Failed);
        assert_eq!(
            Banner::classify(&completed(0, "Order Likely Submitted", "")),
            Banner::Warning
        );
        assert_eq!(
            Banner::classify(&RelayOutcome::ConnectionFailed {
                message: "refused".into()
            }),
            Banner::Failed
        );
    }

    #[test]
    fn accepted_banner_names_company() {
        assert_eq!(
            Banner::Accepted.message("Mythical Appliances"),
            "Your order has been created with Mythical Appliances, see order number below"
        );
    }

    #[test]
    fn renders_reference_outcome_and_totals() {
        let order = sample_order();
        let outcome = completed(202, "Accepted", r#"{"orderId":"X"}"#);
        let rendered =
            Summary::new(&order, ReferenceNumber::new(3444), &outcome, DEFAULT_COMPANY_NAME)
                .to_string();

        assert!(rendered.starts_with("✓ Purchase Order Accepted"));
        assert!(rendered.contains("Order Reference Number: 00003444"));
        assert!(rendered.contains("Status: 202 Accepted"));
        assert!(rendered.contains(r#"{"orderId":"X"}"#));
        assert!(rendered.contains("PO Date:         20240305"));
        assert!(rendered.contains("$81333.00"));
        // 81333.00 + 67783.90 + 17983.00 + 54924.80
        assert!(rendered.ends_with("Total Order Amount: $222024.70"));
    }

    #[test]
    fn connection_failure_still_shows_reference() {
        let order = sample_order();
        let outcome = RelayOutcome::ConnectionFailed {
            message: "relay is down".into(),
        };
        let rendered =
            Summary::new(&order, ReferenceNumber::new(3450), &outcome, DEFAULT_COMPANY_NAME)
                .to_string();

        assert!(rendered.starts_with("✗ Purchase Order Submission Failed"));
        assert!(rendered.contains("Order Reference Number: 00003450"));
        assert!(rendered.contains("Status: Error Connection Error"));
        assert!(rendered.contains("relay is down"));
    }

    #[test]
    fn empty_body_gets_placeholder_and_blank_line2_is_hidden() {
        let order = sample_order();
        let outcome = completed(200, "OK", "");
        let rendered =
            Summary::new(&order, ReferenceNumber::new(3444), &outcome, DEFAULT_COMPANY_NAME)
                .to_string();

        assert!(rendered.contains("Order submitted successfully (no response body)"));
        assert!(rendered.contains("764 OLIVE BLVD\nOAKLAND, CA 94765\n"));
    }
}
