use crate::place_order::public_types::DraftLineItem;

/// Line items that passed the completeness check, in draft order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ValidatedLineItems<'a> {
    pub(crate) items: Vec<&'a DraftLineItem>,
    pub(crate) dropped: usize,
}
