//! Purchase-order intake: a collector that turns a draft into the intake API's
//! wire document, and a relay that forwards it with credentials attached.

pub mod common {
    pub mod compound_types;
    pub mod simple_types;
}

pub mod counter;
pub mod logging;
pub mod presenter;
pub mod relay;
pub mod relay_client;

pub mod place_order {
    pub mod api;
    mod draft;
    pub mod dto;
    pub mod implementation;
    mod internal_types;
    pub mod public_types;

    #[cfg(test)]
    mod tests;

    pub use dto::{DraftTransform, SubmittedOrder};
    pub use public_types::*;
}
