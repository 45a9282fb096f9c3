use anyhow::Result;
use inquire::error::InquireResult;
use inquire::Confirm;
use tracing::warn;

use crate::counter::OrderReferenceCounter;
use crate::place_order::dto::SubmittedOrder;
use crate::place_order::implementation;
use crate::place_order::public_types::{DropWarning, PlacedOrder, PurchaseOrderDraft};
use crate::relay_client::RelayClient;

pub fn drop_warning_prompt(warning: DropWarning) -> String {
    format!(
        "Warning: {dropped} line item(s) have incomplete data and will not be included in the order.\n\n\
         Valid items to submit: {valid}\n\
         Incomplete items (will be skipped): {dropped}\n\n\
         Do you want to proceed?",
        valid = warning.valid,
        dropped = warning.dropped,
    )
}

async fn ask_to_proceed(warning: DropWarning) -> bool {
    let prompt = drop_warning_prompt(warning);
    let answer =
        tokio::task::spawn_blocking(move || Confirm::new(&prompt).with_default(false).prompt())
            .await;
    match answer {
        Ok(answer) => proceed_or_decline(answer),
        Err(err) => {
            warn!(error = %err, "confirmation prompt did not complete, treating as declined");
            false
        }
    }
}

/// A prompt that could not be answered (no terminal, interrupted) declines.
fn proceed_or_decline(answer: InquireResult<bool>) -> bool {
    answer.unwrap_or_else(|err| {
        warn!(error = %err, "confirmation prompt failed, treating as declined");
        false
    })
}

/// Places `draft` through the relay, asking on the terminal before dropping
/// incomplete line items unless `assume_yes` is set.
pub async fn place_order(
    relay: &RelayClient,
    counter: &impl OrderReferenceCounter,
    draft: &PurchaseOrderDraft,
    assume_yes: bool,
) -> Result<PlacedOrder> {
    let confirm_dropped_items = move |warning: DropWarning| async move {
        assume_yes || ask_to_proceed(warning).await
    };
    let send_to_relay = move |order: SubmittedOrder| relay.submit(order);

    let placed =
        implementation::place_order(confirm_dropped_items, send_to_relay, counter, draft).await?;
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use inquire::InquireError;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    #[test]
    fn answered_prompt_is_taken_as_is() {
        let (proceed, logs) = with_captured_logs(|| proceed_or_decline(Ok(true)));
        assert!(proceed);
        assert!(logs.is_empty(), "{logs}");
        assert!(!proceed_or_decline(Ok(false)));
    }

    #[test]
    fn failed_prompt_declines_with_a_warning() {
        let (proceed, logs) = with_captured_logs(|| proceed_or_decline(Err(InquireError::NotTTY)));
        assert!(!proceed);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("confirmation prompt failed"), "{logs}");
    }

    #[test]
    fn prompt_states_both_counts() {
        let prompt = drop_warning_prompt(DropWarning {
            valid: 2,
            dropped: 1,
        });
        assert!(prompt.contains("Valid items to submit: 2"));
        assert!(prompt.contains("Incomplete items (will be skipped): 1"));
    }
}
