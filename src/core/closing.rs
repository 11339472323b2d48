use crate::core::prompt::{ask, ask_existing_id, ask_text};
use crate::domain::model::{ClosedRequest, Sequence};
use crate::domain::ports::{Console, ShopStore};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{validate_date, validate_integer, validate_non_negative};

/// Closes one open service request. Requests are never deleted; closing adds
/// a `Closed_Request` row, and a request can only be closed once.
pub fn close_service_request<S, C>(store: &S, console: &mut C) -> Result<ClosedRequest>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    console.say("\n----Close Service Request----")?;

    let mechanic_id = ask_existing_id(
        console,
        "Enter valid mechanic id to close a service request: ",
        "mechanic id",
        "No matching mechanic id found",
        |id| store.mechanic_exists(id),
    )?;

    let request_id = ask(console, "Enter valid service request number: ", |s| {
        let id = validate_integer("request number", s)?;
        if !store.service_request_exists(id)? {
            return Err(ShopError::invalid_input("request number", s, "No matching request number found"));
        }
        if store.is_request_closed(id)? {
            return Err(ShopError::invalid_input("request number", s, "This request is already closed"));
        }
        Ok(id)
    })?;

    let date = ask(console, "Enter closing date (M/D/YYYY): ", |s| {
        validate_date("closing date", s)
    })?;
    let bill = ask(console, "Enter final bill: ", |s| validate_non_negative("bill", s))?;
    let comment = ask_text(console, "Enter final comments: ")?;

    let closed = ClosedRequest {
        id: store.next_id(Sequence::ClosedRequest)?,
        request_id,
        mechanic_id,
        date,
        comment: comment.trim().to_string(),
        bill,
    };
    store.insert_closed_request(&closed)?;

    tracing::info!(
        "✅ Service request {} closed by mechanic {} (bill {})",
        closed.request_id,
        closed.mechanic_id,
        closed.bill
    );
    console.say(&format!("Service request {} closed", closed.request_id))?;
    Ok(closed)
}
