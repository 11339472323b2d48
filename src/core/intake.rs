//! Service-request intake.
//!
//! Resolves the customer and the car for a new request, asking the operator
//! only what cannot be looked up, then stores the request. Dead ends ("not
//! found", a declined match) go back to the first question, or back to the
//! main menu if the operator does not want to start over.

use crate::core::prompt::{ask, ask_choice, ask_text, ask_yes_no};
use crate::core::registry::{add_car, add_customer};
use crate::domain::model::{Sequence, ServiceRequest};
use crate::domain::ports::{Console, ShopStore};
use crate::utils::error::Result;
use crate::utils::validation::{validate_date, validate_non_negative};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    Created(ServiceRequest),
    Aborted,
}

enum CustomerLookup {
    Found(i64),
    Restart,
}

pub fn insert_service_request<S, C>(store: &S, console: &mut C) -> Result<IntakeOutcome>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    console.say("\n----Insert Service Request----")?;

    let (customer_id, car_vin) = loop {
        if ask_yes_no(console, "Create service request for an existing customer?\n(y/n): ")? {
            match find_customer(store, console)? {
                CustomerLookup::Found(customer_id) => {
                    let vin = choose_car(store, console, customer_id)?;
                    break (customer_id, vin);
                }
                CustomerLookup::Restart => {
                    if !ask_yes_no(console, "Start over?\n(y/n): ")? {
                        tracing::info!("↩️ Service request intake abandoned");
                        console.say("Returning to the main menu")?;
                        return Ok(IntakeOutcome::Aborted);
                    }
                }
            }
        } else {
            let customer = add_customer(store, console)?;
            let car = add_car(store, console, Some(customer.id))?;
            break (customer.id, car.vin);
        }
    };

    let date = ask(console, "Enter service request date (M/D/YYYY): ", |s| {
        validate_date("request date", s)
    })?;
    let odometer = ask(console, "Enter odometer reading: ", |s| {
        validate_non_negative("odometer", s)
    })?;
    let complaint = ask_text(console, "Enter complaint (optional): ")?;
    let complaint = Some(complaint.trim().to_string()).filter(|c| !c.is_empty());

    let request = ServiceRequest {
        id: store.next_id(Sequence::ServiceRequest)?,
        customer_id,
        car_vin,
        date,
        odometer,
        complaint,
    };
    store.insert_service_request(&request)?;

    tracing::info!(
        "📝 Service request {} opened for customer {} / car {}",
        request.id,
        request.customer_id,
        request.car_vin
    );
    console.say(&format!("Service request {} created", request.id))?;
    Ok(IntakeOutcome::Created(request))
}

fn find_customer<S, C>(store: &S, console: &mut C) -> Result<CustomerLookup>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    let lname = ask_text(console, "Enter the customer's last name: ")?;
    let customers = store.customers_by_last_name(&lname)?;

    match customers.len() {
        0 => {
            console.say("Customer does not exist!")?;
            Ok(CustomerLookup::Restart)
        }
        1 => {
            console.say(&customers[0].display_line())?;
            if ask_yes_no(console, "\nInitiate request for this customer?\n(y/n): ")? {
                Ok(CustomerLookup::Found(customers[0].id))
            } else {
                Ok(CustomerLookup::Restart)
            }
        }
        n => {
            console.say(&format!("({}) Customers found!:", n))?;
            for (i, customer) in customers.iter().enumerate() {
                console.say(&format!("{}. {}", i + 1, customer.display_line()))?;
            }
            let choice = ask_choice(console, &format!("\nSelect customer (1-{}): ", n), n)?;
            Ok(CustomerLookup::Found(customers[choice - 1].id))
        }
    }
}

fn choose_car<S, C>(store: &S, console: &mut C, customer_id: i64) -> Result<String>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    let vins = store.cars_owned_by(customer_id)?;
    if vins.is_empty() {
        console.say("This customer owns no cars yet, registering one")?;
        let car = add_car(store, console, Some(customer_id))?;
        return Ok(car.vin);
    }

    console.say(&format!("({}) cars owned by this customer", vins.len()))?;
    for (i, vin) in vins.iter().enumerate() {
        console.say(&format!("{}. {}", i + 1, vin))?;
    }
    let choice = ask_choice(console, &format!("\nSelect car (1-{}): ", vins.len()), vins.len())?;
    Ok(vins[choice - 1].clone())
}
