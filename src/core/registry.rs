use crate::core::prompt::{ask, ask_existing_id, ask_yes_no};
use crate::domain::model::{Car, Customer, Mechanic, Ownership, Sequence};
use crate::domain::ports::{Console, ShopStore};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{
    validate_bounded, validate_experience, validate_manufacture_year, validate_name,
    validate_phone, validate_required, MAX_ADDRESS_LEN, MAX_MAKE_LEN, MAX_MODEL_LEN, MAX_VIN_LEN,
};

pub fn add_customer<S, C>(store: &S, console: &mut C) -> Result<Customer>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    console.say("\n----Add Customer----")?;
    let fname = ask(console, "Enter first name: ", |s| validate_name("first name", s))?;
    let lname = ask(console, "Enter last name: ", |s| validate_name("last name", s))?;
    let phone = ask(console, "Enter phone number (###-###-####): ", |s| {
        validate_phone("phone", s)
    })?;
    let address = ask(console, "Enter address: ", |s| {
        validate_bounded("address", s, MAX_ADDRESS_LEN)
    })?;

    let customer = Customer {
        id: store.next_id(Sequence::Customer)?,
        fname,
        lname,
        phone,
        address,
    };
    store.insert_customer(&customer)?;

    tracing::info!("👤 Customer {} added", customer.id);
    console.say(&format!("Customer added with id {}", customer.id))?;
    Ok(customer)
}

pub fn add_mechanic<S, C>(store: &S, console: &mut C) -> Result<Mechanic>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    console.say("\n----Add Mechanic----")?;
    let fname = ask(console, "Enter first name: ", |s| validate_name("first name", s))?;
    let lname = ask(console, "Enter last name: ", |s| validate_name("last name", s))?;
    let experience = ask(console, "Enter years of experience: ", |s| {
        validate_experience("experience", s)
    })?;

    let mechanic = Mechanic {
        id: store.next_id(Sequence::Mechanic)?,
        fname,
        lname,
        experience,
    };
    store.insert_mechanic(&mechanic)?;

    tracing::info!("🔧 Mechanic {} added", mechanic.id);
    console.say(&format!("Mechanic added with id {}", mechanic.id))?;
    Ok(mechanic)
}

/// Registers a car and, when `owner` is given, the ownership row linking it
/// to that customer.
pub fn add_car<S, C>(store: &S, console: &mut C, owner: Option<i64>) -> Result<Car>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    console.say("\n----Add Car----")?;
    let vin = ask(console, "Enter VIN: ", |s| {
        let vin = validate_required("VIN", s, MAX_VIN_LEN)?;
        if store.car_exists(&vin)? {
            return Err(ShopError::invalid_input("VIN", s, "A car with this VIN is already registered"));
        }
        Ok(vin)
    })?;
    let make = ask(console, "Enter make: ", |s| validate_required("make", s, MAX_MAKE_LEN))?;
    let model = ask(console, "Enter model: ", |s| validate_required("model", s, MAX_MODEL_LEN))?;
    let year = ask(console, "Enter year: ", |s| validate_manufacture_year("year", s))?;

    let car = Car {
        vin,
        make,
        model,
        year,
    };
    store.insert_car(&car)?;

    if let Some(customer_id) = owner {
        store.insert_ownership(&Ownership {
            id: store.next_id(Sequence::Ownership)?,
            customer_id,
            car_vin: car.vin.clone(),
        })?;
        tracing::info!("🚗 Car {} added for customer {}", car.vin, customer_id);
    } else {
        tracing::info!("🚗 Car {} added", car.vin);
    }
    console.say(&format!("Car {} added", car.vin))?;
    Ok(car)
}

/// Menu entry: asks whether the new car belongs to a known customer first.
pub fn add_car_interactive<S, C>(store: &S, console: &mut C) -> Result<Car>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    let owner = if ask_yes_no(console, "Register an owner for this car?\n(y/n): ")? {
        Some(ask_existing_id(
            console,
            "Enter the owner's customer id: ",
            "customer id",
            "No matching customer id found",
            |id| store.customer_exists(id),
        )?)
    } else {
        None
    };
    add_car(store, console, owner)
}
