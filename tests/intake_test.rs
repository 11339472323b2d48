mod common;

use common::*;
use mechanic_shop::core::intake::{insert_service_request, IntakeOutcome};
use mechanic_shop::domain::ports::ShopStore;
use mechanic_shop::Database;

fn created(outcome: IntakeOutcome) -> mechanic_shop::domain::model::ServiceRequest {
    match outcome {
        IntakeOutcome::Created(request) => request,
        IntakeOutcome::Aborted => panic!("intake was aborted"),
    }
}

#[test]
fn test_single_match_confirmed_uses_customer_and_chosen_car() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");
    seed_owned_car(&db, 1, 1, "VIN1");
    seed_owned_car(&db, 2, 1, "VIN2");

    let mut console = scripted(&["y", "Diaz", "y", "2", "3/15/2024", "1200", "brakes squeal"]);
    let request = created(insert_service_request(&db.repo(), &mut console).unwrap());

    assert_eq!(request.customer_id, 1);
    assert_eq!(request.car_vin, "VIN2");
    assert_eq!(request.date, date(2024, 3, 15));
    assert_eq!(request.odometer, 1200);
    assert_eq!(request.complaint.as_deref(), Some("brakes squeal"));
    assert_eq!(count(&db, "Service_Request"), 1);
    assert!(db.repo().service_request_exists(request.id).unwrap());

    let (output, _) = output_of(console);
    assert!(output.contains("1 Ana Diaz (951)555-0123 12 Main St"));
    assert!(output.contains("(2) cars owned by this customer"));
    assert!(output.contains("2. VIN2"));
}

#[test]
fn test_not_found_restarts_customer_resolution() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");
    seed_owned_car(&db, 1, 1, "VIN1");

    let mut console = scripted(&["y", "Smith", "y", "y", "Diaz", "y", "1", "3/15/2024", "10", ""]);
    let request = created(insert_service_request(&db.repo(), &mut console).unwrap());

    assert_eq!(request.customer_id, 1);
    assert_eq!(request.car_vin, "VIN1");
    assert_eq!(request.complaint, None);

    let (output, _) = output_of(console);
    let not_found = output.find("Customer does not exist!").unwrap();
    let second_lookup = output.rfind("Enter the customer's last name").unwrap();
    let car_selection = output.find("cars owned by this customer").unwrap();
    assert!(not_found < second_lookup);
    assert!(second_lookup < car_selection);
}

#[test]
fn test_not_found_then_decline_aborts_without_writing() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");

    let mut console = scripted(&["y", "Smith", "n"]);
    let outcome = insert_service_request(&db.repo(), &mut console).unwrap();

    assert_eq!(outcome, IntakeOutcome::Aborted);
    assert_eq!(count(&db, "Service_Request"), 0);
    let (output, _) = output_of(console);
    assert!(!output.contains("cars owned"));
}

#[test]
fn test_declined_single_match_restarts() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");

    let mut console = scripted(&["y", "Diaz", "n", "n"]);
    let outcome = insert_service_request(&db.repo(), &mut console).unwrap();

    assert_eq!(outcome, IntakeOutcome::Aborted);
    let (output, _) = output_of(console);
    assert!(output.contains("Initiate request for this customer?"));
    assert!(output.contains("Start over?"));
}

#[test]
fn test_multiple_matches_are_enumerated_and_selected() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");
    seed_customer(&db, 2, "Luis", "Diaz");
    seed_owned_car(&db, 1, 2, "VIN3");

    let mut console = scripted(&["y", "Diaz", "0", "3", "2", "1", "3/15/2024", "5", "noise"]);
    let request = created(insert_service_request(&db.repo(), &mut console).unwrap());

    assert_eq!(request.customer_id, 2);
    assert_eq!(request.car_vin, "VIN3");

    let (output, _) = output_of(console);
    assert!(output.contains("(2) Customers found!:"));
    assert!(output.contains("1. 1 Ana Diaz"));
    assert!(output.contains("2. 2 Luis Diaz"));
    assert_eq!(output.matches("Please choose a number between 1 and 2").count(), 2);
}

#[test]
fn test_customer_without_cars_registers_one() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");

    let mut console = scripted(&["y", "Diaz", "y", "VINNEW", "VW", "Golf", "2001", "3/15/2024", "7", ""]);
    let request = created(insert_service_request(&db.repo(), &mut console).unwrap());

    assert_eq!(request.car_vin, "VINNEW");
    assert_eq!(db.repo().cars_owned_by(1).unwrap(), vec!["VINNEW"]);
}

#[test]
fn test_new_customer_path_creates_customer_car_and_request() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 5, "Ana", "Diaz");

    let mut console = scripted(&[
        "n", "Bo", "Kim", "951-555-0000", "1 Elm St", "VINX", "Ford", "F150", "2010", "3/15/2024", "100", "",
    ]);
    let request = created(insert_service_request(&db.repo(), &mut console).unwrap());

    assert_eq!(request.customer_id, 6);
    assert_eq!(request.car_vin, "VINX");
    let kim = db.repo().customers_by_last_name("Kim").unwrap();
    assert_eq!(kim.len(), 1);
    assert_eq!(kim[0].phone, "(951)555-0000");
    assert_eq!(db.repo().cars_owned_by(6).unwrap(), vec!["VINX"]);
}

#[test]
fn test_date_and_odometer_are_validated() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");
    seed_owned_car(&db, 1, 1, "VIN1");

    let mut console = scripted(&[
        "y", "Diaz", "y", "1", "13/40/2024", "03//2024", "3/15/2024", "-3", "many", "42", "",
    ]);
    let request = created(insert_service_request(&db.repo(), &mut console).unwrap());

    assert_eq!(request.odometer, 42);
    let (output, _) = output_of(console);
    assert!(output.contains("No such day in the calendar"));
    assert!(output.contains("Date must be written M/D/YYYY"));
    assert!(output.contains("Value cannot be negative"));
}

#[test]
fn test_request_ids_come_from_the_sequence() {
    let db = Database::open_in_memory().unwrap();
    seed_customer(&db, 1, "Ana", "Diaz");
    seed_owned_car(&db, 1, 1, "VIN1");
    seed_request(&db, 40, 1, "VIN1", 100);

    let mut console = scripted(&["y", "Diaz", "y", "1", "3/15/2024", "150", ""]);
    let request = created(insert_service_request(&db.repo(), &mut console).unwrap());

    assert_eq!(request.id, 41);
}
