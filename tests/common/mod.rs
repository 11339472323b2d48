#![allow(dead_code)]

use chrono::NaiveDate;
use mechanic_shop::domain::model::{Car, ClosedRequest, Customer, Mechanic, Ownership, ServiceRequest};
use mechanic_shop::domain::ports::ShopStore;
use mechanic_shop::{Database, TerminalConsole};
use std::io::Cursor;

pub type ScriptedConsole = TerminalConsole<Cursor<String>, Vec<u8>, Vec<u8>>;

/// Console whose input is `lines` joined with newlines.
pub fn scripted(lines: &[&str]) -> ScriptedConsole {
    let mut input = lines.join("\n");
    input.push('\n');
    TerminalConsole::new(Cursor::new(input), Vec::new(), Vec::new())
}

pub fn output_of(console: ScriptedConsole) -> (String, String) {
    let (_, output, errors) = console.into_parts();
    (
        String::from_utf8(output).unwrap(),
        String::from_utf8(errors).unwrap(),
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn count(db: &Database, table: &str) -> i64 {
    let result = db
        .repo()
        .query_table(&format!("SELECT COUNT(*) FROM {}", table), &[])
        .unwrap();
    result.rows[0][0].parse().unwrap()
}

pub fn seed_customer(db: &Database, id: i64, fname: &str, lname: &str) -> Customer {
    let customer = Customer {
        id,
        fname: fname.to_string(),
        lname: lname.to_string(),
        phone: "(951)555-0123".to_string(),
        address: "12 Main St".to_string(),
    };
    db.repo().insert_customer(&customer).unwrap();
    customer
}

pub fn seed_car(db: &Database, vin: &str, make: &str, model: &str, year: i64) {
    db.repo()
        .insert_car(&Car {
            vin: vin.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
        })
        .unwrap();
}

pub fn seed_owned_car(db: &Database, ownership_id: i64, customer_id: i64, vin: &str) {
    seed_car(db, vin, "Toyota", "Corolla", 1999);
    db.repo()
        .insert_ownership(&Ownership {
            id: ownership_id,
            customer_id,
            car_vin: vin.to_string(),
        })
        .unwrap();
}

pub fn seed_mechanic(db: &Database, id: i64) {
    db.repo()
        .insert_mechanic(&Mechanic {
            id,
            fname: "Joe".to_string(),
            lname: "Fix".to_string(),
            experience: 10,
        })
        .unwrap();
}

pub fn seed_request(db: &Database, id: i64, customer_id: i64, vin: &str, odometer: i64) {
    db.repo()
        .insert_service_request(&ServiceRequest {
            id,
            customer_id,
            car_vin: vin.to_string(),
            date: date(2024, 1, 1),
            odometer,
            complaint: None,
        })
        .unwrap();
}

pub fn seed_closed(db: &Database, id: i64, request_id: i64, mechanic_id: i64, on: NaiveDate, comment: &str, bill: i64) {
    db.repo()
        .insert_closed_request(&ClosedRequest {
            id,
            request_id,
            mechanic_id,
            date: on,
            comment: comment.to_string(),
            bill,
        })
        .unwrap();
}
