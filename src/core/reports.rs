use crate::core::prompt::ask;
use crate::domain::model::QueryResult;
use crate::domain::ports::{Console, ShopStore};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::validate_integer;

pub const BILL_THRESHOLD: i64 = 100;
pub const MANY_CARS_THRESHOLD: i64 = 20;
pub const OLD_CAR_YEAR: i64 = 1995;
pub const LOW_MILEAGE: i64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    ClosedRequestsBelowBill,
    CustomersWithManyCars,
    OldCarsWithLowMileage,
    MostServicedCars { k: i64 },
    CustomersByTotalBill,
}

impl Report {
    pub fn title(&self) -> String {
        match self {
            Report::ClosedRequestsBelowBill => format!(
                "Date, comment and bill for all closed requests with a bill lower than {}:",
                BILL_THRESHOLD
            ),
            Report::CustomersWithManyCars => format!(
                "First and last name of customers owning more than {} cars:",
                MANY_CARS_THRESHOLD
            ),
            Report::OldCarsWithLowMileage => format!(
                "Make, model and year of cars built before {} serviced with less than {} miles:",
                OLD_CAR_YEAR, LOW_MILEAGE
            ),
            Report::MostServicedCars { k } => format!(
                "Make, model and number of service requests of the {} most serviced cars:",
                k
            ),
            Report::CustomersByTotalBill => {
                "First name, last name and total bill of customers, highest total first:".to_string()
            }
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Report::ClosedRequestsBelowBill => {
                "SELECT date, comment, bill FROM Closed_Request WHERE bill < ?1 ORDER BY date, wid"
            }
            Report::CustomersWithManyCars => {
                "SELECT C.fname, C.lname \
                 FROM Customer C, \
                      (SELECT customer_id FROM Owns GROUP BY customer_id HAVING COUNT(customer_id) > ?1) AS temp \
                 WHERE C.id = temp.customer_id \
                 ORDER BY C.lname, C.fname"
            }
            Report::OldCarsWithLowMileage => {
                "SELECT DISTINCT C.make, C.model, C.year \
                 FROM Car C, Service_Request S \
                 WHERE C.year < ?1 AND S.car_vin = C.vin AND S.odometer < ?2 \
                 ORDER BY C.make, C.model, C.year"
            }
            Report::MostServicedCars { .. } => {
                "SELECT C.make, C.model, temp.numRequests \
                 FROM Car C, \
                      (SELECT car_vin, COUNT(rid) AS numRequests FROM Service_Request GROUP BY car_vin) AS temp \
                 WHERE C.vin = temp.car_vin \
                 ORDER BY temp.numRequests DESC, C.vin \
                 LIMIT ?1"
            }
            Report::CustomersByTotalBill => {
                "SELECT C.fname, C.lname, temp.totalBill \
                 FROM Customer C, \
                      (SELECT SR.customer_id, SUM(CR.bill) AS totalBill \
                       FROM Closed_Request CR, Service_Request SR \
                       WHERE CR.rid = SR.rid \
                       GROUP BY SR.customer_id) AS temp \
                 WHERE C.id = temp.customer_id \
                 ORDER BY temp.totalBill DESC, C.id"
            }
        }
    }

    pub fn params(&self) -> Vec<i64> {
        match self {
            Report::ClosedRequestsBelowBill => vec![BILL_THRESHOLD],
            Report::CustomersWithManyCars => vec![MANY_CARS_THRESHOLD],
            Report::OldCarsWithLowMileage => vec![OLD_CAR_YEAR, LOW_MILEAGE],
            Report::MostServicedCars { k } => vec![*k],
            Report::CustomersByTotalBill => vec![],
        }
    }
}

pub fn run_report<S, C>(store: &S, console: &mut C, report: Report) -> Result<QueryResult>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    let result = store.query_table(report.sql(), &report.params())?;
    tracing::debug!("📊 {:?} returned {} rows", report, result.len());

    console.say(&format!("\n{}", report.title()))?;
    console.say(&result.render())?;
    Ok(result)
}

/// Asks for a positive `k`, then runs [`Report::MostServicedCars`].
pub fn most_serviced_cars<S, C>(store: &S, console: &mut C) -> Result<QueryResult>
where
    S: ShopStore + ?Sized,
    C: Console + ?Sized,
{
    let k = ask(console, "Please enter a k: ", |s| {
        let k = validate_integer("k", s)?;
        if k < 1 {
            return Err(ShopError::invalid_input("k", s, "k must be at least 1"));
        }
        Ok(k)
    })?;
    run_report(store, console, Report::MostServicedCars { k })
}
