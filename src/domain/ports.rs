use crate::domain::model::{
    Car, ClosedRequest, Customer, Mechanic, Ownership, QueryResult, Sequence, ServiceRequest,
};
use crate::utils::error::Result;

/// Everything the workflows need from the relational store.
///
/// Implementations rely on the store's own constraints for referential
/// integrity; a rejected insert comes back as `ShopError::Constraint`.
pub trait ShopStore {
    fn next_id(&self, sequence: Sequence) -> Result<i64>;

    fn insert_customer(&self, customer: &Customer) -> Result<()>;
    fn insert_mechanic(&self, mechanic: &Mechanic) -> Result<()>;
    fn insert_car(&self, car: &Car) -> Result<()>;
    fn insert_ownership(&self, ownership: &Ownership) -> Result<()>;
    fn insert_service_request(&self, request: &ServiceRequest) -> Result<()>;
    fn insert_closed_request(&self, closed: &ClosedRequest) -> Result<()>;

    fn customers_by_last_name(&self, lname: &str) -> Result<Vec<Customer>>;
    fn customer_exists(&self, id: i64) -> Result<bool>;
    fn mechanic_exists(&self, id: i64) -> Result<bool>;
    fn car_exists(&self, vin: &str) -> Result<bool>;
    fn cars_owned_by(&self, customer_id: i64) -> Result<Vec<String>>;
    fn service_request_exists(&self, id: i64) -> Result<bool>;
    fn is_request_closed(&self, id: i64) -> Result<bool>;

    /// Runs a read-only query with positional integer parameters.
    fn query_table(&self, sql: &str, params: &[i64]) -> Result<QueryResult>;
}

/// Line-oriented operator terminal.
pub trait Console {
    /// Writes `message` without a newline and returns the next input line
    /// stripped of its line terminator. End of input is `ShopError::InputClosed`.
    fn prompt(&mut self, message: &str) -> Result<String>;

    fn say(&mut self, message: &str) -> Result<()>;

    fn error(&mut self, message: &str) -> Result<()>;
}
