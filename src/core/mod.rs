pub mod closing;
pub mod intake;
pub mod menu;
pub mod prompt;
pub mod registry;
pub mod reports;

pub use crate::domain::model::{
    Car, ClosedRequest, Customer, Mechanic, QueryResult, Sequence, ServiceRequest,
};
pub use crate::domain::ports::{Console, ShopStore};
pub use crate::utils::error::Result;
