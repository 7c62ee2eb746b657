pub mod auth;
pub mod intake;
pub mod phone;
pub mod resolver;
pub mod response;
pub mod validation;

pub use crate::domain::model::{PhoneNumber, PostalCode, RegionMapping, RequestType, ServiceRequest};
pub use crate::domain::ports::{RegionStore, RequestStore};
pub use crate::utils::error::Result;
