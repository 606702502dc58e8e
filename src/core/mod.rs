pub mod build;
pub mod client;
pub mod query;
pub mod snapshot;
pub mod staging;

pub use crate::domain::ports::{ConfigProvider, GraphqlTransport, Storage, TransportResponse};
pub use crate::utils::error::Result;
