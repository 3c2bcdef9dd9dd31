pub mod delegate;
pub mod error;
pub mod hap;
pub mod store;
pub mod uuid;

pub use self::delegate::{CharacteristicDelegate, DelegateParams};
pub use self::hap::{service::Service, value::Value};
