pub mod characteristic;
pub mod characteristic_type;
pub mod properties;
pub mod request;
pub mod service;
pub mod value;
