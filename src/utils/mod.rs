pub mod case;
pub mod error;
pub mod logger;
pub mod validation;
