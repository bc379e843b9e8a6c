//! Quote file acquisition.

pub mod tesouro;

pub use tesouro::{DEFAULT_LOCAL_PATH, DEFAULT_URL, TesouroClient};
