pub mod customer;

pub use customer::{Credential, Customer};
