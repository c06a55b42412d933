pub mod kind;

pub use expa_error::{Error, ErrorKind};
