pub mod compare;
pub mod logging;
