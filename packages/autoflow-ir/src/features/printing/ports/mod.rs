//! Printing ports (interfaces)

mod printer;

pub use printer::Printer;
