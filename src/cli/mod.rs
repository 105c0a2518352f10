pub mod console;
pub mod operator;

pub use console::Console;
pub use operator::{parse_operator_line, OperatorGenerator};
