//! Command handlers, one module per subcommand.

pub mod check;
pub mod docs;
pub mod explain;
pub mod generate;
pub mod validate;
