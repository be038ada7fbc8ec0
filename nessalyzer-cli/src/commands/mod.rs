//! Command handlers -- one module per subcommand

pub mod exploitable;
pub mod export;
pub mod parse;
