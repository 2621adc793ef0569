//! Pipeline subcommands, one module per stage.

pub mod build;
pub mod evaluate;
pub mod price;
pub mod serve;
pub mod train;
