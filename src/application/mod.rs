mod chain_linker;
mod config;

pub use chain_linker::{link, ChainLinker};
pub use config::{parse_instant, Config, AT_ENV, LOG_ENV};
