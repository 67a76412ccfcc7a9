//! Schema-driven declaration generator.
//!
//! Reads a registry of node kinds, resolves every field validator to a
//! semantic type, groups kinds by alias, and renders three artifacts: a node
//! catalogue, a typed interface stub, and a delegating runtime wrapper.
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod index;
pub mod ir;
pub mod path_de;
pub mod pipeline;
pub mod resolve;
pub mod schema;

pub use config::GeneratorConfig;
pub use error::GenError;
pub use index::{build_model, ResolvedModel};
pub use schema::SchemaRegistry;
