pub mod ast;
pub mod config;
pub mod error;
pub mod json;
pub mod parser;
pub mod path;
pub mod resolver;
pub mod utils;

pub use ast::Node;
pub use config::{Dictionary, Scalar};
pub use error::ConfError;
pub use parser::{KvOptions, KvParser};
pub use path::PathSegment;
pub use resolver::{Environment, ProcessEnvironment};
