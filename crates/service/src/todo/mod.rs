//! Todo module: three-layer architecture (domain, repository, service).
//!
//! Every rule about which writes are acceptable lives in [`service::TodoService`];
//! storage is reached only through [`repository::TodoRepository`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::TodoService;
