//! skyport Types - Core types for the control-plane API
//!
//! These are the shapes the `skyport` CLI exchanges with the remote control
//! plane. Only the fields the CLI actually reads are modelled; everything else
//! in a response is ignored on deserialization.
//!
//! ## Key Concepts
//!
//! - **StatusCode**: lifecycle state of a deployable resource, with an explicit
//!   `Unknown` case for codes this client does not recognise
//! - **ResourceStatus**: a status code plus the remote's message
//! - **EnvironmentStatusSet**: one snapshot of every status in an environment
//! - **ResourceRef**: what a watch or a mutation targets
//! - **Variables**: environment variables, secrets and their aliases

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod environment;
pub mod ids;
pub mod log;
pub mod resource;
pub mod status;
pub mod variable;

// Re-export main types
pub use environment::EnvironmentStatusSet;
pub use ids::{EnvironmentId, OrganizationId, ProjectId, ResourceId};
pub use log::{LogLine, Logs};
pub use resource::{
    Action, Application, Broker, Container, Database, Environment, Job, Named, Organization,
    Page, Project, ResourceKind, ResourceRef,
};
pub use status::{ResourceStatus, StatusCode};
pub use variable::{
    AliasRequest, EnvironmentVariable, ParseScopeError, VariableRequest, VariableScope,
};
