//! # Resource Provisioning
//!
//! Guarantees the target database and collection exist before any data
//! operation runs. Provisioning is invoked fresh on every request; handles
//! are cheap name references, so nothing is cached across requests.

pub mod provisioner;

pub use provisioner::{ProvisionError, ProvisionPolicy, ProvisionResult, Provisioner};
