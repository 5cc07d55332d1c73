//! Resource service registry
//!
//! Each logical resource (contacts, orders, ...) gets one descriptor per
//! client, created on first use and kept for the client's lifetime. A
//! [`Service`] handle pairs that descriptor with the client so calls are
//! dispatched as `"<ServiceName>.<method>"`.

use std::collections::HashMap;
use std::sync::Arc;

use infusionsoft_domain::{Result, ServiceKind};
use xmlrpc::Value;

use crate::client::Infusionsoft;

/// One resource service, created once per client
///
/// Holds the remote method prefix (`ContactService.`) so qualified method
/// names are built without re-deriving it on every call.
#[derive(Debug, PartialEq, Eq)]
pub struct ServiceDescriptor {
    kind: ServiceKind,
    method_prefix: String,
}

impl ServiceDescriptor {
    fn new(kind: ServiceKind) -> Self {
        Self { kind, method_prefix: format!("{}.", kind.service_name()) }
    }

    #[must_use]
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Remote service prefix (`ContactService`)
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.service_name()
    }

    /// Fully-qualified remote method name (`ContactService.findByEmail`)
    #[must_use]
    pub fn method_name(&self, method: &str) -> String {
        let mut qualified = String::with_capacity(self.method_prefix.len() + method.len());
        qualified.push_str(&self.method_prefix);
        qualified.push_str(method);
        qualified
    }

    /// Prefix shared by every method of this service (`ContactService.`)
    #[must_use]
    pub fn method_prefix(&self) -> &str {
        &self.method_prefix
    }
}

/// Lazily populated cache of service descriptors; never evicts
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: HashMap<ServiceKind, Arc<ServiceDescriptor>>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for `kind`, created on first request.
    pub fn get(&mut self, kind: ServiceKind) -> Arc<ServiceDescriptor> {
        Arc::clone(
            self.services.entry(kind).or_insert_with(|| Arc::new(ServiceDescriptor::new(kind))),
        )
    }

    #[must_use]
    pub fn contains(&self, kind: ServiceKind) -> bool {
        self.services.contains_key(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// A resource service bound to its client
#[derive(Debug)]
pub struct Service<'a> {
    descriptor: Arc<ServiceDescriptor>,
    client: &'a mut Infusionsoft,
}

impl<'a> Service<'a> {
    pub(crate) fn new(descriptor: Arc<ServiceDescriptor>, client: &'a mut Infusionsoft) -> Self {
        Self { descriptor, client }
    }

    #[must_use]
    pub fn descriptor(&self) -> &Arc<ServiceDescriptor> {
        &self.descriptor
    }

    /// Omit the legacy `key` argument from the next call only.
    pub fn skip_legacy_key(&mut self) -> &mut Self {
        self.client.skip_legacy_key_for_next_call();
        self
    }

    /// Call `<ServiceName>.<method>` with `args`.
    ///
    /// # Errors
    /// Same as [`Infusionsoft::request`].
    pub async fn call(&mut self, method: &str, args: Vec<Value>) -> Result<Value> {
        let method = self.descriptor.method_name(method);
        self.client.request(&method, args).await
    }
}
