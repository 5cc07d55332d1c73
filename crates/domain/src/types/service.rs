//! Remote resource identifiers
//!
//! The closed set of resource services the XML-RPC API groups its methods
//! under. Each maps to the remote prefix used in method names
//! (`ContactService.findByEmail`) and to the accessor name callers use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InfusionsoftError;

/// A logical resource exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceKind {
    AffiliatePrograms,
    Affiliates,
    Contacts,
    Data,
    Discounts,
    Emails,
    Files,
    Funnels,
    Invoices,
    Orders,
    Products,
    Search,
    Shipping,
    WebForms,
}

impl ServiceKind {
    pub const ALL: [Self; 14] = [
        Self::AffiliatePrograms,
        Self::Affiliates,
        Self::Contacts,
        Self::Data,
        Self::Discounts,
        Self::Emails,
        Self::Files,
        Self::Funnels,
        Self::Invoices,
        Self::Orders,
        Self::Products,
        Self::Search,
        Self::Shipping,
        Self::WebForms,
    ];

    /// Remote service prefix used in XML-RPC method names
    #[must_use]
    pub const fn service_name(self) -> &'static str {
        match self {
            Self::AffiliatePrograms => "AffiliateProgramService",
            Self::Affiliates => "AffiliateService",
            Self::Contacts => "ContactService",
            Self::Data => "DataService",
            Self::Discounts => "DiscountService",
            Self::Emails => "APIEmailService",
            Self::Files => "FileService",
            Self::Funnels => "FunnelService",
            Self::Invoices => "InvoiceService",
            Self::Orders => "OrderService",
            Self::Products => "ProductService",
            Self::Search => "SearchService",
            Self::Shipping => "ShippingService",
            Self::WebForms => "WebFormService",
        }
    }

    /// Accessor name (`contacts`, `webForms`, ...)
    #[must_use]
    pub const fn accessor(self) -> &'static str {
        match self {
            Self::AffiliatePrograms => "affiliatePrograms",
            Self::Affiliates => "affiliates",
            Self::Contacts => "contacts",
            Self::Data => "data",
            Self::Discounts => "discounts",
            Self::Emails => "emails",
            Self::Files => "files",
            Self::Funnels => "funnels",
            Self::Invoices => "invoices",
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Search => "search",
            Self::Shipping => "shipping",
            Self::WebForms => "webForms",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

impl FromStr for ServiceKind {
    type Err = InfusionsoftError;

    /// Accepts either the accessor name or the remote service name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.accessor() == name || kind.service_name() == name)
            .ok_or_else(|| InfusionsoftError::InvalidResource(name.to_string()))
    }
}
