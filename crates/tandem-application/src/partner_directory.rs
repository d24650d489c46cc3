//! Read-only directory of language partners.

use tandem_core::error::{Result, TandemError};
use tandem_core::partner::Partner;

/// Partners available for scheduling, in seed order.
#[derive(Debug, Clone, Default)]
pub struct PartnerDirectory {
    partners: Vec<Partner>,
}

impl PartnerDirectory {
    pub fn new(partners: Vec<Partner>) -> Self {
        Self { partners }
    }

    pub fn all(&self) -> &[Partner] {
        &self.partners
    }

    /// Looks up a partner by id. Unknown ids are an error rather than a
    /// fallback to some default partner.
    pub fn find(&self, id: &str) -> Result<&Partner> {
        self.partners
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| TandemError::not_found("Partner", id))
    }

    /// Partners whose name or languages contain `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Partner> {
        self.partners.iter().filter(|p| p.matches(query)).collect()
    }
}
