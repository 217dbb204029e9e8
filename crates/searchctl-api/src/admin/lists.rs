// Domain and keyword list endpoints
//
// Mutations are form-encoded POSTs whose `data` is ignored; the two list
// reads return plain string arrays. The backend splits multi-value inputs
// on `|` itself, so values are forwarded untouched.

use serde::de::IgnoredAny;
use tracing::debug;

use crate::admin::AdminClient;
use crate::admin::models::ListOp;
use crate::error::Error;

impl AdminClient {
    /// Submit one or more domains (`|`-separated) for crawling.
    pub async fn include_domains(&self, domains: &str) -> Result<(), Error> {
        let url = self.admin_url("include_domain")?;
        self.post_form::<IgnoredAny>(url, &[("domain", domains)])
            .await?;
        debug!(domains, "domains submitted");
        Ok(())
    }

    /// Add a domain to, or remove it from, the crawl blacklist.
    pub async fn manage_domain_blacklist(&self, domain: &str, op: ListOp) -> Result<(), Error> {
        let url = self.admin_url("manage_domain_blacklist")?;
        self.post_form::<IgnoredAny>(url, &[("domain", domain), ("opType", op.as_ref())])
            .await?;
        debug!(domain, op = %op, "domain blacklist updated");
        Ok(())
    }

    /// Add or remove an illegal keyword.
    pub async fn manage_illegal_keyword(&self, keyword: &str, op: ListOp) -> Result<(), Error> {
        let url = self.admin_url("manage_illegal_keyword")?;
        self.post_form::<IgnoredAny>(url, &[("keyword", keyword), ("opType", op.as_ref())])
            .await?;
        debug!(keyword, op = %op, "illegal keyword list updated");
        Ok(())
    }

    /// Fetch the domain blacklist. A missing `data` is an empty list.
    pub async fn domain_blacklist(&self) -> Result<Vec<String>, Error> {
        let url = self.admin_url("get_domain_blacklist")?;
        Ok(self.get(url).await?.unwrap_or_default())
    }

    /// Fetch the illegal keyword list. A missing `data` is an empty list.
    pub async fn illegal_keywords(&self) -> Result<Vec<String>, Error> {
        let url = self.admin_url("get_illegal_keyword")?;
        Ok(self.get(url).await?.unwrap_or_default())
    }
}
