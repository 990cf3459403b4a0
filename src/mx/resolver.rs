use trust_dns_resolver::Resolver;

use super::{Error, MxRecord, MxStatus};

/// Source of MX records for a domain.
///
/// Implementations return records in the order the resolver produced them;
/// ranking is done by [`select_best`].
pub trait MxResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error>;
}

impl<R: MxResolver + ?Sized> MxResolver for &R {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        (**self).lookup_mx(domain)
    }
}

/// [`MxResolver`] backed by the operating system's DNS configuration.
pub struct SystemResolver {
    inner: Resolver,
}

impl SystemResolver {
    pub fn from_system_conf() -> Result<Self, Error> {
        let inner = Resolver::from_system_conf().map_err(Error::resolver_init)?;
        Ok(Self { inner })
    }
}

impl std::fmt::Debug for SystemResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemResolver").finish_non_exhaustive()
    }
}

impl MxResolver for SystemResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let ascii = normalize_domain(domain)?;
        let lookup = self
            .inner
            .mx_lookup(ascii.as_str())
            .map_err(|err| Error::from_resolve(&ascii, err))?;
        let records = lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8())))
            .filter(|record| !record.exchange.is_empty())
            .collect();
        Ok(records)
    }
}

/// Lookup MX records for `domain` using the system resolver.
///
/// The domain is normalized via IDNA before querying DNS. Records come back in
/// ascending priority; equal priorities keep resolver order.
pub fn check_mx(domain: &str) -> Result<MxStatus, Error> {
    let resolver = SystemResolver::from_system_conf()?;
    resolve_with(&resolver, domain)
}

pub(crate) fn resolve_with<R>(resolver: &R, domain: &str) -> Result<MxStatus, Error>
where
    R: MxResolver + ?Sized,
{
    let mut records = match resolver.lookup_mx(domain) {
        Ok(records) => records,
        Err(err) if err.is_no_records() => Vec::new(),
        Err(err) => return Err(err),
    };
    // tri stable: l'ordre du résolveur départage les égalités
    records.sort_by_key(|r| r.priority);

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

/// Picks the record with the lowest priority value, the first one on ties.
pub fn select_best(records: &[MxRecord]) -> Option<&MxRecord> {
    records.iter().min_by_key(|r| r.priority)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(|source| Error::InvalidDomain {
        domain: trimmed.to_string(),
        source,
    })
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}
