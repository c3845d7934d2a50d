use crate::ports::ResolverPool;
use dnsprobe_domain::QueryResponse;
use tracing::debug;

/// Registrable domain (public suffix plus one label) of `name`.
///
/// Returns `None` when the name is itself a public suffix or cannot be
/// matched against the suffix list.
pub fn registrable_domain(name: &str) -> Option<String> {
    let name = name.trim().trim_end_matches('.').to_lowercase();
    if name.is_empty() {
        return None;
    }
    psl::domain_str(&name)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Decides whether a successful response must be discarded because its
/// registrable domain answers for arbitrary subdomains.
#[derive(Debug, Default, Clone, Copy)]
pub struct WildcardFilter;

impl WildcardFilter {
    pub fn new() -> Self {
        Self
    }

    /// If the registrable domain cannot be derived the response is kept.
    pub async fn is_wildcard(&self, pool: &dyn ResolverPool, response: &QueryResponse) -> bool {
        let Some(domain) = registrable_domain(&response.question) else {
            debug!(name = %response.question, "No registrable domain, skipping wildcard test");
            return false;
        };

        let detected = pool.wildcard_detected(response, &domain).await;
        if detected {
            debug!(
                pool = pool.name(),
                name = %response.question,
                domain = %domain,
                "Wildcard answer discarded"
            );
        }
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrable_domain_of_subdomain() {
        assert_eq!(
            registrable_domain("a.b.Example.CO.UK.").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(
            registrable_domain("sub.example.test").as_deref(),
            Some("example.test")
        );
    }

    #[test]
    fn test_registrable_domain_of_suffix_is_none() {
        assert_eq!(registrable_domain("co.uk"), None);
        assert_eq!(registrable_domain(""), None);
    }
}
