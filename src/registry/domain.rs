//! Hostname relations built on registry lengths.

use super::DomainRegistry;

/// Drop one trailing dot; registry lengths never include it.
fn trim_root(hostname: &str) -> &str {
    hostname.strip_suffix('.').unwrap_or(hostname)
}

impl DomainRegistry {
    /// The public suffix of `hostname`, as a slice of the input.
    pub fn public_suffix<'h>(&self, hostname: &'h str) -> Option<&'h str> {
        let len = self.registry_length(hostname);
        if len == 0 {
            return None;
        }
        let host = trim_root(hostname);
        host.get(host.len() - len..)
    }

    /// The public suffix plus the label in front of it (`example.co.uk` for
    /// `www.example.co.uk`).
    ///
    /// `None` when the host has no known suffix or is itself a suffix.
    pub fn registrable_domain<'h>(&self, hostname: &'h str) -> Option<&'h str> {
        let len = self.registry_length(hostname);
        if len == 0 {
            return None;
        }
        let host = trim_root(hostname);
        let head = host.get(..host.len() - len)?.strip_suffix('.')?;
        let label_start = head.rfind('.').map_or(0, |dot| dot + 1);
        if label_start == head.len() {
            return None;
        }
        host.get(label_start..)
    }

    /// Whether the whole of `hostname` is a public suffix. A top-level label
    /// with no rule counts as one.
    pub fn is_public_suffix(&self, hostname: &str) -> bool {
        let len = self.registry_length_allow_unknown_registries(hostname);
        len != 0 && len == trim_root(hostname).len()
    }

    /// Whether `subdomain` lies strictly below `domain` without crossing a
    /// registry boundary.
    ///
    /// `domain` must have at least one label in front of its public suffix;
    /// `www.co.uk` is never treated as a subdomain of `co.uk`.
    pub fn is_subdomain(&self, domain: &str, subdomain: &str) -> bool {
        let domain = trim_root(domain);
        let subdomain = trim_root(subdomain);

        let suffix_len = self.registry_length(domain);
        if suffix_len == 0 || suffix_len >= domain.len() {
            return false;
        }
        if self.registry_length(subdomain) != suffix_len {
            return false;
        }
        if subdomain.len() <= domain.len() + 1 {
            return false;
        }

        let (head, tail) = subdomain.split_at(subdomain.len() - domain.len());
        head.ends_with('.') && tail.eq_ignore_ascii_case(domain)
    }
}
