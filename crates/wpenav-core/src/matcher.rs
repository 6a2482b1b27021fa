//! Correlating the current domain against the cached directory.
//!
//! Two modes, mirroring the two generations of the menu:
//! current-first splits the directory into "the site you are on" plus
//! everything else, while matching-only keeps just the sites that share
//! the current domain root.

use crate::domain::domain_root;
use crate::model::{Site, SiteDirectory};

/// Result of [`split_current`]: the current site (if any) and the rest
/// of the directory, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSplit {
    pub current: Option<Site>,
    pub others: Vec<Site>,
}

/// Find the site the current domain belongs to.
///
/// The first install (directory order) whose domain root equals
/// `current_root` selects its parent site; ties across sites resolve to
/// the first occurrence only. Installs without a domain are skipped for
/// the test but remain in the matched site's install list. No match is
/// not an error: `current` is `None` and every site lands in `others`.
pub fn split_current(directory: &SiteDirectory, current_root: &str) -> CurrentSplit {
    let matched = directory.sites.iter().position(|site| {
        site.installs
            .iter()
            .filter_map(|install| install.domain.as_deref())
            .any(|domain| domain_root(domain) == current_root)
    });

    let mut current = None;
    let mut others = Vec::with_capacity(directory.sites.len());

    for (index, site) in directory.sites.iter().enumerate() {
        if Some(index) == matched {
            current = Some(site.clone());
        } else {
            others.push(site.clone());
        }
    }

    CurrentSplit { current, others }
}

/// Every site with at least one install whose domain root equals
/// `current_root`, each returned with ALL of its installs, directory
/// order preserved. Empty result, not an error, when nothing matches.
pub fn matching_sites(directory: &SiteDirectory, current_root: &str) -> Vec<Site> {
    directory
        .sites
        .iter()
        .filter(|site| {
            site.installs
                .iter()
                .filter_map(|install| install.domain.as_deref())
                .any(|domain| domain_root(domain) == current_root)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Install;

    fn install(name: &str, domain: Option<&str>) -> Install {
        Install {
            name: name.into(),
            environment: "production".into(),
            domain: domain.map(str::to_owned),
        }
    }

    fn site(name: &str, installs: Vec<Install>) -> Site {
        Site {
            name: name.into(),
            group: None,
            installs,
        }
    }

    fn directory() -> SiteDirectory {
        SiteDirectory::new(vec![
            site("A", vec![install("a-prod", Some("a.com"))]),
            site("B", vec![install("b-prod", Some("b.com"))]),
        ])
    }

    #[test]
    fn split_finds_current_and_keeps_others_in_order() {
        let split = split_current(&directory(), "b");

        assert_eq!(split.current.unwrap().name, "B");
        assert_eq!(split.others.len(), 1);
        assert_eq!(split.others[0].name, "A");
    }

    #[test]
    fn split_without_match_returns_everything_as_other() {
        let split = split_current(&directory(), "zzz");

        assert!(split.current.is_none());
        assert_eq!(split.others.len(), 2);
    }

    #[test]
    fn first_occurrence_wins_on_duplicate_roots() {
        let dir = SiteDirectory::new(vec![
            site("First", vec![install("one", Some("shared.com"))]),
            site("Second", vec![install("two", Some("www.shared.com"))]),
        ]);

        let split = split_current(&dir, "shared");

        assert_eq!(split.current.unwrap().name, "First");
        assert_eq!(split.others[0].name, "Second");
    }

    #[test]
    fn domainless_installs_are_skipped_but_retained() {
        let dir = SiteDirectory::new(vec![site(
            "Mixed",
            vec![
                install("pending", None),
                install("live", Some("mixed.wpengine.com")),
            ],
        )]);

        let split = split_current(&dir, "mixed");

        let current = split.current.unwrap();
        assert_eq!(current.name, "Mixed");
        // The domainless install stays in the matched site's list.
        assert_eq!(current.installs.len(), 2);
    }

    #[test]
    fn matching_sites_includes_all_installs_of_matching_site() {
        let dir = SiteDirectory::new(vec![
            site(
                "Acme",
                vec![
                    install("acme-prod", Some("acme.com")),
                    install("acme-stage", Some("acmestage.wpengine.com")),
                ],
            ),
            site("Other", vec![install("other", Some("other.com"))]),
        ]);

        let matches = matching_sites(&dir, "acme");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Acme");
        // The non-matching staging install is included too.
        assert_eq!(matches[0].installs.len(), 2);
    }

    #[test]
    fn matching_sites_empty_when_nothing_matches() {
        assert!(matching_sites(&directory(), "nope").is_empty());
    }
}
