//! Menu tree construction.
//!
//! The menu is plain data -- an ordered list of labels, links, and one
//! separator -- so any frontend (admin bar, CLI, TUI) can render it
//! without knowing how it was assembled.

use serde::Serialize;

use crate::matcher;
use crate::model::{Site, SiteDirectory};

/// How the menu correlates the directory against the current domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuMode {
    /// Current site first with its installs, separator, then every
    /// remaining site.
    #[default]
    CurrentFirst,
    /// Flat list of only the sites sharing the current domain root.
    MatchingOnly,
}

/// One node in the rendered menu, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MenuNode {
    /// Non-clickable heading or an install without a domain.
    Label { text: String },
    /// Clickable install entry.
    Link { title: String, url: String },
    /// Divider between the current-site section and the rest.
    Separator,
}

/// The assembled menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub title: String,
    pub nodes: Vec<MenuNode>,
}

impl Menu {
    /// `true` when there is nothing below the root title.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the menu for `current_root` from a directory snapshot.
pub fn build_menu(
    directory: &SiteDirectory,
    current_root: &str,
    mode: MenuMode,
    admin_links: bool,
) -> Menu {
    let mut nodes = Vec::new();

    match mode {
        MenuMode::CurrentFirst => {
            let split = matcher::split_current(directory, current_root);

            if let Some(current) = &split.current {
                nodes.push(MenuNode::Label {
                    text: "Current Site:".into(),
                });
                nodes.push(MenuNode::Label {
                    text: current.name.clone(),
                });
                push_installs(&mut nodes, current, admin_links);
                nodes.push(MenuNode::Separator);
            }

            if !split.others.is_empty() {
                nodes.push(MenuNode::Label {
                    text: "Other WPE Installs".into(),
                });
                for site in &split.others {
                    nodes.push(MenuNode::Label {
                        text: site.name.clone(),
                    });
                    push_installs(&mut nodes, site, admin_links);
                }
            }
        }

        MenuMode::MatchingOnly => {
            for site in matcher::matching_sites(directory, current_root) {
                nodes.push(MenuNode::Label {
                    text: site.name.clone(),
                });
                push_installs(&mut nodes, &site, admin_links);
            }
        }
    }

    Menu {
        title: "WP Engine Sites".into(),
        nodes,
    }
}

/// Append a site's installs: linked when a domain exists, otherwise a
/// plain label (the install is listed but cannot be jumped to).
fn push_installs(nodes: &mut Vec<MenuNode>, site: &Site, admin_links: bool) {
    for install in &site.installs {
        match install.url(admin_links) {
            Some(url) => nodes.push(MenuNode::Link {
                title: install.label(),
                url,
            }),
            None => nodes.push(MenuNode::Label {
                text: install.label(),
            }),
        }
    }
}
