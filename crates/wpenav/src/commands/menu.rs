//! The `menu` command: render the related-installs menu.
//!
//! This path never fails the process. Configuration gaps, auth
//! rejections, and fetch errors all log at debug and render nothing,
//! the same way the admin-bar integration this replaces stayed blank
//! rather than breaking the page.

use owo_colors::OwoColorize;

use wpenav_core::{Menu, MenuNode, Navigator};

use crate::cli::{GlobalOpts, MenuArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: MenuArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match render(&args, global).await {
        Ok(out) => output::print(&out, global.quiet),
        Err(err) => tracing::debug!(error = %err, "menu unavailable, rendering nothing"),
    }
    Ok(())
}

async fn render(args: &MenuArgs, global: &GlobalOpts) -> Result<String, CliError> {
    let account = crate::config::resolve_account(global)?;
    let navigator = Navigator::connect(account)?;

    if args.refresh {
        navigator.directory(true).await?;
    }
    let menu = navigator.menu().await?;
    if menu.is_empty() {
        return Ok(String::new());
    }

    let colored = output::should_color(&global.color);
    Ok(match global.output {
        OutputFormat::Table => render_text(&menu, colored),
        OutputFormat::Plain => link_urls(&menu).join("\n"),
        OutputFormat::Json => output::json(&menu, false),
        OutputFormat::JsonCompact => output::json(&menu, true),
        OutputFormat::Yaml => output::yaml(&menu),
    })
}

/// Interactive rendering: headings, indented links, separators.
fn render_text(menu: &Menu, colored: bool) -> String {
    let mut lines = Vec::with_capacity(menu.nodes.len() + 1);

    if colored {
        lines.push(menu.title.bold().underline().to_string());
    } else {
        lines.push(menu.title.clone());
    }

    for node in &menu.nodes {
        match node {
            MenuNode::Label { text } => {
                if colored {
                    lines.push(text.bold().to_string());
                } else {
                    lines.push(text.clone());
                }
            }
            MenuNode::Link { title, url } => {
                if colored {
                    lines.push(format!("  {title}  {}", url.cyan()));
                } else {
                    lines.push(format!("  {title}  {url}"));
                }
            }
            MenuNode::Separator => lines.push("─".repeat(32)),
        }
    }

    lines.join("\n")
}

/// Plain mode: one link URL per line, nothing else.
fn link_urls(menu: &Menu) -> Vec<String> {
    menu.nodes
        .iter()
        .filter_map(|node| match node {
            MenuNode::Link { url, .. } => Some(url.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu() -> Menu {
        Menu {
            title: "WP Engine Sites".into(),
            nodes: vec![
                MenuNode::Label {
                    text: "Current Site:".into(),
                },
                MenuNode::Link {
                    title: "acmeprod (production)".into(),
                    url: "https://acme.com/wp-admin".into(),
                },
                MenuNode::Separator,
                MenuNode::Label {
                    text: "Other WPE Installs".into(),
                },
                MenuNode::Link {
                    title: "blogprod (production)".into(),
                    url: "https://blog.example.com/wp-admin".into(),
                },
            ],
        }
    }

    #[test]
    fn text_rendering_keeps_node_order() {
        let text = render_text(&sample_menu(), false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "WP Engine Sites");
        assert_eq!(lines[1], "Current Site:");
        assert!(lines[2].contains("acmeprod (production)"));
        assert!(lines[2].contains("https://acme.com/wp-admin"));
        assert_eq!(lines[4], "Other WPE Installs");
    }

    #[test]
    fn plain_mode_emits_only_urls() {
        assert_eq!(
            link_urls(&sample_menu()),
            vec![
                "https://acme.com/wp-admin".to_string(),
                "https://blog.example.com/wp-admin".to_string(),
            ]
        );
    }
}
