//! The `search` command: free-text search over the site directory.
//!
//! Structured output formats keep the `{"results": [...]}` envelope, and
//! failures in those formats additionally emit `{"message": "..."}` on
//! stdout so scripts get a parseable payload either way.

use tabled::Tabled;

use wpenav_core::{ApiSource, ErrorEnvelope, Navigator, SearchEnvelope, SearchHit};

use crate::cli::{GlobalOpts, OutputFormat, SearchArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Install")]
    install: String,
    #[tabled(rename = "Environment")]
    environment: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&SearchHit> for SearchRow {
    fn from(hit: &SearchHit) -> Self {
        Self {
            site: hit.site_name.clone(),
            install: hit.install_name.clone(),
            environment: hit.environment.clone(),
            url: hit.url.clone(),
        }
    }
}

pub async fn handle(
    navigator: &Navigator<ApiSource>,
    args: SearchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.refresh {
        navigator.directory(true).await?;
    }

    match navigator.search(&args.query).await {
        Ok(envelope) => {
            let out = render_envelope(&envelope, &global.output);
            output::print(&out, global.quiet);
            Ok(())
        }
        Err(err) => {
            if global.output.is_structured() {
                let payload = ErrorEnvelope::new(&err);
                let out = match global.output {
                    OutputFormat::JsonCompact => output::json(&payload, true),
                    OutputFormat::Yaml => output::yaml(&payload),
                    _ => output::json(&payload, false),
                };
                output::print(&out, global.quiet);
            }
            Err(err.into())
        }
    }
}

fn render_envelope(envelope: &SearchEnvelope, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<SearchRow> = envelope.results.iter().map(SearchRow::from).collect();
            output::table(&rows)
        }
        OutputFormat::Json => output::json(envelope, false),
        OutputFormat::JsonCompact => output::json(envelope, true),
        OutputFormat::Yaml => output::yaml(envelope),
        OutputFormat::Plain => envelope
            .results
            .iter()
            .map(|hit| hit.url.clone())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
