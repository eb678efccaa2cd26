//! Site-aware page text extraction.
//!
//! Classifies the URL against the rule table, probes the site's product
//! container when one is configured, and persists the raw text to the fixed
//! snapshot slot for debugging and audit.

mod rules;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::browser::BrowserDriver;
use crate::core::errors::PipelineError;

pub use rules::{rule_for, ProbeMissPolicy, SiteRule};

/// Result of one extraction. `snapshot_path` always points at the same
/// slot; the last extraction wins.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedPage {
    pub text: String,
    pub snapshot_path: String,
}

pub struct Extractor {
    browser: Arc<dyn BrowserDriver>,
    snapshot_path: PathBuf,
}

impl Extractor {
    pub fn new(browser: Arc<dyn BrowserDriver>, snapshot_path: PathBuf) -> Self {
        Self {
            browser,
            snapshot_path,
        }
    }

    /// Extracts product-page text for `url`.
    ///
    /// URL-shape validation happens before any navigation, so an invalid
    /// product URL never spends a browser round trip. Navigation failures
    /// are retryable `Extraction` errors; validation failures are
    /// `InvalidUrl` and are not.
    pub async fn extract(&self, url: &str) -> Result<ExtractedPage, PipelineError> {
        validate_url_shape(url)?;

        let rule = rule_for(url);
        if let Some(rule) = rule {
            if let Some(required) = rule.required_substring {
                if !url.contains(required) {
                    return Err(PipelineError::InvalidUrl(format!(
                        "{} URLs must contain '{}'",
                        rule.name, required
                    )));
                }
            }
        }

        let page = self.browser.navigate(url).await?;

        let text = match rule {
            Some(rule) => {
                if self.browser.element_exists(&page, rule.selector).await? {
                    self.browser.visible_text(&page, rule.selector).await?
                } else {
                    match rule.on_probe_miss {
                        ProbeMissPolicy::FullBody => {
                            tracing::warn!(
                                "{} container '{}' missing on {}, falling back to full page",
                                rule.name,
                                rule.selector,
                                url
                            );
                            self.browser.visible_text(&page, "body").await?
                        }
                        ProbeMissPolicy::Fail => {
                            return Err(PipelineError::InvalidUrl(format!(
                                "{} page has no product container '{}'",
                                rule.name, rule.selector
                            )));
                        }
                    }
                }
            }
            None => self.browser.visible_text(&page, "body").await?,
        };

        tokio::fs::write(&self.snapshot_path, &text)
            .await
            .map_err(|e| {
                PipelineError::Extraction(format!(
                    "failed to write snapshot {}: {}",
                    self.snapshot_path.display(),
                    e
                ))
            })?;

        tracing::info!(
            "Extracted {} chars from {} (snapshot: {})",
            text.len(),
            url,
            self.snapshot_path.display()
        );

        Ok(ExtractedPage {
            text,
            snapshot_path: self.snapshot_path.display().to_string(),
        })
    }
}

/// Rejects URLs the browser should never see: unparsable ones and
/// non-http(s) schemes.
fn validate_url_shape(url: &str) -> Result<(), PipelineError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| PipelineError::InvalidUrl(format!("malformed url: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(PipelineError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            other
        ))),
    }
}
