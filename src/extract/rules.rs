/// What to do when a site's product container selector matches nothing
/// on the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMissPolicy {
    /// Degrade to whole-page visible text.
    FullBody,
    /// Treat the page as not a product page and reject the URL.
    Fail,
}

/// One entry in the extraction dispatch table.
///
/// Marketplace pages bury product data inside one container; scraping the
/// whole page pollutes the context with navigation and ads. The container
/// may still be missing (A/B test, redesign), so each rule carries its own
/// miss policy. Adding a site is a new table row, not new control flow.
#[derive(Debug, Clone)]
pub struct SiteRule {
    pub name: &'static str,
    /// URL prefix this rule claims.
    pub prefix: &'static str,
    /// Substring the URL must contain to count as a product page.
    pub required_substring: Option<&'static str>,
    /// Product container selector to probe before falling back.
    pub selector: &'static str,
    pub on_probe_miss: ProbeMissPolicy,
}

/// The deployed rule table. Amazon degrades to full-page text when the
/// container is missing; Flipkart rejects instead. The asymmetry is
/// deliberate and covered by tests either way.
const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        name: "amazon",
        prefix: "https://www.amazon.",
        required_substring: Some("/dp/"),
        selector: "#centerCol",
        on_probe_miss: ProbeMissPolicy::FullBody,
    },
    SiteRule {
        name: "flipkart",
        prefix: "https://www.flipkart.com",
        required_substring: None,
        selector: "#container",
        on_probe_miss: ProbeMissPolicy::Fail,
    },
];

/// Finds the rule claiming `url`, if any. No rule means generic
/// whole-page extraction.
pub fn rule_for(url: &str) -> Option<&'static SiteRule> {
    SITE_RULES.iter().find(|rule| url.starts_with(rule.prefix))
}
