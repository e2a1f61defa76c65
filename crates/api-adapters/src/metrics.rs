//! Prometheus counters for submissions and moderation activity.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::{EncodeLabelSet, EncodeLabelValue};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Resolution {
    Delete,
    Keep,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ResolutionLabels {
    pub action: Resolution,
}

pub struct Metrics {
    registry: Registry,
    pub posts_created: Counter,
    pub reports: Counter,
    pub escalations: Counter,
    resolutions: Family<ResolutionLabels, Counter>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("moments");
        let posts_created = Counter::default();
        let reports = Counter::default();
        let escalations = Counter::default();
        let resolutions = Family::<ResolutionLabels, Counter>::default();

        registry.register("posts_created", "Posts submitted", posts_created.clone());
        registry.register("reports", "Reports recorded against posts", reports.clone());
        registry.register("escalations", "Reports that left a post hidden", escalations.clone());
        registry.register("resolutions", "Moderator resolutions by action", resolutions.clone());

        Self { registry, posts_created, reports, escalations, resolutions }
    }

    pub fn record_resolution(&self, action: Resolution) {
        self.resolutions.get_or_create(&ResolutionLabels { action }).inc();
    }

    /// OpenMetrics text exposition of every registered metric.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut body = String::new();
        encode(&mut body, &self.registry)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let metrics = Metrics::new();
        metrics.reports.inc();
        metrics.reports.inc();
        metrics.record_resolution(Resolution::Keep);

        let body = metrics.encode().unwrap();
        assert!(body.contains("moments_reports_total 2"));
        assert!(body.contains(r#"moments_resolutions_total{action="Keep"} 1"#));
        assert!(body.contains("moments_posts_created_total 0"));
    }
}
