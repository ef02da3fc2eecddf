//! Advisory validation for the configuration document.
//!
//! Validation never blocks a load or a save. It collects warnings that
//! callers can choose to display or log.

use std::collections::BTreeSet;
use std::fmt;

use twitchets_async::types::{CommonConfig, Config, Region};

use crate::resolve::{CommonField, FieldValue};

/// An advisory warning about a configuration issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// JSON path to the problematic field, e.g. `tickets[2].discount`.
    pub path: String,
}

impl fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// Validate a document and return advisory warnings
pub fn validate(cfg: &Config) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    if cfg.api_key.trim().is_empty() {
        warnings.push(AdvisoryWarning {
            code: "apiKey.empty",
            path: "apiKey".into(),
            message: "No API key set; listings cannot be fetched".into(),
        });
    }

    if let Some(ntfy) = &cfg.notification.ntfy {
        let url = ntfy.effective_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            warnings.push(AdvisoryWarning {
                code: "notification.ntfy.url.invalid",
                path: "notification.ntfy.url".into(),
                message: format!("Expected an http(s) URL, got: '{url}'"),
            });
        }
        if ntfy.topic.as_deref().is_none_or(|t| t.trim().is_empty()) {
            warnings.push(AdvisoryWarning {
                code: "notification.ntfy.topic.empty",
                path: "notification.ntfy.topic".into(),
                message: "ntfy is enabled but has no topic".into(),
            });
        }
    }

    validate_common(&cfg.global, "global", &mut warnings);

    let mut seen = BTreeSet::new();
    for (i, ticket) in cfg.tickets.iter().enumerate() {
        let prefix = format!("tickets[{i}]");

        if ticket.event.trim().is_empty() {
            warnings.push(AdvisoryWarning {
                code: "tickets.event.empty",
                path: format!("{prefix}.event"),
                message: "Ticket has no event name".into(),
            });
        } else if !seen.insert(ticket.event.as_str()) {
            warnings.push(AdvisoryWarning {
                code: "tickets.event.duplicate",
                path: format!("{prefix}.event"),
                message: format!("Event '{}' is watched more than once", ticket.event),
            });
        }

        validate_common(&ticket.common, &prefix, &mut warnings);
    }

    warnings
}

fn validate_common(common: &CommonConfig, prefix: &str, warnings: &mut Vec<AdvisoryWarning>) {
    if let Some(regions) = &common.regions {
        for code in regions.iter().filter(|c| Region::from_code(c).is_none()) {
            warnings.push(AdvisoryWarning {
                code: "regions.unknown",
                path: format!("{prefix}.regions"),
                message: format!("Unknown region code '{code}'"),
            });
        }
    }

    let numbers = [
        (CommonField::EventSimilarity, common.event_similarity),
        (CommonField::NumTickets, common.num_tickets.map(|n| n as f64)),
        (CommonField::MaxTicketPrice, common.max_ticket_price),
        (CommonField::Discount, common.discount),
    ];

    // Negative values are reset sentinels and always valid
    for (field, value) in numbers {
        let Some(value) = value.filter(|v| !v.is_reset()) else {
            continue;
        };
        if let Err(e) = field.spec().kind.sanitize(field, value) {
            warnings.push(AdvisoryWarning {
                code: "value.out_of_range",
                path: format!("{prefix}.{}", field.key()),
                message: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twitchets_async::test_support::sample_config;
    use twitchets_async::types::{NtfyConfig, TicketConfig};

    fn codes(warnings: &[AdvisoryWarning]) -> Vec<&'static str> {
        warnings.iter().map(|w| w.code).collect()
    }

    #[test]
    fn sample_config_is_clean() {
        assert!(validate(&sample_config()).is_empty());
    }

    #[test]
    fn empty_api_key_warns() {
        let warnings = validate(&Config::default());
        assert_eq!(codes(&warnings), vec!["apiKey.empty"]);
        assert_eq!(warnings[0].path, "apiKey");
    }

    #[test]
    fn ntfy_without_scheme_and_topic_warns() {
        let mut cfg = sample_config();
        cfg.notification.ntfy = Some(NtfyConfig {
            url: Some("ntfy.example.com".into()),
            ..NtfyConfig::default()
        });

        let warnings = validate(&cfg);
        assert_eq!(
            codes(&warnings),
            vec!["notification.ntfy.url.invalid", "notification.ntfy.topic.empty"]
        );
    }

    #[test]
    fn empty_ntfy_url_uses_default_server() {
        let mut cfg = sample_config();
        cfg.notification.ntfy = Some(NtfyConfig {
            url: Some(String::new()),
            topic: Some("gigs".into()),
            ..NtfyConfig::default()
        });
        assert!(validate(&cfg).is_empty());
    }

    #[test]
    fn unknown_region_warns_with_path() {
        let mut cfg = sample_config();
        cfg.tickets[0].common.regions = Some(["GBLO", "XXXX"].into_iter().map(String::from).collect());

        let warnings = validate(&cfg);
        assert_eq!(codes(&warnings), vec!["regions.unknown"]);
        assert_eq!(warnings[0].path, "tickets[0].regions");
        assert!(warnings[0].message.contains("XXXX"));
    }

    #[test]
    fn out_of_range_values_warn_but_sentinels_do_not() {
        let mut cfg = sample_config();
        cfg.global.event_similarity = Some(1.5);
        cfg.tickets[1].common.discount = Some(150.0);

        let warnings = validate(&cfg);
        let paths: Vec<_> = warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["global.eventSimilarity", "tickets[1].discount"]);
        assert!(warnings.iter().all(|w| w.code == "value.out_of_range"));
    }

    #[test]
    fn empty_and_duplicate_events_warn() {
        let mut cfg = sample_config();
        cfg.tickets.push(TicketConfig::new(""));
        cfg.tickets.push(TicketConfig::new("Event 1"));

        let warnings = validate(&cfg);
        assert_eq!(
            codes(&warnings),
            vec!["tickets.event.empty", "tickets.event.duplicate"]
        );
        assert_eq!(warnings[1].path, "tickets[4].event");
    }

    #[test]
    fn display_format() {
        let w = AdvisoryWarning {
            code: "apiKey.empty",
            path: "apiKey".into(),
            message: "missing".into(),
        };
        assert_eq!(w.to_string(), "[apiKey.empty] apiKey: missing");
    }
}
