//! Field-level inheritance between a ticket watch and the global defaults.
//!
//! Each filter field of a [`CommonConfig`] is in one of three states:
//! - **Linked**: absent on a ticket, so the global value shows through.
//! - **Default**: absent on the global object, or pinned to the reset
//!   sentinel (`-1`, `""`, `[]`). The scanner's built-in default applies and
//!   nothing is inherited.
//! - **Explicit**: set locally, overriding the global value.
//!
//! Resolution reads the global object at call time, so a linked field always
//! reflects the current global value.

use std::collections::BTreeSet;
use std::fmt;

use twitchets_async::types::{CommonConfig, Config, Region};

use crate::error::FieldError;

/// Event similarity applied when neither the ticket nor the global defaults set one
pub const DEFAULT_EVENT_SIMILARITY: f64 = 0.9;

/// Which object a set of common fields belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The global defaults; fields have no parent to inherit from
    Global,
    /// A ticket watch; absent fields inherit from the global defaults
    Ticket,
}

impl Level {
    /// Whether absent fields fall back to a parent value
    pub const fn has_parent(self) -> bool {
        matches!(self, Self::Ticket)
    }
}

/// A field value with a reset sentinel meaning "use the built-in default"
pub trait FieldValue: Clone + PartialEq {
    /// The value written by "reset to default"
    fn reset_sentinel() -> Self;

    /// Whether this value is (equivalent to) the reset sentinel
    fn is_reset(&self) -> bool;
}

impl FieldValue for f64 {
    fn reset_sentinel() -> Self {
        -1.0
    }

    fn is_reset(&self) -> bool {
        *self < 0.0
    }
}

impl FieldValue for i64 {
    fn reset_sentinel() -> Self {
        -1
    }

    fn is_reset(&self) -> bool {
        *self < 0
    }
}

impl FieldValue for String {
    fn reset_sentinel() -> Self {
        Self::new()
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for BTreeSet<String> {
    fn reset_sentinel() -> Self {
        Self::new()
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }
}

/// Inheritance state of a resolved field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Inherited from the global defaults
    Linked,
    /// Built-in default applies
    Default,
    /// Overridden locally
    Explicit,
}

/// Effective value of a field along with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// Value to display; `None` means show the placeholder
    pub value: Option<T>,
    pub state: LinkState,
}

impl<T> Resolved<T> {
    pub const fn is_linked(&self) -> bool {
        matches!(self.state, LinkState::Linked)
    }

    pub const fn uses_default(&self) -> bool {
        self.value.is_none()
    }
}

/// Resolves one field against an optional parent value.
///
/// `fallback` enables inheritance; it is only meaningful below the global
/// level. A sentinel on the parent resolves to the built-in default.
pub fn resolve<T: FieldValue>(local: Option<&T>, global: Option<&T>, fallback: bool) -> Resolved<T> {
    match local {
        None if fallback => Resolved {
            value: global.filter(|g| !g.is_reset()).cloned(),
            state: LinkState::Linked,
        },
        Some(value) if !value.is_reset() => Resolved {
            value: Some(value.clone()),
            state: LinkState::Explicit,
        },
        _ => Resolved {
            value: None,
            state: LinkState::Default,
        },
    }
}

/// Input domain of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Set of region codes
    Regions,
    /// Whole number; fractional input is truncated
    Integer,
    /// Number in `[0, 1]`
    Fraction,
    /// Number in `[0, 100]`
    Percentage,
    /// Non-negative amount in pounds
    Price,
}

impl FieldKind {
    /// Checks numeric input against the domain, returning the value to store.
    ///
    /// # Errors
    ///
    /// Rejects negative, non-finite, and out-of-range input, and any numeric
    /// input for non-numeric kinds.
    pub fn sanitize(self, field: CommonField, value: f64) -> Result<f64, FieldError> {
        if !value.is_finite() {
            return Err(FieldError::NotFinite { field });
        }
        if value < 0.0 {
            return Err(FieldError::Negative { field, value });
        }

        let max = match self {
            Self::Regions => return Err(FieldError::NotNumeric { field }),
            Self::Integer => return Ok(value.trunc()),
            Self::Price => return Ok(value),
            Self::Fraction => 1.0,
            Self::Percentage => 100.0,
        };

        if value > max {
            return Err(FieldError::AboveMax { field, value, max });
        }
        Ok(value)
    }

    /// Formats a stored number the way the settings form shows it
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Price => format!("£{value}"),
            Self::Percentage => format!("{value}%"),
            Self::Regions | Self::Integer | Self::Fraction => format!("{value}"),
        }
    }
}

/// The filter fields shared by the global defaults and ticket watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonField {
    Regions,
    EventSimilarity,
    NumTickets,
    MaxTicketPrice,
    Discount,
}

/// Presentation metadata for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub description: &'static str,
    /// Shown when the field resolves to its built-in default
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

impl CommonField {
    pub const ALL: [Self; 5] = [
        Self::Regions,
        Self::EventSimilarity,
        Self::NumTickets,
        Self::MaxTicketPrice,
        Self::Discount,
    ];

    pub const fn spec(self) -> FieldSpec {
        match self {
            Self::Regions => FieldSpec {
                label: "Regions",
                description: "If no regions selected, all regions will be used",
                placeholder: "All regions",
                kind: FieldKind::Regions,
            },
            Self::EventSimilarity => FieldSpec {
                label: "Event Similarity",
                description: "Required event name similarity, between 0.0 - 1.0",
                placeholder: "0.9",
                kind: FieldKind::Fraction,
            },
            Self::NumTickets => FieldSpec {
                label: "Number of Tickets",
                description: "Required number of tickets",
                placeholder: "Any",
                kind: FieldKind::Integer,
            },
            Self::MaxTicketPrice => FieldSpec {
                label: "Max Ticket Price",
                description: "Maximum price per ticket (including fee) in pounds (£)",
                placeholder: "No Max",
                kind: FieldKind::Price,
            },
            Self::Discount => FieldSpec {
                label: "Minimum Discount",
                description: "Minimum discount (including fee) on the original price as a percentage",
                placeholder: "No Min",
                kind: FieldKind::Percentage,
            },
        }
    }

    /// JSON name of the field in the configuration document
    pub const fn key(self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::EventSimilarity => "eventSimilarity",
            Self::NumTickets => "numTickets",
            Self::MaxTicketPrice => "maxTicketPrice",
            Self::Discount => "discount",
        }
    }
}

impl fmt::Display for CommonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().label)
    }
}

/// Read-only view of a [`CommonConfig`] layered over its parent, if any
#[derive(Debug, Clone, Copy)]
pub struct Layered<'a> {
    local: &'a CommonConfig,
    parent: Option<&'a CommonConfig>,
}

impl<'a> Layered<'a> {
    /// View of the global defaults, which have no parent
    pub const fn global(global: &'a CommonConfig) -> Self {
        Self {
            local: global,
            parent: None,
        }
    }

    /// View of a ticket's overrides on top of the global defaults
    pub const fn ticket(ticket: &'a CommonConfig, global: &'a CommonConfig) -> Self {
        Self {
            local: ticket,
            parent: Some(global),
        }
    }

    pub const fn level(&self) -> Level {
        if self.parent.is_some() {
            Level::Ticket
        } else {
            Level::Global
        }
    }

    fn field<T: FieldValue>(&self, get: impl Fn(&CommonConfig) -> Option<&T>) -> Resolved<T> {
        resolve(
            get(self.local),
            self.parent.and_then(&get),
            self.parent.is_some(),
        )
    }

    pub fn regions(&self) -> Resolved<BTreeSet<String>> {
        self.field(|c| c.regions.as_ref())
    }

    pub fn event_similarity(&self) -> Resolved<f64> {
        self.field(|c| c.event_similarity.as_ref())
    }

    pub fn num_tickets(&self) -> Resolved<i64> {
        self.field(|c| c.num_tickets.as_ref())
    }

    pub fn max_ticket_price(&self) -> Resolved<f64> {
        self.field(|c| c.max_ticket_price.as_ref())
    }

    pub fn discount(&self) -> Resolved<f64> {
        self.field(|c| c.discount.as_ref())
    }

    /// Inheritance state of any field
    pub fn state(&self, field: CommonField) -> LinkState {
        match field {
            CommonField::Regions => self.regions().state,
            CommonField::EventSimilarity => self.event_similarity().state,
            CommonField::NumTickets => self.num_tickets().state,
            CommonField::MaxTicketPrice => self.max_ticket_price().state,
            CommonField::Discount => self.discount().state,
        }
    }

    /// Effective numeric value of a field, `None` for regions or the default
    pub fn number(&self, field: CommonField) -> Option<f64> {
        match field {
            CommonField::Regions => None,
            CommonField::EventSimilarity => self.event_similarity().value,
            CommonField::NumTickets => self.num_tickets().value.map(|n| n as f64),
            CommonField::MaxTicketPrice => self.max_ticket_price().value,
            CommonField::Discount => self.discount().value,
        }
    }

    /// Text to show for a field: the formatted value, or the placeholder
    pub fn display(&self, field: CommonField) -> String {
        let spec = field.spec();
        if field == CommonField::Regions {
            return match self.regions().value {
                Some(codes) => codes
                    .iter()
                    .map(|code| Region::from_code(code).map_or(code.as_str(), |r| r.name))
                    .collect::<Vec<_>>()
                    .join(", "),
                None => spec.placeholder.to_string(),
            };
        }

        self.number(field)
            .map_or_else(|| spec.placeholder.to_string(), |v| spec.kind.format(v))
    }

    /// Fully combined filter with built-in defaults applied
    pub fn effective(&self) -> EffectiveFilter {
        EffectiveFilter {
            regions: self.regions().value.unwrap_or_default(),
            event_similarity: self
                .event_similarity()
                .value
                .unwrap_or(DEFAULT_EVENT_SIMILARITY),
            num_tickets: self
                .num_tickets()
                .value
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0),
            max_ticket_price: self.max_ticket_price().value,
            min_discount: self.discount().value,
        }
    }
}

/// Listing filter the scanner applies for one ticket watch
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveFilter {
    /// Accepted region codes; empty accepts every region
    pub regions: BTreeSet<String>,
    pub event_similarity: f64,
    /// `None` accepts any number of tickets
    pub num_tickets: Option<u32>,
    /// `None` means no price ceiling
    pub max_ticket_price: Option<f64>,
    /// `None` means no discount floor
    pub min_discount: Option<f64>,
}

/// A ticket watch with every field resolved
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveTicket {
    pub event: String,
    pub filter: EffectiveFilter,
}

/// Combines every ticket watch with the global defaults, in document order
pub fn effective_tickets(config: &Config) -> Vec<EffectiveTicket> {
    config
        .tickets
        .iter()
        .map(|ticket| EffectiveTicket {
            event: ticket.event.clone(),
            filter: Layered::ticket(&ticket.common, &config.global).effective(),
        })
        .collect()
}
