//! Mutation side of the inheritance model: setting, resetting and toggling
//! the common filter fields of a draft.

use std::collections::BTreeSet;

use twitchets_async::types::CommonConfig;

use crate::error::FieldError;
use crate::resolve::{CommonField, FieldValue, Layered, Level};

/// Edits the common fields of either the global defaults or a ticket watch.
///
/// A ticket editor carries the global defaults so that edits starting from an
/// inherited value (region toggles) begin from what the user currently sees.
pub struct FieldEditor<'a> {
    local: &'a mut CommonConfig,
    parent: Option<&'a CommonConfig>,
}

impl<'a> FieldEditor<'a> {
    pub fn global(global: &'a mut CommonConfig) -> Self {
        Self {
            local: global,
            parent: None,
        }
    }

    pub fn ticket(ticket: &'a mut CommonConfig, global: &'a CommonConfig) -> Self {
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

    /// Current resolution of the fields being edited
    pub fn view(&self) -> Layered<'_> {
        match self.parent {
            Some(global) => Layered::ticket(self.local, global),
            None => Layered::global(self.local),
        }
    }

    /// Sets a numeric field after checking it against the field's domain.
    ///
    /// # Errors
    ///
    /// Returns the rejection when the input is outside the domain; the field
    /// keeps its previous value.
    pub fn set_number(&mut self, field: CommonField, value: f64) -> Result<(), FieldError> {
        let value = field.spec().kind.sanitize(field, value)?;
        match field {
            CommonField::Regions => return Err(FieldError::NotNumeric { field }),
            CommonField::EventSimilarity => self.local.event_similarity = Some(value),
            // sanitize has already truncated to a whole, non-negative number
            CommonField::NumTickets => self.local.num_tickets = Some(value as i64),
            CommonField::MaxTicketPrice => self.local.max_ticket_price = Some(value),
            CommonField::Discount => self.local.discount = Some(value),
        }
        tracing::trace!(%field, value, "field set");
        Ok(())
    }

    /// Replaces the region set
    pub fn set_regions(&mut self, regions: BTreeSet<String>) {
        self.local.regions = Some(regions);
    }

    /// Turns one region on or off, starting from the displayed set.
    ///
    /// When the regions are linked, the inherited set is copied locally first,
    /// which unlinks the field.
    pub fn toggle_region(&mut self, code: &str, enabled: bool) {
        let mut regions = self.view().regions().value.unwrap_or_default();
        if enabled {
            regions.insert(code.to_string());
        } else {
            regions.remove(code);
        }
        self.set_regions(regions);
    }

    /// Pins a field to its built-in default, ignoring the global value
    pub fn reset_to_default(&mut self, field: CommonField) {
        match field {
            CommonField::Regions => self.local.regions = Some(FieldValue::reset_sentinel()),
            CommonField::EventSimilarity => {
                self.local.event_similarity = Some(FieldValue::reset_sentinel());
            }
            CommonField::NumTickets => self.local.num_tickets = Some(FieldValue::reset_sentinel()),
            CommonField::MaxTicketPrice => {
                self.local.max_ticket_price = Some(FieldValue::reset_sentinel());
            }
            CommonField::Discount => self.local.discount = Some(FieldValue::reset_sentinel()),
        }
    }

    /// Clears a field so it inherits the global value again.
    ///
    /// # Errors
    ///
    /// The global defaults have no parent; resetting one of their fields to
    /// global is rejected.
    pub fn reset_to_global(&mut self, field: CommonField) -> Result<(), FieldError> {
        if !self.level().has_parent() {
            return Err(FieldError::NoParent { field });
        }
        self.clear(field);
        Ok(())
    }

    fn clear(&mut self, field: CommonField) {
        match field {
            CommonField::Regions => self.local.regions = None,
            CommonField::EventSimilarity => self.local.event_similarity = None,
            CommonField::NumTickets => self.local.num_tickets = None,
            CommonField::MaxTicketPrice => self.local.max_ticket_price = None,
            CommonField::Discount => self.local.discount = None,
        }
    }
}
