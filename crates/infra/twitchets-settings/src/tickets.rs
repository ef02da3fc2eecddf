//! Display ordering, filtering and index-based mutation of ticket watches.
//!
//! Indices taken and returned here always refer to the sorted view. Every
//! mutation writes the sequence back sorted, so a renamed or new ticket
//! moves to its proper position immediately.

use std::cmp::Ordering;

use twitchets_async::types::{Config, TicketConfig};

use crate::error::{Result, SettingsError};

/// Name given to a freshly added ticket; it sorts ahead of every other ticket
pub const NEW_EVENT_NAME: &str = "New Event";

/// Display order of two event names
pub fn compare_events(a: &str, b: &str) -> Ordering {
    match (a == NEW_EVENT_NAME, b == NEW_EVENT_NAME) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Sorts tickets into display order; equal names keep their relative order
pub fn sort_tickets(tickets: &mut [TicketConfig]) {
    tickets.sort_by(|a, b| compare_events(&a.event, &b.event));
}

/// Tickets in display order, without touching the underlying sequence
pub fn sorted_view(tickets: &[TicketConfig]) -> Vec<&TicketConfig> {
    let mut view: Vec<&TicketConfig> = tickets.iter().collect();
    view.sort_by(|a, b| compare_events(&a.event, &b.event));
    view
}

/// Tickets whose event name contains `query`, ignoring case.
///
/// Returns each match with its index in the sorted view, in sorted order. An
/// empty query matches everything.
pub fn filter_tickets<'a>(tickets: &'a [TicketConfig], query: &str) -> Vec<(usize, &'a TicketConfig)> {
    let needle = query.to_lowercase();
    sorted_view(tickets)
        .into_iter()
        .enumerate()
        .filter(|(_, ticket)| ticket.event.to_lowercase().contains(&needle))
        .collect()
}

/// Index of the ticket for `event` in the sorted view
pub fn find_ticket(tickets: &[TicketConfig], event: &str) -> Option<usize> {
    sorted_view(tickets).iter().position(|t| t.event == event)
}

/// Event names that appear on more than one ticket, in display order
pub fn duplicate_events(tickets: &[TicketConfig]) -> Vec<String> {
    let view = sorted_view(tickets);
    let mut dups: Vec<String> = view
        .windows(2)
        .filter(|w| w[0].event == w[1].event)
        .map(|w| w[0].event.clone())
        .collect();
    dups.dedup();
    dups
}

fn sorted_copy(config: &Config) -> Vec<TicketConfig> {
    let mut tickets = config.tickets.clone();
    sort_tickets(&mut tickets);
    tickets
}

fn ensure_unique(tickets: &[TicketConfig], event: &str, skip: Option<usize>) -> Result<()> {
    let taken = tickets
        .iter()
        .enumerate()
        .any(|(i, t)| Some(i) != skip && t.event == event);
    if taken {
        return Err(SettingsError::DuplicateEvent {
            event: event.to_string(),
        });
    }
    Ok(())
}

fn check_index(tickets: &[TicketConfig], index: usize) -> Result<()> {
    if index >= tickets.len() {
        return Err(SettingsError::TicketIndexOutOfRange {
            index,
            len: tickets.len(),
        });
    }
    Ok(())
}

/// Adds a [`NEW_EVENT_NAME`] ticket that inherits every field.
///
/// Returns its index in the sorted view.
///
/// # Errors
///
/// Fails if an unnamed ticket already exists.
pub fn add_ticket(config: &mut Config) -> Result<usize> {
    let mut tickets = sorted_copy(config);
    ensure_unique(&tickets, NEW_EVENT_NAME, None)?;

    tickets.push(TicketConfig::new(NEW_EVENT_NAME));
    sort_tickets(&mut tickets);
    config.tickets = tickets;

    Ok(0)
}

/// Replaces the ticket at `index` of the sorted view.
///
/// Returns the ticket's new index after re-sorting.
///
/// # Errors
///
/// Fails if `index` is out of range, or if the ticket is renamed to an event
/// another ticket already watches.
pub fn update_ticket(config: &mut Config, index: usize, ticket: TicketConfig) -> Result<usize> {
    let mut tickets = sorted_copy(config);
    check_index(&tickets, index)?;
    // Only a rename can introduce a clash; loaded duplicates stay editable
    if ticket.event != tickets[index].event {
        ensure_unique(&tickets, &ticket.event, Some(index))?;
    }

    let event = ticket.event.clone();
    tickets[index] = ticket;
    sort_tickets(&mut tickets);
    config.tickets = tickets;

    // Unique names make the lookup exact
    Ok(find_ticket(&config.tickets, &event).unwrap_or(index))
}

/// Replaces the ticket currently watching `event`
///
/// # Errors
///
/// Fails if no ticket watches `event`, or on a duplicate new name.
pub fn replace_ticket(config: &mut Config, event: &str, ticket: TicketConfig) -> Result<usize> {
    let index = find_ticket(&config.tickets, event).ok_or_else(|| SettingsError::TicketNotFound {
        event: event.to_string(),
    })?;
    update_ticket(config, index, ticket)
}

/// Removes the ticket at `index` of the sorted view
///
/// # Errors
///
/// Fails if `index` is out of range.
pub fn remove_ticket(config: &mut Config, index: usize) -> Result<TicketConfig> {
    let mut tickets = sorted_copy(config);
    check_index(&tickets, index)?;

    let removed = tickets.remove(index);
    config.tickets = tickets;
    Ok(removed)
}
