//! # Display Positions and Selectors
//!
//! Records are identified internally by UUID, which nobody wants to type. Text
//! interfaces address them by their 1-based display position instead:
//!
//! - A **Category** is `N` (its position, e.g. `2`) or its name (e.g. `Car`).
//! - An **Event** is `C.E`: Category position, then Event position inside it
//!   (e.g. `2.3` is the third Event of the second Category).
//!
//! Positions mirror `order_index + 1`, so they change when things are reordered. They
//! are meant to be read off the latest `chroniton list` and used right away.
//!
//! Resolution against the data happens in [`crate::api::ReminderModel`]; this module
//! only parses and formats.

use std::fmt;
use std::str::FromStr;

use crate::error::{ChronitonError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    /// 1-based display position.
    Position(usize),
    Name(String),
}

/// 1-based `category.event` display path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventPath {
    pub category: usize,
    pub event: usize,
}

impl EventPath {
    /// From 0-based positions, as returned by `event_path`.
    pub fn from_zero_based((category, event): (usize, usize)) -> Self {
        Self {
            category: category + 1,
            event: event + 1,
        }
    }

    pub fn to_zero_based(self) -> (usize, usize) {
        (self.category - 1, self.event - 1)
    }
}

impl fmt::Display for EventPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.event)
    }
}

impl FromStr for EventPath {
    type Err = ChronitonError;

    fn from_str(s: &str) -> Result<Self> {
        let (category, event) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| ChronitonError::Api(format!("Expected CATEGORY.EVENT, got '{}'", s)))?;
        Ok(Self {
            category: parse_position(category)?,
            event: parse_position(event)?,
        })
    }
}

pub fn parse_event_path(s: &str) -> Result<EventPath> {
    s.parse()
}

/// A bare positive number is a position; anything else is a name.
pub fn parse_category_selector(s: &str) -> Result<CategorySelector> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ChronitonError::Api("Empty category selector".to_string()));
    }
    if s.chars().all(|c| c.is_ascii_digit()) {
        return parse_position(s).map(CategorySelector::Position);
    }
    Ok(CategorySelector::Name(s.to_string()))
}

/// Parse a 1-based display position.
pub fn parse_position(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err(ChronitonError::Api("Positions start at 1".to_string())),
        Ok(n) => Ok(n),
        Err(_) => Err(ChronitonError::Api(format!("Invalid position: '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_selector() {
        assert_eq!(
            parse_category_selector("2").unwrap(),
            CategorySelector::Position(2)
        );
        assert_eq!(
            parse_category_selector(" Car ").unwrap(),
            CategorySelector::Name("Car".to_string())
        );
        assert_eq!(
            parse_category_selector("2nd floor").unwrap(),
            CategorySelector::Name("2nd floor".to_string())
        );
        assert!(parse_category_selector("0").is_err());
        assert!(parse_category_selector("  ").is_err());
    }

    #[test]
    fn test_parse_event_path() {
        assert_eq!(
            parse_event_path("2.3").unwrap(),
            EventPath {
                category: 2,
                event: 3
            }
        );
        assert!(parse_event_path("2").is_err());
        assert!(parse_event_path("0.1").is_err());
        assert!(parse_event_path("1.x").is_err());
        assert!(parse_event_path("1.2.3").is_err());
    }

    #[test]
    fn test_event_path_conversions() {
        let path = EventPath::from_zero_based((1, 0));
        assert_eq!(path.to_string(), "2.1");
        assert_eq!(path.to_zero_based(), (1, 0));
    }
}
