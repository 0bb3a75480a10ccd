//! Product search filter selection and its query serialization.
//!
//! The catalog view owns one [`FilterSelection`], mutates it field by field
//! as the user types or cycles options, and turns it into the query pairs of
//! `GET /products/search` with [`FilterSelection::to_query`]. Price bounds
//! are kept as the text the user typed; the gateway does the numeric work,
//! including any `min <= max` check.

use std::fmt;
use std::str::FromStr;

/// Category options offered by the catalog filter panel.
pub const CATEGORIES: [&str; 5] = ["Rings", "Necklaces", "Bracelets", "Earrings", "Watches"];

/// Brand options offered by the catalog filter panel.
pub const BRANDS: [&str; 5] = ["Cartier", "Tiffany", "Pandora", "Swarovski", "Other"];

/// Color options offered by the catalog filter panel.
pub const COLORS: [&str; 5] = ["Gold", "Silver", "Rose Gold", "White Gold", "Platinum"];

/// A field of the filter selection, in query order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterField {
    #[default]
    Category,
    MinPrice,
    MaxPrice,
    Brand,
    Color,
}

impl FilterField {
    /// All fields in the order they are serialized and displayed.
    pub const ALL: [FilterField; 5] = [
        Self::Category,
        Self::MinPrice,
        Self::MaxPrice,
        Self::Brand,
        Self::Color,
    ];

    /// Returns the query parameter name expected by the gateway.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::MinPrice => "minPrice",
            Self::MaxPrice => "maxPrice",
            Self::Brand => "brand",
            Self::Color => "color",
        }
    }

    /// Returns a human-readable label for the filter panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::MinPrice => "Min Price ($)",
            Self::MaxPrice => "Max Price ($)",
            Self::Brand => "Brand",
            Self::Color => "Color",
        }
    }

    /// Returns whether the field holds free-form price text.
    pub fn is_price(self) -> bool {
        matches!(self, Self::MinPrice | Self::MaxPrice)
    }

    /// Returns the fixed option list of a select field, or `None` for prices.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Category => Some(&CATEGORIES),
            Self::Brand => Some(&BRANDS),
            Self::Color => Some(&COLORS),
            Self::MinPrice | Self::MaxPrice => None,
        }
    }

    /// Next field in display order, wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Previous field in display order, wrapping around.
    pub fn previous(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FilterField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The client-held set of product search criteria.
///
/// Every field is a string; an empty string means "unset".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    category: String,
    min_price: String,
    max_price: String,
    brand: String,
    color: String,
}

impl FilterSelection {
    /// Returns a selection with every field unset.
    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }

    /// Updates one field in place and returns whether the value was accepted.
    ///
    /// Price fields only accept an empty string or digits with at most one
    /// decimal point; anything else leaves the field unchanged. Other fields
    /// accept any string.
    pub fn set_field(&mut self, field: FilterField, value: &str) -> bool {
        if field.is_price() && !is_price_text(value) {
            return false;
        }
        *self.slot_mut(field) = value.to_string();
        true
    }

    /// Returns the current value of a field (empty when unset).
    #[must_use]
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Category => &self.category,
            FilterField::MinPrice => &self.min_price,
            FilterField::MaxPrice => &self.max_price,
            FilterField::Brand => &self.brand,
            FilterField::Color => &self.color,
        }
    }

    /// Returns whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Serializes the set fields into ordered `(key, value)` query pairs.
    ///
    /// Unset fields are omitted entirely. Keys appear in the order
    /// category, minPrice, maxPrice, brand, color.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        FilterField::ALL
            .into_iter()
            .filter(|f| !self.get(*f).is_empty())
            .map(|f| (f.as_str(), self.get(f).to_string()))
            .collect()
    }

    /// Steps a select field to the next (or previous) option.
    ///
    /// The cycle is "unset" followed by the field's options. A current value
    /// outside the option list restarts the cycle at "unset". Price fields
    /// are left untouched.
    pub fn cycle_option(&mut self, field: FilterField, forward: bool) {
        let Some(options) = field.options() else {
            return;
        };
        let current = self.get(field);
        // Position 0 is "unset", options occupy 1..=len.
        let pos = options
            .iter()
            .position(|o| *o == current)
            .map_or(0, |i| i + 1);
        let len = options.len() + 1;
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        let value = if next == 0 { "" } else { options[next - 1] };
        self.set_field(field, value);
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Category => &mut self.category,
            FilterField::MinPrice => &mut self.min_price,
            FilterField::MaxPrice => &mut self.max_price,
            FilterField::Brand => &mut self.brand,
            FilterField::Color => &mut self.color,
        }
    }
}

/// Matches `^\d*\.?\d*$`: ASCII digits with at most one decimal point.
fn is_price_text(value: &str) -> bool {
    let mut seen_point = false;
    value.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_point => {
            seen_point = true;
            true
        }
        _ => false,
    })
}
