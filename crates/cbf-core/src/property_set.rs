//! Ordered collection of property values keyed by kind.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::property::PropertyKind;
use crate::value::{PropertyValue, ScreenOrientation};

/// Property values grouped by kind, in insertion order.
///
/// A kind is either absent or holds at least one value; setting an empty list
/// removes it. Multiplicity is not enforced here: the codec reports a
/// single-valued kind holding several values as a multiplicity error, so the
/// full set of problems surfaces in one batch.
///
/// Equality ignores insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: IndexMap<PropertyKind, Vec<PropertyValue>>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, kind: PropertyKind, value: impl Into<PropertyValue>) -> Self {
        self.insert(kind, value);
        self
    }

    /// Append a value for `kind`.
    pub fn insert(&mut self, kind: PropertyKind, value: impl Into<PropertyValue>) {
        self.entries.entry(kind).or_default().push(value.into());
    }

    /// Replace all values for `kind`. An empty list removes the kind.
    pub fn set(&mut self, kind: PropertyKind, values: Vec<PropertyValue>) {
        if values.is_empty() {
            self.entries.shift_remove(&kind);
        } else {
            self.entries.insert(kind, values);
        }
    }

    pub fn remove(&mut self, kind: PropertyKind) -> Option<Vec<PropertyValue>> {
        self.entries.shift_remove(&kind)
    }

    pub fn get(&self, kind: PropertyKind) -> &[PropertyValue] {
        self.entries.get(&kind).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn first(&self, kind: PropertyKind) -> Option<&PropertyValue> {
        self.get(kind).first()
    }

    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyKind, &[PropertyValue])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn kinds(&self) -> impl Iterator<Item = PropertyKind> + '_ {
        self.entries.keys().copied()
    }

    /// Number of kinds present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of values across all kinds.
    pub fn value_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.text(PropertyKind::Name)
    }

    pub fn description(&self) -> Option<&str> {
        self.text(PropertyKind::Description)
    }

    pub fn authors(&self) -> Vec<&str> {
        self.texts(PropertyKind::Authors)
    }

    pub fn urls(&self) -> Vec<&str> {
        self.texts(PropertyKind::Urls)
    }

    pub fn cycles_per_frame(&self) -> Option<u32> {
        match self.first(PropertyKind::CyclesPerFrame) {
            Some(PropertyValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn release_date(&self) -> Option<DateTime<Utc>> {
        match self.first(PropertyKind::ReleaseDate) {
            Some(PropertyValue::Timestamp(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn screen_orientation(&self) -> Option<ScreenOrientation> {
        match self.first(PropertyKind::ScreenOrientation) {
            Some(PropertyValue::Orientation(o)) => Some(*o),
            _ => None,
        }
    }

    fn text(&self, kind: PropertyKind) -> Option<&str> {
        self.first(kind).and_then(PropertyValue::as_text)
    }

    fn texts(&self, kind: PropertyKind) -> Vec<&str> {
        self.get(kind)
            .iter()
            .filter_map(PropertyValue::as_text)
            .collect()
    }
}

impl FromIterator<(PropertyKind, PropertyValue)> for PropertySet {
    fn from_iter<T: IntoIterator<Item = (PropertyKind, PropertyValue)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (kind, value) in iter {
            set.insert(kind, value);
        }
        set
    }
}
