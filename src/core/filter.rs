// WasteDesk - core/filter.rs
//
// Composable filter engine, generic over the record type.
// Each view declares its filters as a `FilterSet<R>`; the current
// selections live in a `FilterState`. All active filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::util::constants;
use crate::util::error::FilterError;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Accessor returning one text field of a record.
pub type TextField<R> = fn(&R) -> &str;

/// Accessor returning one numeric field of a record.
pub type NumberField<R> = fn(&R) -> f64;

// =============================================================================
// Values
// =============================================================================

/// Inclusive numeric range. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Returns true if `value` lies within both bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Parse `>=N`, `<=N`, `N..M`, `N..`, `..M`, or a bare `N` (exactly N).
    ///
    /// The error is a short reason suitable for embedding in `FilterError`.
    pub fn parse(input: &str) -> Result<Self, &'static str> {
        let input = input.trim();
        if input.is_empty() {
            return Err("range is empty");
        }

        let range = if let Some(rest) = input.strip_prefix(">=") {
            Self::at_least(parse_bound(rest)?)
        } else if let Some(rest) = input.strip_prefix("<=") {
            Self::at_most(parse_bound(rest)?)
        } else if input.starts_with('>') || input.starts_with('<') {
            return Err("bounds are inclusive; use >= or <=");
        } else if let Some((lo, hi)) = input.split_once("..") {
            let min = if lo.trim().is_empty() {
                None
            } else {
                Some(parse_bound(lo)?)
            };
            let max = if hi.trim().is_empty() {
                None
            } else {
                Some(parse_bound(hi)?)
            };
            if min.is_none() && max.is_none() {
                return Err("range needs at least one bound");
            }
            Self { min, max }
        } else {
            let exact = parse_bound(input)?;
            Self::between(exact, exact)
        };

        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                return Err("lower bound exceeds upper bound");
            }
        }
        Ok(range)
    }
}

fn parse_bound(raw: &str) -> Result<f64, &'static str> {
    let value: f64 = raw.trim().parse().map_err(|_| "bound is not a number")?;
    if !value.is_finite() {
        return Err("bound must be finite");
    }
    Ok(value)
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "{min}"),
            (Some(min), Some(max)) => write!(f, "{min}..{max}"),
            (Some(min), None) => write!(f, ">={min}"),
            (None, Some(max)) => write!(f, "<={max}"),
            (None, None) => f.write_str(".."),
        }
    }
}

/// The selected value of one filter.
///
/// `Any` is the "no filter" sentinel: the filter contributes no constraint.
#[derive(Debug, Clone, Default)]
pub enum FilterValue {
    #[default]
    Any,
    /// Case-insensitive substring.
    Text(String),
    /// Enum token, compared case-insensitively.
    Token(String),
    Range(NumericRange),
    Pattern(Regex),
}

impl FilterValue {
    /// Returns true if this value places no constraint on records.
    pub fn is_any(&self) -> bool {
        match self {
            Self::Any => true,
            Self::Text(text) | Self::Token(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Text(text) => write!(f, "\"{text}\""),
            Self::Token(token) => f.write_str(token),
            Self::Range(range) => write!(f, "{range}"),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

// =============================================================================
// Definitions
// =============================================================================

/// How a filter inspects a record.
pub enum FilterKind<R: 'static> {
    /// Case-insensitive substring match on any of the fields.
    Search(&'static [TextField<R>]),

    /// Token equality on one field. An empty option list accepts any token.
    Choice {
        field: TextField<R>,
        options: &'static [&'static str],
    },

    /// Inclusive numeric range membership.
    Range(NumberField<R>),

    /// Regex match on any of the fields.
    Pattern(&'static [TextField<R>]),
}

impl<R: 'static> FilterKind<R> {
    /// Short description of the value this kind expects.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Search(_) => "text",
            Self::Choice { .. } => "choice",
            Self::Range(_) => "range",
            Self::Pattern(_) => "regex",
        }
    }
}

/// One named filter a view offers.
pub struct FilterDef<R: 'static> {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FilterKind<R>,
}

impl<R: 'static> FilterDef<R> {
    pub fn search(
        name: &'static str,
        label: &'static str,
        fields: &'static [TextField<R>],
    ) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Search(fields),
        }
    }

    pub fn choice(
        name: &'static str,
        label: &'static str,
        field: TextField<R>,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Choice { field, options },
        }
    }

    pub fn range(name: &'static str, label: &'static str, field: NumberField<R>) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Range(field),
        }
    }

    pub fn pattern(
        name: &'static str,
        label: &'static str,
        fields: &'static [TextField<R>],
    ) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Pattern(fields),
        }
    }

    /// Option tokens for choice filters (empty for free-form or other kinds).
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FilterKind::Choice { options, .. } => options,
            _ => &[],
        }
    }

    /// Returns true if `value` is a sensible selection for this filter.
    pub fn accepts(&self, value: &FilterValue) -> bool {
        matches!(
            (&self.kind, value),
            (_, FilterValue::Any)
                | (FilterKind::Search(_), FilterValue::Text(_))
                | (FilterKind::Choice { .. }, FilterValue::Token(_))
                | (FilterKind::Range(_), FilterValue::Range(_))
                | (FilterKind::Pattern(_), FilterValue::Pattern(_))
        )
    }

    /// Turn raw user input into a value for this filter.
    ///
    /// Empty input or `*` means "no constraint" for every kind; choice
    /// filters additionally accept `all`.
    pub fn parse(&self, raw: &str) -> Result<FilterValue, FilterError> {
        let raw = raw.trim();
        if constants::ANY_FILTER_TOKENS.contains(&raw) {
            return Ok(FilterValue::Any);
        }

        match &self.kind {
            FilterKind::Search(_) => Ok(FilterValue::Text(raw.to_string())),
            FilterKind::Choice { options, .. } => {
                let token = raw.to_lowercase();
                if token == constants::ALL_CHOICE_TOKEN {
                    return Ok(FilterValue::Any);
                }
                if !options.is_empty() && !options.contains(&token.as_str()) {
                    return Err(FilterError::UnknownOption {
                        filter: self.name.to_string(),
                        value: raw.to_string(),
                        options,
                    });
                }
                Ok(FilterValue::Token(token))
            }
            FilterKind::Range(_) => NumericRange::parse(raw)
                .map(FilterValue::Range)
                .map_err(|reason| FilterError::InvalidRange {
                    filter: self.name.to_string(),
                    input: raw.to_string(),
                    reason,
                }),
            FilterKind::Pattern(_) => {
                if raw.len() > constants::MAX_REGEX_PATTERN_LENGTH {
                    return Err(FilterError::PatternTooLong {
                        length: raw.len(),
                        max_length: constants::MAX_REGEX_PATTERN_LENGTH,
                    });
                }
                let regex = Regex::new(raw).map_err(|e| FilterError::InvalidRegex {
                    pattern: raw.to_string(),
                    source: e,
                })?;
                Ok(FilterValue::Pattern(regex))
            }
        }
    }
}

/// The ordered list of filters a view offers over records of type `R`.
pub struct FilterSet<R: 'static> {
    view: &'static str,
    defs: Vec<FilterDef<R>>,
}

impl<R: 'static> FilterSet<R> {
    pub fn new(view: &'static str, defs: Vec<FilterDef<R>>) -> Self {
        Self { view, defs }
    }

    /// Plural name of the records this set filters (e.g. "zones").
    pub fn view(&self) -> &'static str {
        self.view
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDef<R>> {
        self.defs.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.defs.iter().map(|d| d.name).collect()
    }

    /// Look up a filter by name (case-insensitive).
    pub fn lookup(&self, name: &str) -> Result<&FilterDef<R>, FilterError> {
        self.defs
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| FilterError::UnknownFilter {
                view: self.view,
                name: name.to_string(),
                available: self.names(),
            })
    }
}

// =============================================================================
// State
// =============================================================================

/// Current filter selections, keyed by filter name.
///
/// A name that is absent has no constraint. Storing `FilterValue::Any`
/// removes the entry so `active_count` only counts real constraints.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    values: BTreeMap<&'static str, FilterValue>,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.values.len()
    }

    /// The active value for `name`, or `None` when unconstrained.
    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &'static str, value: FilterValue) {
        if value.is_any() {
            self.values.remove(name);
        } else {
            self.values.insert(name, value);
        }
    }

    /// Drop one filter. Returns true if it was active.
    pub fn clear(&mut self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    /// Restore every filter to "no constraint".
    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FilterValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}

// =============================================================================
// Application
// =============================================================================

/// A filter value prepared once per `apply_filters` call.
enum Prepared<'a> {
    Needle(String),
    Token(String),
    Range(NumericRange),
    Pattern(&'a Regex),
}

struct ActiveFilter<'a, R: 'static> {
    def: &'a FilterDef<R>,
    prepared: Prepared<'a>,
}

impl<'a, R: 'static> ActiveFilter<'a, R> {
    fn prepare(def: &'a FilterDef<R>, value: &'a FilterValue) -> Option<Self> {
        let prepared = match (&def.kind, value) {
            (_, FilterValue::Any) => return None,
            (FilterKind::Search(_), FilterValue::Text(text)) => Prepared::Needle(text.to_lowercase()),
            (FilterKind::Choice { .. }, FilterValue::Token(token)) => {
                Prepared::Token(token.to_lowercase())
            }
            (FilterKind::Range(_), FilterValue::Range(range)) => Prepared::Range(*range),
            (FilterKind::Pattern(_), FilterValue::Pattern(regex)) => Prepared::Pattern(regex),
            _ => {
                tracing::warn!(
                    filter = def.name,
                    expected = def.kind.describe(),
                    value = %value,
                    "Filter value does not fit filter kind; ignoring"
                );
                return None;
            }
        };
        Some(Self { def, prepared })
    }

    fn matches(&self, record: &R) -> bool {
        match (&self.def.kind, &self.prepared) {
            (FilterKind::Search(fields), Prepared::Needle(needle)) => fields
                .iter()
                .any(|field| field(record).to_lowercase().contains(needle.as_str())),
            (FilterKind::Choice { field, .. }, Prepared::Token(token)) => {
                field(record).to_lowercase() == *token
            }
            (FilterKind::Range(field), Prepared::Range(range)) => range.contains(field(record)),
            (FilterKind::Pattern(fields), Prepared::Pattern(regex)) => {
                fields.iter().any(|field| regex.is_match(field(record)))
            }
            _ => true,
        }
    }
}

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Indices are ascending, so the relative order of the input is preserved.
/// The input is never modified; an empty result is valid.
pub fn apply_filters<R: 'static>(records: &[R], filters: &FilterSet<R>, state: &FilterState) -> Vec<usize> {
    let active: Vec<ActiveFilter<'_, R>> = filters
        .iter()
        .filter_map(|def| {
            state
                .get(def.name)
                .and_then(|value| ActiveFilter::prepare(def, value))
        })
        .collect();

    if active.is_empty() {
        return (0..records.len()).collect();
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| active.iter().all(|f| f.matches(record)))
        .map(|(idx, _)| idx)
        .collect()
}

/// Like `apply_filters`, but yields references to the matching records.
pub fn filter_records<'a, R: 'static>(
    records: &'a [R],
    filters: &FilterSet<R>,
    state: &FilterState,
) -> Vec<&'a R> {
    apply_filters(records, filters, state)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}
