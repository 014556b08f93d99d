//! Name-driven type overrides applied after elimination.
//!
//! A column whose values look numeric can still be an identifier. Each rule
//! pairs a case-insensitive predicate over the column name with the type it
//! forces, and only fires when elimination selected the rule's `when` type.
//! Rules are evaluated in order and the first match wins.

use std::fmt;

use crate::field_type::FieldType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    Equals(String),
    Contains(String),
    EndsWith(String),
}

impl NamePattern {
    pub fn equals(value: &str) -> Self {
        NamePattern::Equals(value.to_lowercase())
    }

    pub fn contains(value: &str) -> Self {
        NamePattern::Contains(value.to_lowercase())
    }

    pub fn ends_with(value: &str) -> Self {
        NamePattern::EndsWith(value.to_lowercase())
    }

    pub fn matches(&self, column_name: &str) -> bool {
        let lowered = column_name.to_lowercase();
        match self {
            NamePattern::Equals(expected) => lowered == *expected,
            NamePattern::Contains(fragment) => lowered.contains(fragment.as_str()),
            NamePattern::EndsWith(suffix) => lowered.ends_with(suffix.as_str()),
        }
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePattern::Equals(value) => write!(f, "name = '{value}'"),
            NamePattern::Contains(value) => write!(f, "name contains '{value}'"),
            NamePattern::EndsWith(value) => write!(f, "name ends with '{value}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    pub pattern: NamePattern,
    pub when: FieldType,
    pub forced: FieldType,
}

impl OverrideRule {
    pub fn new(pattern: NamePattern, when: FieldType, forced: FieldType) -> Self {
        Self {
            pattern,
            when,
            forced,
        }
    }

    fn applies(&self, column_name: &str, selected: FieldType) -> bool {
        selected == self.when && self.pattern.matches(column_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRules {
    rules: Vec<OverrideRule>,
}

impl OverrideRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn push(&mut self, rule: OverrideRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// First rule matching `column_name` for the `selected` type.
    pub fn find(&self, column_name: &str, selected: FieldType) -> Option<&OverrideRule> {
        self.rules
            .iter()
            .find(|rule| rule.applies(column_name, selected))
    }

    pub fn apply(&self, column_name: &str, selected: FieldType) -> FieldType {
        self.find(column_name, selected)
            .map(|rule| rule.forced)
            .unwrap_or(selected)
    }
}

impl Default for OverrideRules {
    /// Zip codes and identifier columns stay textual even when every value
    /// is an integer.
    fn default() -> Self {
        let identifier = |pattern| OverrideRule::new(pattern, FieldType::Int, FieldType::Text);
        let mut rules = OverrideRules::empty();
        for zip in ["zip", "zipcode", "zip_code", "zip code"] {
            rules.push(identifier(NamePattern::contains(zip)));
        }
        rules
            .push(identifier(NamePattern::ends_with("_id")))
            .push(identifier(NamePattern::equals("geoid")))
            .push(identifier(NamePattern::equals("id")));
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_force_identifiers_to_text() {
        let rules = OverrideRules::default();
        for name in [
            "zip",
            "ZIP",
            "zipcode",
            "Zip_Code",
            "owner zip code",
            "parcel_id",
            "PARCEL_ID",
            "geoid",
            "GEOID",
            "id",
            "Id",
        ] {
            assert_eq!(rules.apply(name, FieldType::Int), FieldType::Text, "{name}");
        }
    }

    #[test]
    fn default_rules_only_touch_integers() {
        let rules = OverrideRules::default();
        assert_eq!(rules.apply("zip", FieldType::Float), FieldType::Float);
        assert_eq!(rules.apply("parcel_id", FieldType::Bool), FieldType::Bool);
        assert_eq!(rules.apply("geoid", FieldType::Date), FieldType::Date);
    }

    #[test]
    fn unrelated_names_keep_their_type() {
        let rules = OverrideRules::default();
        for name in ["count", "idx", "identifier", "geoid10", "paid"] {
            assert_eq!(rules.apply(name, FieldType::Int), FieldType::Int, "{name}");
        }
    }

    #[test]
    fn rules_are_extensible_and_ordered() {
        let mut rules = OverrideRules::empty();
        rules
            .push(OverrideRule::new(
                NamePattern::ends_with("_code"),
                FieldType::Int,
                FieldType::Text,
            ))
            .push(OverrideRule::new(
                NamePattern::contains("code"),
                FieldType::Int,
                FieldType::Float,
            ));
        assert_eq!(rules.apply("naics_code", FieldType::Int), FieldType::Text);
        assert_eq!(rules.apply("codes", FieldType::Int), FieldType::Float);
        let rule = rules.find("naics_code", FieldType::Int).unwrap();
        assert_eq!(rule.pattern.to_string(), "name ends with '_code'");
    }
}
