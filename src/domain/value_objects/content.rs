//! Scenario text content carried by a card

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Priority text used when nothing else provides one
pub const DEFAULT_INITIAL_PRIORITY: &str = "Check the rulebook rules for it";

/// Scenario objectives: free text, or a headline with victory point rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Objectives {
    Text(String),
    Structured {
        objective: String,
        #[serde(default)]
        victory_points: Vec<String>,
    },
}

impl Objectives {
    /// Whitespace-only text counts as absent
    pub fn is_blank(&self) -> bool {
        self.headline().trim().is_empty()
    }

    /// Headline objective text
    pub fn headline(&self) -> &str {
        match self {
            Objectives::Text(text) => text,
            Objectives::Structured { objective, .. } => objective,
        }
    }
}

/// Scenario-specific rule printed on the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Every special rule needs a non-blank name
pub fn validate_special_rules(rules: &[SpecialRule]) -> DomainResult<()> {
    for (i, rule) in rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "special_rules[{}].name cannot be empty",
                i
            )));
        }
    }
    Ok(())
}

/// Fully resolved text content of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioContent {
    pub name: String,
    pub armies: String,
    pub deployment: String,
    pub layout: String,
    pub objectives: Objectives,
    pub initial_priority: String,
    pub special_rules: Vec<SpecialRule>,
}

impl ScenarioContent {
    /// Name derived from the layout, then the deployment
    pub fn default_name(layout: &str, deployment: &str) -> String {
        if !layout.trim().is_empty() {
            format!("Battle for {}", layout.trim())
        } else if !deployment.trim().is_empty() {
            format!("Battle with {}", deployment.trim())
        } else {
            "Battle Scenario".to_string()
        }
    }
}

/// Caller-supplied content. Blank fields fall back to the existing card or the seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentOverrides {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub armies: Option<String>,
    #[serde(default)]
    pub deployment: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub objectives: Option<Objectives>,
    #[serde(default)]
    pub initial_priority: Option<String>,
    #[serde(default)]
    pub special_rules: Option<Vec<SpecialRule>>,
}

impl ContentOverrides {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(rules) = &self.special_rules {
            validate_special_rules(rules)?;
        }
        Ok(())
    }

    /// Non-blank overrides of the seeded text fields plus any special rules,
    /// for seed derivation
    pub fn seed_config(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut config = serde_json::Map::new();
        for (key, value) in [
            ("armies", &self.armies),
            ("deployment", &self.deployment),
            ("layout", &self.layout),
            ("initial_priority", &self.initial_priority),
        ] {
            if let Some(text) = non_blank(value.as_deref()) {
                config.insert(key.to_string(), serde_json::Value::String(text.to_string()));
            }
        }
        if let Some(objectives) = self.objectives.as_ref().filter(|o| !o.is_blank()) {
            config.insert(
                "objectives".to_string(),
                serde_json::to_value(objectives).unwrap_or(serde_json::Value::Null),
            );
        }
        if let Some(rules) = self.special_rules.as_ref().filter(|rules| !rules.is_empty()) {
            config.insert(
                "special_rules".to_string(),
                serde_json::to_value(rules).unwrap_or(serde_json::Value::Null),
            );
        }
        config
    }
}

/// Trimmed text, or `None` when absent or whitespace-only
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}
