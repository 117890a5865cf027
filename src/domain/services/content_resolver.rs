//! Seed-driven scenario text
//!
//! The theme and all five themed fields are always drawn, in a fixed order,
//! from a fresh content RNG. Caller and existing-card values are applied on
//! top afterwards, so which fields a caller overrides never shifts the draws
//! of the others.

use serde::Serialize;

use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    non_blank, pick, ContentOverrides, Objectives, ScenarioContent, Seed, Theme,
    DEFAULT_INITIAL_PRIORITY,
};

/// Text fields a seed produces on its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedPreview {
    pub seed: Seed,
    pub theme: Theme,
    pub armies: String,
    pub deployment: String,
    pub layout: String,
    pub objectives: String,
    pub initial_priority: String,
}

/// Draw the themed fields for a seed
pub fn preview_seed(seed: Seed) -> SeedPreview {
    let mut rng = seed.content_rng();
    let theme = Theme::draw(&mut rng);
    let catalog = theme.catalog();
    // Draw order is part of the reproducibility contract
    let armies = pick(&mut rng, &catalog.armies);
    let deployment = pick(&mut rng, &catalog.deployment);
    let layout = pick(&mut rng, &catalog.layout);
    let objectives = pick(&mut rng, &catalog.objectives);
    let initial_priority = pick(&mut rng, &catalog.initial_priority);

    SeedPreview {
        seed,
        theme,
        armies: armies.to_string(),
        deployment: deployment.to_string(),
        layout: layout.to_string(),
        objectives: objectives.to_string(),
        initial_priority: initial_priority.to_string(),
    }
}

/// Resolve the full content of a card.
///
/// Each field takes the caller's non-blank value, then the existing card's
/// non-blank value, then the seed's themed draw.
pub fn resolve_content(
    seed: Seed,
    overrides: &ContentOverrides,
    existing: Option<&ScenarioContent>,
) -> DomainResult<ScenarioContent> {
    overrides.validate()?;
    let drawn = preview_seed(seed);

    let armies = pick_text(overrides.armies.as_deref(), existing.map(|c| c.armies.as_str()), drawn.armies);
    let deployment = pick_text(
        overrides.deployment.as_deref(),
        existing.map(|c| c.deployment.as_str()),
        drawn.deployment,
    );
    let layout = pick_text(overrides.layout.as_deref(), existing.map(|c| c.layout.as_str()), drawn.layout);
    let objectives = overrides
        .objectives
        .as_ref()
        .filter(|o| !o.is_blank())
        .or_else(|| existing.map(|c| &c.objectives).filter(|o| !o.is_blank()))
        .cloned()
        .unwrap_or(Objectives::Text(drawn.objectives));
    let initial_priority = pick_text(
        overrides.initial_priority.as_deref(),
        existing.map(|c| c.initial_priority.as_str()),
        drawn.initial_priority,
    );
    let initial_priority = non_blank(Some(initial_priority.as_str()))
        .unwrap_or(DEFAULT_INITIAL_PRIORITY)
        .to_string();

    let name = non_blank(overrides.name.as_deref())
        .or_else(|| existing.and_then(|c| non_blank(Some(c.name.as_str()))))
        .map(str::to_string)
        .unwrap_or_else(|| ScenarioContent::default_name(&layout, &deployment));

    // An explicit list replaces the rules, even when empty
    let special_rules = match (&overrides.special_rules, existing) {
        (Some(rules), _) => rules.clone(),
        (None, Some(card)) => card.special_rules.clone(),
        (None, None) => Vec::new(),
    };

    Ok(ScenarioContent {
        name,
        armies,
        deployment,
        layout,
        objectives,
        initial_priority,
        special_rules,
    })
}

fn pick_text(requested: Option<&str>, existing: Option<&str>, drawn: String) -> String {
    non_blank(requested)
        .or_else(|| non_blank(existing))
        .map(str::to_string)
        .unwrap_or(drawn)
}
