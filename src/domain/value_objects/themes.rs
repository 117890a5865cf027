//! Themed text catalog used to fill in scenario content from a seed
//!
//! Each theme carries five entries for every content field. Draws are made
//! with the content RNG of a seed, so a seed always picks the same theme and
//! the same entries.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Entries a theme offers for one content field
pub type ThemeEntries = [&'static str; 5];

/// Text catalog of a single theme
#[derive(Debug, Clone, Copy)]
pub struct ThemeCatalog {
    pub armies: ThemeEntries,
    pub deployment: ThemeEntries,
    pub layout: ThemeEntries,
    pub objectives: ThemeEntries,
    pub initial_priority: ThemeEntries,
}

/// Setting a generated scenario draws its flavor text from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Shire,
    Rohan,
    Gondor,
    MinasTirith,
    Osgiliath,
    HelmsDeep,
    Isengard,
    Mordor,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Shire,
        Theme::Rohan,
        Theme::Gondor,
        Theme::MinasTirith,
        Theme::Osgiliath,
        Theme::HelmsDeep,
        Theme::Isengard,
        Theme::Mordor,
    ];

    /// Pick a theme uniformly
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Theme {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn catalog(&self) -> &'static ThemeCatalog {
        match self {
            Theme::Shire => &SHIRE,
            Theme::Rohan => &ROHAN,
            Theme::Gondor => &GONDOR,
            Theme::MinasTirith => &MINAS_TIRITH,
            Theme::Osgiliath => &OSGILIATH,
            Theme::HelmsDeep => &HELMS_DEEP,
            Theme::Isengard => &ISENGARD,
            Theme::Mordor => &MORDOR,
        }
    }
}

/// Pick one entry uniformly
pub fn pick<R: Rng + ?Sized>(rng: &mut R, entries: &[&'static str]) -> &'static str {
    entries.choose(rng).copied().unwrap_or_default()
}

// ============================================================================
// Shape descriptions
// ============================================================================

pub const DEPLOYMENT_DESCRIPTIONS: [&str; 4] = [
    "Vanguard deployment",
    "Flanking position",
    "Defensive line",
    "Staging ground",
];

pub const OBJECTIVE_DESCRIPTIONS: [&str; 10] = [
    "Strategic high ground",
    "Supply cache",
    "Ancient relic",
    "Key crossing",
    "Fortified position",
    "Signal beacon",
    "Sacred ground",
    "Prisoner camp",
    "Resource node",
    "Rally point",
];

pub const SOLID_SCENOGRAPHY_DESCRIPTIONS: [&str; 6] = [
    "Dense woodland",
    "Ruined building",
    "Rocky outcrop",
    "Stone wall",
    "Fortified tower",
    "Boulder field",
];

pub const PASSABLE_SCENOGRAPHY_DESCRIPTIONS: [&str; 6] = [
    "Shallow marsh",
    "Light scrubland",
    "Rough ground",
    "Tall grass",
    "River ford",
    "Sandy dunes",
];

// ============================================================================
// Theme catalogs
// ============================================================================

static SHIRE: ThemeCatalog = ThemeCatalog {
    armies: ["Shire Militia", "Bounders", "Hobbit Archers", "Bywater Wardens", "Green Hills Patrol"],
    deployment: ["Quiet patrol", "Sudden ambush", "Guard the homestead", "Hold the hedgerow", "Skirmish at the green"],
    layout: ["Bywater Lanes", "Green Hillstead", "Hedge Maze", "Market Day", "Old Windmill"],
    objectives: ["Protect the village", "Rescue the locals", "Secure the storehouse", "Hold the green", "Escort the messenger"],
    initial_priority: ["Secure the lanes", "Protect the homesteads", "Hold the market square", "Keep the militia safe", "Delay the attackers"],
};

static ROHAN: ThemeCatalog = ThemeCatalog {
    armies: ["Riders of Rohan", "Westfold Militia", "Royal Guard", "Eastfold Riders", "Helm Guard"],
    deployment: ["Cavalry sweep", "Hold the ridgeline", "Flank charge", "Shieldwall", "Rearguard stand"],
    layout: ["Westfold Plain", "Riders Camp", "Windy Ridge", "Fords of Isen", "Eastfold Track"],
    objectives: ["Break the line", "Hold the ford", "Secure the hill", "Rescue the standard", "Drive back the raiders"],
    initial_priority: ["Control the ridgeline", "Protect the cavalry", "Hold the ford", "Delay the enemy", "Secure the camp"],
};

static GONDOR: ThemeCatalog = ThemeCatalog {
    armies: ["Gondor Line", "Osgiliath Veterans", "Ithilien Rangers", "Citadel Guard", "Pelargir Guard"],
    deployment: ["Hold the ruins", "Shieldwall", "Guard the bridge", "Counterattack", "Defensive line"],
    layout: ["Ruins of Osgiliath", "River Crossing", "Broken Causeway", "Gatehouse", "White City Outskirts"],
    objectives: ["Hold the bridge", "Secure the causeway", "Protect the standard", "Relieve the garrison", "Push the line forward"],
    initial_priority: ["Hold the bridge", "Protect the garrison", "Secure the ruins", "Control the riverbank", "Retake the plaza"],
};

static MINAS_TIRITH: ThemeCatalog = ThemeCatalog {
    armies: ["Tower Guard", "Citadel Guard", "Gondor Reinforcements", "White City Watch", "Fountain Court"],
    deployment: ["Hold the gate", "Inner wall defense", "Countercharge", "Hold the courtyard", "Last stand"],
    layout: ["White City Courtyard", "Gatehouse Steps", "Upper Circle", "Tower Square", "Citadel Terrace"],
    objectives: ["Defend the gate", "Protect the citadel", "Hold the stairs", "Rescue the captain", "Secure the courtyard"],
    initial_priority: ["Hold the gate", "Protect the banner", "Secure the tower", "Delay the assault", "Hold the upper circle"],
};

static OSGILIATH: ThemeCatalog = ThemeCatalog {
    armies: ["Gondor Veterans", "Rangers of Ithilien", "Mordor Raiders", "City Guard", "Bridge Defenders"],
    deployment: ["Ruin to ruin", "River crossing", "Hold the bridge", "Skirmish line", "Flank assault"],
    layout: ["Eastern Ruins", "Broken Bridge", "Sunken Plaza", "Fallen Tower", "Riverbank"],
    objectives: ["Hold the crossing", "Secure the ruins", "Rescue the wounded", "Control the plaza", "Push across the river"],
    initial_priority: ["Hold the crossing", "Secure the ruins", "Control the riverbank", "Retake the bridge", "Break the enemy line"],
};

static HELMS_DEEP: ThemeCatalog = ThemeCatalog {
    armies: ["Rohan Defenders", "Westfold Militia", "Isengard Assault", "Wall Guard", "Fortress Reserve"],
    deployment: ["Hold the wall", "Relief force", "Storm the gate", "Sally forth", "Last stand"],
    layout: ["Deeping Wall", "Hornburg Courtyard", "Gatehouse", "Culvert", "Causeway"],
    objectives: ["Defend the wall", "Hold the gate", "Break the siege", "Rescue the defenders", "Secure the courtyard"],
    initial_priority: ["Hold the wall", "Protect the gate", "Secure the culvert", "Delay the assault", "Hold the courtyard"],
};

static ISENGARD: ThemeCatalog = ThemeCatalog {
    armies: ["Uruk-hai Host", "Isengard Raiders", "Dunland Allies", "White Hand Guard", "Siege Crew"],
    deployment: ["Pike advance", "Siege line", "Flank assault", "Night raid", "Drive the breach"],
    layout: ["Orthanc Ring", "Warg Pens", "Forge Yard", "Industrial Ditch", "Broken Causeway"],
    objectives: ["Break the gate", "Hold the yard", "Secure the forge", "Capture the banner", "Drive the defenders"],
    initial_priority: ["Take the yard", "Hold the forge", "Break the wall", "Secure the breach", "Drive the line"],
};

static MORDOR: ThemeCatalog = ThemeCatalog {
    armies: ["Mordor Host", "Orc Warband", "Black Gate Guard", "Morannon Orcs", "Harad Allies"],
    deployment: ["Dark assault", "Encirclement", "Wave attack", "Hold the pass", "Breach the line"],
    layout: ["Black Gate Approach", "Ash Plains", "Broken Watchtower", "Lava Fields", "Wasted Ground"],
    objectives: ["Crush the enemy", "Hold the pass", "Seize the banner", "Burn the outpost", "Secure the ridge"],
    initial_priority: ["Hold the pass", "Break the line", "Secure the ridge", "Drive the assault", "Capture the outpost"],
};
