//! Static utility lookup table.
//!
//! Each state carries an ordered list of `(city key, provider)` pairs, an
//! optional `default` entry and an ordered fallback list. City keys are
//! matched as substrings of the lowercased place name, in declared order, so
//! the order in which entries are added is part of the table's contract.
//!
//! The data is a practical best guess, not an authoritative territory map.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::Provider;

/// Reserved city key that sets a state's default entry.
pub const DEFAULT_KEY: &str = "default";

/// Per-state section of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUtilities {
    cities: Vec<(String, Provider)>,
    default: Option<Provider>,
    fallbacks: Vec<Provider>,
}

impl StateUtilities {
    /// Create an empty state section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city entry. The key is lowercased; the reserved key `default`
    /// sets the state default instead of adding a city.
    pub fn city(mut self, key: &str, provider: Provider) -> Self {
        let key = key.trim().to_lowercase();
        if key == DEFAULT_KEY {
            self.default = Some(provider);
        } else if !key.is_empty() {
            self.cities.push((key, provider));
        }
        self
    }

    /// Set the state default entry.
    pub fn default_provider(mut self, provider: Provider) -> Self {
        self.default = Some(provider);
        self
    }

    /// Append to the state-level fallback list.
    pub fn fallback(mut self, provider: Provider) -> Self {
        self.fallbacks.push(provider);
        self
    }

    /// City entries in declared order.
    pub fn cities(&self) -> &[(String, Provider)] {
        &self.cities
    }

    /// The `default` entry, if any.
    pub fn default_entry(&self) -> Option<&Provider> {
        self.default.as_ref()
    }

    /// State-level fallback list in declared order.
    pub fn fallbacks(&self) -> &[Provider] {
        &self.fallbacks
    }
}

/// Immutable mapping from state abbreviation to its utilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtilityTable {
    states: HashMap<String, StateUtilities>,
}

impl UtilityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a state section.
    pub fn state(mut self, abbr: &str, utilities: StateUtilities) -> Self {
        self.states.insert(abbr.trim().to_uppercase(), utilities);
        self
    }

    /// Look up a state section by its exact abbreviation.
    pub fn get(&self, abbr: &str) -> Option<&StateUtilities> {
        self.states.get(abbr)
    }

    /// Number of states covered.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State abbreviations, sorted.
    pub fn state_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.states.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// The built-in table, constructed on first use and shared for the life
    /// of the process.
    pub fn builtin() -> &'static UtilityTable {
        &BUILTIN
    }
}

static BUILTIN: Lazy<UtilityTable> = Lazy::new(build_builtin);

fn p(electric: &str, gas: &str) -> Provider {
    Provider::new(electric, gas)
}

fn build_builtin() -> UtilityTable {
    UtilityTable::new()
        .state(
            "OH",
            StateUtilities::new()
                .city("cleveland", p("The Illuminating Company (FirstEnergy)", "Enbridge Gas Ohio"))
                .city("akron", p("Ohio Edison (FirstEnergy)", "Enbridge Gas Ohio"))
                .city("toledo", p("Toledo Edison (FirstEnergy)", "Columbia Gas of Ohio"))
                .city("columbus", p("AEP Ohio", "Columbia Gas of Ohio"))
                .city("cincinnati", p("Duke Energy Ohio", "Duke Energy Ohio"))
                .city("dayton", p("DP&L (AES Ohio)", "CenterPoint Energy Ohio"))
                .city(
                    "youngstown",
                    p("FirstEnergy (Ohio Edison/Penn Power area)", "Enbridge Gas Ohio"),
                )
                .city(DEFAULT_KEY, p("Ohio Edison (FirstEnergy)", "Columbia Gas of Ohio"))
                .fallback(p("Ohio Edison (FirstEnergy)", "Columbia Gas of Ohio"))
                .fallback(p("AEP Ohio", "Columbia Gas of Ohio"))
                .fallback(p("Duke Energy Ohio", "Duke Energy Ohio"))
                .fallback(p("Toledo Edison", "Columbia Gas of Ohio"))
                .fallback(p("The Illuminating Company", "Enbridge Gas Ohio")),
        )
        .state(
            "PA",
            StateUtilities::new()
                .city("philadelphia", p("PECO Energy", "Philadelphia Gas Works"))
                .city("pittsburgh", p("Duquesne Light Company", "Peoples Natural Gas"))
                .city("allentown", p("PPL Electric Utilities", "UGI Utilities"))
                .city("harrisburg", p("PPL / Hershey area (PPL)", "UGI Utilities"))
                .city("erie", p("Penelec / FirstEnergy", "National Fuel Gas"))
                .city("reading", p("PPL / Met-Ed area (PPL/FirstEnergy)", "UGI Utilities"))
                .city("wilkes-barre", p("FirstEnergy (Penelec)", "UGI Utilities"))
                .fallback(p("PECO Energy", "Columbia Gas of PA"))
                .fallback(p("PPL Electric Utilities", "UGI Utilities"))
                .fallback(p("Duquesne Light", "Peoples Natural Gas"))
                .fallback(p("Columbia Gas of PA", "Columbia Gas of PA"))
                .fallback(p("UGI", "UGI Utilities")),
        )
        .state(
            "NJ",
            StateUtilities::new()
                .city("newark", p("PSE&G", "PSE&G"))
                .city("jersey city", p("PSE&G", "PSE&G"))
                .city(
                    "trenton",
                    p("PSE&G / Atlantic City Electric depending on area", "PSE&G"),
                )
                .city("atlantic city", p("Atlantic City Electric", "South Jersey Gas"))
                .city("toms river", p("JCP&L", "New Jersey Natural Gas"))
                .fallback(p("PSE&G", "PSE&G"))
                .fallback(p("JCP&L", "New Jersey Natural Gas"))
                .fallback(p("Atlantic City Electric", "South Jersey Gas")),
        )
        .state(
            "CA",
            StateUtilities::new()
                .city("los angeles", p("Southern California Edison", "SoCalGas"))
                .city("san francisco", p("Pacific Gas & Electric (PG&E)", "Pacific Gas & Electric (PG&E)"))
                .city("san diego", p("San Diego Gas & Electric (SDG&E)", "San Diego Gas & Electric (SDG&E)"))
                .city("san jose", p("Pacific Gas & Electric (PG&E)", "Pacific Gas & Electric (PG&E)"))
                .city("fresno", p("Pacific Gas & Electric (PG&E)", "Pacific Gas & Electric (PG&E)"))
                .fallback(p("Pacific Gas & Electric (PG&E)", "Pacific Gas & Electric (PG&E)"))
                .fallback(p("Southern California Edison", "SoCalGas"))
                .fallback(p("SDG&E", "SDG&E")),
        )
        .state(
            "NY",
            StateUtilities::new()
                // "new york mills" must stay ahead of "new york".
                .city("new york mills", p("National Grid", "National Grid"))
                .city("new york", p("Con Edison", "Con Edison"))
                .city("brooklyn", p("Con Edison", "National Grid"))
                .city("buffalo", p("National Grid", "National Fuel Gas"))
                .city("rochester", p("NYSEG / RG&E (RG&E)", "RG&E"))
                .city("syracuse", p("National Grid / NYSEG", "National Grid"))
                .fallback(p("Con Edison", "Con Edison"))
                .fallback(p("National Grid", "National Grid"))
                .fallback(p("NYSEG", "NYSEG"))
                .fallback(p("RG&E", "RG&E")),
        )
        .state(
            "DE",
            StateUtilities::new()
                .city(DEFAULT_KEY, p("Delmarva Power", "Delmarva Power"))
                .fallback(p("Delmarva Power", "Delmarva Power")),
        )
        .state(
            "MI",
            StateUtilities::new()
                .city("detroit", p("DTE Energy", "DTE Gas"))
                .city("grand rapids", p("Consumers Energy", "DTE Gas"))
                .city("lansing", p("Consumers Energy", "Consumers Energy"))
                .city("flint", p("DTE Energy / Consumers area (depends)", "Consumers Energy"))
                .fallback(p("DTE Energy", "DTE Gas"))
                .fallback(p("Consumers Energy", "Consumers Energy")),
        )
        .state(
            "RI",
            StateUtilities::new()
                .city(DEFAULT_KEY, p("Rhode Island Energy", "Rhode Island Energy"))
                .fallback(p("Rhode Island Energy", "Rhode Island Energy")),
        )
}
