use clap::Subcommand;
use sawm_core::catalog::{preset_locations, search_locations};
use sawm_core::{qibla_bearing, Language, Location, ValidationError};
use serde::Serialize;

use crate::app::{print_events, print_json, App, CliResult};

#[derive(Subcommand)]
pub enum LocationAction {
    /// Set the active location, by preset name or explicit coordinates
    Set {
        name: String,
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
    },
    /// List preset locations, optionally filtered
    List {
        query: Option<String>,
    },
    /// Print the active location
    Show,
}

/// Exact (case-insensitive) preset name, else a unique substring match.
fn resolve_preset(name: &str) -> Result<Location, ValidationError> {
    let exact = preset_locations()
        .into_iter()
        .find(|loc| loc.name.eq_ignore_ascii_case(name));
    if let Some(loc) = exact {
        return Ok(loc);
    }
    let mut matches = search_locations(name);
    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(ValidationError::InvalidValue {
            field: "location".into(),
            message: format!("no preset matches '{name}'; pass --lat and --lon"),
        }),
        n => Err(ValidationError::InvalidValue {
            field: "location".into(),
            message: format!("'{name}' matches {n} presets"),
        }),
    }
}

pub fn run(action: LocationAction) -> CliResult {
    match action {
        LocationAction::Set { name, lat, lon } => {
            let location = match (lat, lon) {
                (Some(lat), Some(lon)) => Location::new(name, lat, lon),
                _ => resolve_preset(&name)?,
            };
            let mut app = App::open()?;
            let event = app.store.set_location(location)?;
            print_events(&[event])?;
        }
        LocationAction::List { query } => {
            let locations = search_locations(query.as_deref().unwrap_or(""));
            print_json(&locations)?;
        }
        LocationAction::Show => {
            let app = App::open()?;
            print_json(&app.store.get().location)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Qibla {
    location: String,
    /// Degrees clockwise from true north.
    bearing: f64,
    text: String,
}

pub fn qibla() -> CliResult {
    let app = App::open()?;
    let state = app.store.get();
    let bearing = qibla_bearing(&state.location);
    let degrees = bearing.round();
    let text = match state.language {
        Language::English => format!("Qibla Direction: {degrees}° from North"),
        Language::Bengali => format!("কিবলার দিক: {degrees}°"),
    };
    print_json(&Qibla {
        location: state.location.name.clone(),
        bearing,
        text,
    })
}

pub fn language(code: &str) -> CliResult {
    let language = Language::from_code(code).ok_or_else(|| ValidationError::InvalidValue {
        field: "language".into(),
        message: format!("'{code}' is not one of: en, bn"),
    })?;
    let mut app = App::open()?;
    let event = app.store.set_language(language)?;
    print_events(&[event])
}
