//! Scenario configuration for the example programs.
//!
//! Every program runs with built-in defaults (the experimental parameters of
//! the Rb lab measurements). A JSON file passed as the first command-line
//! argument overrides them. The file is merged onto the scenario's defaults,
//! so missing fields keep their defaults at every level of nesting.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{ensure_non_negative, ensure_positive, SimbiResult};
use crate::types::{Species, Trap};

/// Trap frequencies in Hz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrapConfig {
    pub frequencies_hz: [f64; 3],
}

impl TrapConfig {
    pub fn trap(&self) -> SimbiResult<Trap> {
        let [fx, fy, fz] = self.frequencies_hz;
        Trap::from_hz(fx, fy, fz)
    }
}

impl Default for TrapConfig {
    fn default() -> Self {
        TrapConfig {
            frequencies_hz: [350.0, 300.0, 30.0],
        }
    }
}

/// Atomic species in atomic mass units and Bohr radii.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub mass_amu: f64,
    pub scattering_length_bohr: f64,
}

impl SpeciesConfig {
    pub fn species(&self) -> SimbiResult<Species> {
        Species::new(
            self.mass_amu * ATOMIC_MASS_UNIT,
            self.scattering_length_bohr * BOHR_RADIUS,
        )
    }
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        SpeciesConfig {
            mass_amu: 85.46,
            scattering_length_bohr: 100.0,
        }
    }
}

/// Coordinate grid, in units of the cloud size along each axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub extent: f64,
    pub points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            extent: 6.0,
            points: 101,
        }
    }
}

/// Where and what to write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub plots: bool,
    pub csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: PathBuf::from("./output"),
            plots: true,
            csv: false,
        }
    }
}

impl OutputConfig {
    fn with_directory(name: &str) -> Self {
        OutputConfig {
            directory: Path::new("./output").join(name),
            ..OutputConfig::default()
        }
    }

    /// Creates the output directory and returns the path of `file` inside it.
    pub fn path(&self, file: &str) -> SimbiResult<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        Ok(self.directory.join(file))
    }
}

/// Pure condensate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BecScenario {
    pub trap: TrapConfig,
    pub species: SpeciesConfig,
    pub atom_number: f64,
    /// Time of flight in s
    pub time_of_flight: f64,
    pub grid: GridConfig,
    pub output: OutputConfig,
}

impl Default for BecScenario {
    fn default() -> Self {
        BecScenario {
            trap: TrapConfig::default(),
            species: SpeciesConfig::default(),
            atom_number: 1e4,
            time_of_flight: 1e-3,
            grid: GridConfig {
                extent: 2.0,
                points: 101,
            },
            output: OutputConfig::with_directory("bec"),
        }
    }
}

impl BecScenario {
    pub fn validate(&self) -> SimbiResult<()> {
        ensure_non_negative("atom_number", self.atom_number)?;
        ensure_non_negative("time_of_flight", self.time_of_flight)?;
        ensure_positive("grid.extent", self.grid.extent)?;
        Ok(())
    }
}

/// Thermal cloud above the transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalScenario {
    pub trap: TrapConfig,
    pub species: SpeciesConfig,
    /// Temperature in K
    pub temperature: f64,
    /// Chemical potential in J, not positive
    pub chemical_potential: f64,
    pub time_of_flight: f64,
    pub grid: GridConfig,
    pub output: OutputConfig,
}

impl Default for ThermalScenario {
    fn default() -> Self {
        ThermalScenario {
            trap: TrapConfig::default(),
            species: SpeciesConfig::default(),
            temperature: 5e-6,
            chemical_potential: -5e-28,
            time_of_flight: 1e-3,
            grid: GridConfig::default(),
            output: OutputConfig::with_directory("thermal_cloud"),
        }
    }
}

impl ThermalScenario {
    pub fn validate(&self) -> SimbiResult<()> {
        ensure_positive("temperature", self.temperature)?;
        ensure_non_negative("time_of_flight", self.time_of_flight)?;
        ensure_positive("grid.extent", self.grid.extent)?;
        Ok(())
    }
}

/// Condensate and thermal cloud at a given μ and T.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BimodalScenario {
    pub trap: TrapConfig,
    pub species: SpeciesConfig,
    pub temperature: f64,
    /// Condensate chemical potential in J
    pub chemical_potential: f64,
    pub time_of_flight: f64,
    pub grid: GridConfig,
    pub output: OutputConfig,
}

impl Default for BimodalScenario {
    fn default() -> Self {
        BimodalScenario {
            trap: TrapConfig::default(),
            species: SpeciesConfig {
                scattering_length_bohr: 90.0,
                ..SpeciesConfig::default()
            },
            temperature: 200e-9,
            chemical_potential: 7e-31,
            time_of_flight: 1e-3,
            grid: GridConfig::default(),
            output: OutputConfig::with_directory("bimodal"),
        }
    }
}

impl BimodalScenario {
    pub fn validate(&self) -> SimbiResult<()> {
        ensure_positive("temperature", self.temperature)?;
        ensure_positive("chemical_potential", self.chemical_potential)?;
        ensure_non_negative("time_of_flight", self.time_of_flight)?;
        ensure_positive("grid.extent", self.grid.extent)?;
        Ok(())
    }
}

/// Bimodal cloud specified by its atom number and condensed fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureScenario {
    pub trap: TrapConfig,
    pub species: SpeciesConfig,
    pub total_atom_number: f64,
    pub condensed_fraction: f64,
    pub time_of_flight: f64,
    pub grid: GridConfig,
    pub output: OutputConfig,
}

impl Default for TemperatureScenario {
    fn default() -> Self {
        TemperatureScenario {
            trap: TrapConfig {
                frequencies_hz: [300.0, 30.0, 100.0],
            },
            species: SpeciesConfig {
                mass_amu: 85.4678,
                scattering_length_bohr: 90.0,
            },
            total_atom_number: 1e5,
            condensed_fraction: 0.005,
            time_of_flight: 1e-4,
            grid: GridConfig::default(),
            output: OutputConfig::with_directory("temp_mu"),
        }
    }
}

impl TemperatureScenario {
    pub fn validate(&self) -> SimbiResult<()> {
        ensure_positive("total_atom_number", self.total_atom_number)?;
        ensure_non_negative("time_of_flight", self.time_of_flight)?;
        ensure_positive("grid.extent", self.grid.extent)?;
        Ok(())
    }
}

/// Recursively overwrites `base` with the fields present in `overrides`.
fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, value) => *base = value,
    }
}

/// Parses a scenario from JSON text, filling every missing field from
/// `T::default()`.
///
/// # Arguments
///
/// * `text` - JSON object holding any subset of the scenario fields
///
/// # Returns
///
/// The default scenario with the given fields replaced.
pub fn parse<T: Serialize + DeserializeOwned + Default>(text: &str) -> SimbiResult<T> {
    let mut scenario = serde_json::to_value(T::default())?;
    merge(&mut scenario, serde_json::from_str(text)?);
    Ok(serde_json::from_value(scenario)?)
}

/// Reads a scenario from a JSON file.
pub fn load<T: Serialize + DeserializeOwned + Default>(path: &Path) -> SimbiResult<T> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Loads the scenario named by the first command-line argument, or the
/// defaults when there is none.
pub fn from_args<T: Serialize + DeserializeOwned + Default>() -> SimbiResult<T> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scenario from {}", path);
            load(Path::new(&path))
        }
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let scenario: BecScenario =
            parse(r#"{ "atom_number": 5000.0, "grid": { "extent": 3.0, "points": 41 } }"#).unwrap();
        assert_approx_eq!(scenario.atom_number, 5000.0, 1e-12);
        assert_eq!(scenario.grid.points, 41);
        assert_approx_eq!(scenario.time_of_flight, 1e-3, 1e-15);
        assert_eq!(scenario.output.directory, Path::new("./output/bec"));
    }

    #[test]
    fn test_partial_sections_keep_scenario_defaults() {
        let scenario: BecScenario = parse(r#"{ "grid": { "extent": 3.0 } }"#).unwrap();
        assert_approx_eq!(scenario.grid.extent, 3.0, 1e-12);
        assert_eq!(scenario.grid.points, 101);

        let scenario: TemperatureScenario =
            parse(r#"{ "species": { "scattering_length_bohr": 100.0 } }"#).unwrap();
        assert_approx_eq!(scenario.species.mass_amu, 85.4678, 1e-12);
        assert_approx_eq!(scenario.species.scattering_length_bohr, 100.0, 1e-12);
        assert_eq!(scenario.trap.frequencies_hz, [300.0, 30.0, 100.0]);
    }

    #[test]
    fn test_output_override_keeps_program_directory() {
        let scenario: BecScenario =
            parse(r#"{ "atom_number": 20000.0, "output": { "csv": true } }"#).unwrap();
        assert!(scenario.output.csv);
        assert!(scenario.output.plots);
        assert_eq!(scenario.output.directory, Path::new("./output/bec"));

        let scenario: BimodalScenario = parse(r#"{ "output": { "plots": false } }"#).unwrap();
        assert_eq!(scenario.output.directory, Path::new("./output/bimodal"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse::<ThermalScenario>(r#"{ "temperature": "hot" }"#).is_err());
        assert!(parse::<ThermalScenario>("not json").is_err());
    }

    #[test]
    fn test_species_units() {
        let species = SpeciesConfig::default().species().unwrap();
        assert_approx_eq!(species.atomic_mass / ATOMIC_MASS_UNIT, 85.46, 1e-10);
        assert_approx_eq!(species.scattering_length / BOHR_RADIUS, 100.0, 1e-10);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(BecScenario::default().validate().is_ok());
        assert!(ThermalScenario::default().validate().is_ok());
        assert!(BimodalScenario::default().validate().is_ok());
        assert!(TemperatureScenario::default().validate().is_ok());

        let bad = ThermalScenario {
            temperature: 0.0,
            ..ThermalScenario::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let path = std::env::temp_dir().join("simbi_thermal_scenario.json");
        let scenario = ThermalScenario {
            temperature: 1e-6,
            ..ThermalScenario::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&scenario).unwrap()).unwrap();
        let loaded: ThermalScenario = load(&path).unwrap();
        assert_approx_eq!(loaded.temperature, 1e-6, 1e-18);
        fs::remove_file(&path).ok();
    }
}
