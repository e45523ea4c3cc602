pub mod defaults;

use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use t3ps::core::dihedrals::numbering::ReferenceNumbering;
use t3ps::core::dihedrals::table::DihedralTable;
use t3ps::engine::highlight::HighlightPalette;
use t3ps::workflows::measure::{MeasureConfig, MeasureConfigBuilder};
use tracing::{debug, info};

const MAX_PRECISION: usize = 12;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSelectionConfig {
    palette: Option<HighlightPalette>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialNumberingConfig {
    scheme: Option<String>,
    offset: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDihedralsConfig {
    table: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    precision: Option<usize>,
}

/// Settings read from `--config`. Every field is optional; command-line
/// flags win over the file, and [`DefaultsConfig`] fills whatever is left.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    selection: Option<PartialSelectionConfig>,
    numbering: Option<PartialNumberingConfig>,
    dihedrals: Option<PartialDihedralsConfig>,
    output: Option<PartialOutputConfig>,
    /// Directory of the file the config came from; relative table paths
    /// resolve against it.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Flags that may override the config file.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub numbering: Option<&'a str>,
    pub table: Option<&'a Path>,
    pub precision: Option<usize>,
}

/// Fully resolved settings handed to a command.
#[derive(Debug)]
pub struct AppConfig {
    pub measure: MeasureConfig,
    pub precision: usize,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            CliError::Config(msg) => CliError::FileParsing {
                path: path.to_path_buf(),
                source: anyhow::anyhow!(msg),
            },
            other => other,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Reads `path` if given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(self, overrides: &CliOverrides) -> Result<AppConfig> {
        let defaults = DefaultsConfig::default();

        let numbering = match overrides.numbering {
            Some(scheme) => parse_scheme(scheme, None, &defaults)?,
            None => match &self.numbering {
                Some(PartialNumberingConfig {
                    scheme: Some(scheme),
                    offset,
                }) => parse_scheme(scheme, *offset, &defaults)?,
                Some(PartialNumberingConfig {
                    scheme: None,
                    offset: Some(offset),
                }) => ReferenceNumbering::Offset(*offset),
                _ => defaults.numbering,
            },
        };

        let table_path = match overrides.table {
            Some(path) => Some(path.to_path_buf()),
            None => self
                .dihedrals
                .as_ref()
                .and_then(|d| d.table.as_ref())
                .map(|p| self.resolve_relative(p)),
        };
        let table = match table_path {
            Some(path) => {
                info!("Loading dihedral table from {:?}", path);
                DihedralTable::load(&path)?
            }
            None => DihedralTable::builtin(),
        };

        let precision = overrides
            .precision
            .or(self.output.as_ref().and_then(|o| o.precision))
            .unwrap_or(defaults.precision);
        if precision > MAX_PRECISION {
            return Err(CliError::Config(format!(
                "Output precision {} exceeds the maximum of {}.",
                precision, MAX_PRECISION
            )));
        }

        let palette = self
            .selection
            .and_then(|s| s.palette)
            .unwrap_or_default();

        debug!(?numbering, precision, "Configuration resolved");
        Ok(AppConfig {
            measure: MeasureConfigBuilder::new()
                .table(table)
                .numbering(numbering)
                .palette(palette)
                .build(),
            precision,
        })
    }

    fn resolve_relative(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn parse_scheme(
    scheme: &str,
    offset: Option<usize>,
    defaults: &DefaultsConfig,
) -> Result<ReferenceNumbering> {
    let parsed: ReferenceNumbering = scheme.parse().map_err(|_| {
        CliError::Argument(format!(
            "Unknown numbering scheme '{}'. Expected identity, offset, offset:N or atom-name.",
            scheme
        ))
    })?;
    match (parsed, offset) {
        (ReferenceNumbering::Offset(_), Some(offset)) => Ok(ReferenceNumbering::Offset(offset)),
        (ReferenceNumbering::Offset(n), None) if scheme.trim().contains(':') => {
            Ok(ReferenceNumbering::Offset(n))
        }
        (ReferenceNumbering::Offset(_), None) => Ok(ReferenceNumbering::Offset(defaults.offset)),
        (_, Some(_)) => Err(CliError::Config(format!(
            "'offset' only applies to the offset scheme, not '{}'.",
            scheme
        ))),
        (other, None) => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use t3ps::core::dihedrals::table::TableLoadError;

    fn resolve(toml: &str, overrides: &CliOverrides) -> Result<AppConfig> {
        PartialConfig::from_toml_str(toml)?.merge_with_cli(overrides)
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = resolve("", &CliOverrides::default()).unwrap();
        assert_eq!(config.precision, 2);
        assert_eq!(config.measure.numbering, ReferenceNumbering::Identity);
        assert_eq!(config.measure.table, DihedralTable::builtin());
        assert_eq!(config.measure.palette, HighlightPalette::default());
    }

    #[test]
    fn file_values_are_applied() {
        let toml = r##"
            [selection]
            palette = ["#000000", "#111111", "#222222", "#333333"]
            [numbering]
            scheme = "offset"
            offset = 5
            [output]
            precision = 4
        "##;
        let config = resolve(toml, &CliOverrides::default()).unwrap();
        assert_eq!(config.precision, 4);
        assert_eq!(config.measure.numbering, ReferenceNumbering::Offset(5));
        assert_eq!(config.measure.palette.color(3), Some("#333333"));
    }

    #[test]
    fn offset_scheme_without_value_defaults_to_one() {
        let config = resolve("[numbering]\nscheme = \"offset\"", &CliOverrides::default()).unwrap();
        assert_eq!(config.measure.numbering, ReferenceNumbering::Offset(1));
    }

    #[test]
    fn cli_flags_override_file() {
        let toml = "[numbering]\nscheme = \"offset\"\n[output]\nprecision = 4";
        let overrides = CliOverrides {
            numbering: Some("atom-name"),
            precision: Some(1),
            ..Default::default()
        };
        let config = resolve(toml, &overrides).unwrap();
        assert_eq!(config.precision, 1);
        assert_eq!(config.measure.numbering, ReferenceNumbering::AtomName);
    }

    #[test]
    fn explicit_offset_on_the_command_line_is_kept() {
        let overrides = CliOverrides {
            numbering: Some("offset:3"),
            ..Default::default()
        };
        let config = resolve("", &overrides).unwrap();
        assert_eq!(config.measure.numbering, ReferenceNumbering::Offset(3));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            PartialConfig::from_toml_str("[output]\ncolour = true"),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn bad_scheme_and_misplaced_offset_are_errors() {
        assert!(matches!(
            resolve("[numbering]\nscheme = \"sideways\"", &CliOverrides::default()),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            resolve(
                "[numbering]\nscheme = \"identity\"\noffset = 2",
                &CliOverrides::default()
            ),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn excessive_precision_is_rejected() {
        let overrides = CliOverrides {
            precision: Some(40),
            ..Default::default()
        };
        assert!(matches!(resolve("", &overrides), Err(CliError::Config(_))));
    }

    #[test]
    fn table_path_resolves_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let short_table = r#"
            [[backbone]]
            name = "t1"
            atoms = [0, 1, 2, 3]
            description = "custom torsion"
        "#;
        std::fs::write(dir.path().join("short-table.toml"), short_table).unwrap();

        let config_path = dir.path().join("t3ps.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "[dihedrals]\ntable = \"short-table.toml\"").unwrap();

        let partial = PartialConfig::from_file(&config_path).unwrap();
        let err = partial.merge_with_cli(&CliOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Table(TableLoadError::Toml(_))
        ));
    }

    #[test]
    fn missing_table_file_is_a_table_error() {
        let overrides = CliOverrides {
            table: Some(Path::new("/definitely/not/here.toml")),
            ..Default::default()
        };
        assert!(matches!(resolve("", &overrides), Err(CliError::Table(_))));
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[output\nprecision = 2").unwrap();
        match PartialConfig::from_file(&path) {
            Err(CliError::FileParsing { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
