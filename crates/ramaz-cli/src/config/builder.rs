use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use ramaz::engine::config::{ArtifactConfig, RamaZConfigBuilder};
use std::path::PathBuf;
use std::str::FromStr;

pub fn build_config(args: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let reference_dir = args
        .reference_dir
        .clone()
        .or(file_config.reference_dir.take())
        .ok_or_else(|| {
            CliError::Config(
                "A value for 'reference-dir' is required either in the config file or via CLI argument."
                    .to_string(),
            )
        })?;
    let secondary_structure = args
        .secondary_structure
        .or(file_config.secondary_structure)
        .unwrap_or(defaults.secondary_structure);

    let output_file = file_config.output.take().unwrap_or_default();
    let directory = args
        .output_dir
        .clone()
        .or(output_file.directory)
        .unwrap_or(defaults.output_directory);
    let overwrite = args.overwrite || output_file.overwrite.unwrap_or(defaults.overwrite);
    let serial = args.serial.or(output_file.serial);
    let plot_dpi = args
        .plot_dpi
        .or(output_file.plot_dpi)
        .unwrap_or(defaults.plot_dpi);

    let artifacts_file = file_config.artifacts.take().unwrap_or_default();
    let artifact_defaults = defaults.artifacts;
    let artifacts = ArtifactConfig {
        write_hsl_models: args.write_hsl_models
            || artifacts_file
                .write_hsl_models
                .unwrap_or(artifact_defaults.write_hsl_models),
        write_hsl_plot: args.write_hsl_plot
            || artifacts_file
                .write_hsl_plot
                .unwrap_or(artifact_defaults.write_hsl_plot),
        write_hsl_general_only: args
            .write_hsl_general_only
            .or(artifacts_file.write_hsl_general_only)
            .unwrap_or(artifact_defaults.write_hsl_general_only),
        write_whole_plot: args.write_whole_plot
            || artifacts_file
                .write_whole_plot
                .unwrap_or(artifact_defaults.write_whole_plot),
        write_whole_general_only: args
            .write_whole_general_only
            .or(artifacts_file.write_whole_general_only)
            .unwrap_or(artifact_defaults.write_whole_general_only),
    };

    let core_config = RamaZConfigBuilder::new()
        .artifacts(artifacts)
        .output_directory(directory)
        .overwrite(overwrite)
        .serial(serial)
        .plot_dpi(plot_dpi)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        inputs: args.inputs.clone(),
        reference_dir,
        secondary_structure,
        report_file: args.report_file.clone(),
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "reference-dir" => {
                config.reference_dir = Some(PathBuf::from(value_str));
            }
            "secondary-structure" => {
                config.secondary_structure = Some(parse_value(key, value_str, "source")?);
            }
            "output.directory" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .directory = Some(PathBuf::from(value_str));
            }
            "output.overwrite" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .overwrite = Some(parse_value(key, value_str, "boolean")?);
            }
            "output.serial" => {
                config.output.get_or_insert_with(Default::default).serial =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "output.plot-dpi" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .plot_dpi = Some(parse_value(key, value_str, "integer")?);
            }
            "artifacts.write-hsl-models" => {
                config
                    .artifacts
                    .get_or_insert_with(Default::default)
                    .write_hsl_models = Some(parse_value(key, value_str, "boolean")?);
            }
            "artifacts.write-hsl-plot" => {
                config
                    .artifacts
                    .get_or_insert_with(Default::default)
                    .write_hsl_plot = Some(parse_value(key, value_str, "boolean")?);
            }
            "artifacts.write-hsl-general-only" => {
                config
                    .artifacts
                    .get_or_insert_with(Default::default)
                    .write_hsl_general_only = Some(parse_value(key, value_str, "boolean")?);
            }
            "artifacts.write-whole-plot" => {
                config
                    .artifacts
                    .get_or_insert_with(Default::default)
                    .write_whole_plot = Some(parse_value(key, value_str, "boolean")?);
            }
            "artifacts.write-whole-general-only" => {
                config
                    .artifacts
                    .get_or_insert_with(Default::default)
                    .write_whole_general_only = Some(parse_value(key, value_str, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ramaz::core::secondary::classifier::SecondaryStructureSource;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("rama-z").chain(args.iter().copied()))
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("rama-z.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_fill_everything_but_the_reference() {
        let app = build_config(&parse(&["model.pdb", "-r", "ref"])).unwrap();

        assert_eq!(app.inputs, vec![PathBuf::from("model.pdb")]);
        assert_eq!(app.reference_dir, PathBuf::from("ref"));
        assert_eq!(app.secondary_structure, SecondaryStructureSource::Auto);
        assert_eq!(app.core_config.artifacts, ArtifactConfig::default());
        assert_eq!(app.core_config.output.directory, PathBuf::from("."));
        assert!(!app.core_config.output.overwrite);
        assert_eq!(app.core_config.output.serial, None);
        assert_eq!(app.core_config.output.plot_dpi, 300);
        assert!(app.report_file.is_none());
    }

    #[test]
    fn missing_reference_dir_is_a_config_error() {
        let result = build_config(&parse(&["model.pdb"]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("reference-dir")),
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn file_values_are_used_and_cli_flags_win() {
        let dir = tempdir().unwrap();
        let config_path = write_config(
            dir.path(),
            r#"
            reference-dir = "from-file"
            secondary-structure = "header"

            [output]
            directory = "plots"
            serial = 4
            plot-dpi = 72

            [artifacts]
            write-hsl-plot = true
            write-hsl-general-only = false
            "#,
        );

        let app = build_config(&parse(&[
            "-c",
            config_path.to_str().unwrap(),
            "--plot-dpi",
            "150",
            "--write-hsl-general-only",
            "true",
            "--secondary-structure",
            "dihedral",
        ]))
        .unwrap();

        assert_eq!(app.reference_dir, PathBuf::from("from-file"));
        assert_eq!(app.secondary_structure, SecondaryStructureSource::Dihedral);
        assert_eq!(app.core_config.output.directory, PathBuf::from("plots"));
        assert_eq!(app.core_config.output.serial, Some(4));
        assert_eq!(app.core_config.output.plot_dpi, 150);
        assert!(app.core_config.artifacts.write_hsl_plot);
        assert!(app.core_config.artifacts.write_hsl_general_only);
        assert!(!app.core_config.artifacts.write_whole_plot);
    }

    #[test]
    fn set_values_override_the_file() {
        let dir = tempdir().unwrap();
        let config_path = write_config(
            dir.path(),
            r#"
            reference-dir = "ref"
            [artifacts]
            write-whole-plot = false
            "#,
        );

        let app = build_config(&parse(&[
            "-c",
            config_path.to_str().unwrap(),
            "-S",
            "artifacts.write-whole-plot=true",
            "-S",
            "output.overwrite=true",
            "-S",
            "secondary-structure=dihedral",
        ]))
        .unwrap();

        assert!(app.core_config.artifacts.write_whole_plot);
        assert!(app.core_config.output.overwrite);
        assert_eq!(app.secondary_structure, SecondaryStructureSource::Dihedral);
    }

    #[test]
    fn malformed_or_unknown_set_values_are_rejected() {
        for set in [
            "output.plot-dpi",
            "output.plot-dpi=high",
            "artifacts.write-everything=true",
        ] {
            let result = build_config(&parse(&["-r", "ref", "-S", set]));
            assert!(matches!(result, Err(CliError::Config(_))), "{}", set);
        }
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let config_path = write_config(dir.path(), "reference-dir = \"ref\"\nthreads = 4\n");
        let result = build_config(&parse(&["-c", config_path.to_str().unwrap()]));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn out_of_range_dpi_is_a_config_error() {
        let result = build_config(&parse(&["-r", "ref", "--plot-dpi", "0"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
