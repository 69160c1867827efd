//! Resolving the parameter snapshot from a parameter file and flags.

use std::path::{Path, PathBuf};

use tinta_core::{FilterParams, ParamId, ParamRange};

/// Read a JSON parameter file. Missing fields are zero; unknown fields are
/// rejected so that typos do not silently become the identity.
pub fn load_params(path: &Path) -> Result<FilterParams, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Layer explicit per-parameter overrides on top of `base`, optionally
/// snapping every value to the slider range.
pub fn resolve_params(
    base: FilterParams,
    overrides: &[(ParamId, Option<f32>)],
    snap: bool,
) -> FilterParams {
    let mut params = base;
    for &(id, value) in overrides {
        if let Some(value) = value {
            params.set(id, value);
        }
    }

    if snap {
        for &id in ParamId::all() {
            params.set(id, ParamRange::SLIDER.snap(params.get(id)));
        }
    } else {
        for id in params.out_of_range() {
            tracing::warn!(
                "{id} = {} is outside [-1, 1]; the adjustment will extrapolate",
                params.get(id)
            );
        }
    }
    params
}

/// Errors reading a parameter file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read parameter file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid parameter file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let base = FilterParams {
            brightness: 0.1,
            contrast: 0.2,
            ..Default::default()
        };
        let params = resolve_params(
            base,
            &[
                (ParamId::Brightness, None),
                (ParamId::Contrast, Some(-0.5)),
                (ParamId::Sharpness, Some(0.3)),
            ],
            false,
        );
        assert_eq!(params.brightness, 0.1);
        assert_eq!(params.contrast, -0.5);
        assert_eq!(params.sharpness, 0.3);
    }

    #[test]
    fn test_out_of_range_kept_without_snap() {
        let params = resolve_params(
            FilterParams::default(),
            &[(ParamId::Temperature, Some(2.5))],
            false,
        );
        assert_eq!(params.temperature, 2.5);
    }

    #[test]
    fn test_snap_applies_slider_range() {
        let params = resolve_params(
            FilterParams::default(),
            &[
                (ParamId::Temperature, Some(2.5)),
                (ParamId::Saturation, Some(0.337)),
            ],
            true,
        );
        assert!((params.temperature - 1.0).abs() < EPSILON);
        assert!((params.saturation - 0.34).abs() < EPSILON);
    }

    #[test]
    fn test_load_params_reports_path_on_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "brightnes": 0.2 }"#).unwrap();
        let err = load_params(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_load_params_reads_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.json");
        fs::write(&path, r#"{ "saturation": -1.0, "sharpness": 0.5 }"#).unwrap();
        let params = load_params(&path).unwrap();
        assert_eq!(params.saturation, -1.0);
        assert_eq!(params.sharpness, 0.5);
        assert_eq!(params.brightness, 0.0);
    }

    #[test]
    fn test_load_params_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_params(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
