//! Encode a workout file into a hash

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use lubba_encoder::{
    ENCODING_VERSION, Workout, encode_workout, exceeds_url_limit, parse_workout_json,
    parse_workout_yaml, to_hash,
};

#[derive(Args)]
pub struct EncodeArgs {
    /// Workout file (.yaml, .yml or .json)
    pub input: PathBuf,

    /// Version tag written as the first byte
    #[arg(long, default_value_t = ENCODING_VERSION)]
    pub encoding_version: u8,

    /// Escape '/' as %2F for use in a URL
    #[arg(short, long)]
    pub url_safe: bool,

    /// Print the encoded bytes (comma separated) instead of the hash
    #[arg(long)]
    pub bytes: bool,
}

/// Encode and print
pub fn execute(args: EncodeArgs) -> Result<()> {
    println!("{}", encode_file(&args)?);
    Ok(())
}

/// Encode the input file, returning the text to print
pub fn encode_file(args: &EncodeArgs) -> Result<String> {
    tracing::debug!("Encoding {:?}", args.input);

    let workout = load_workout(&args.input)?;
    let data = encode_workout(&workout, args.encoding_version)
        .with_context(|| format!("Failed to encode workout: {}", args.input.display()))?;

    if args.bytes {
        let bytes: Vec<String> = data.iter().map(u8::to_string).collect();
        return Ok(bytes.join(","));
    }

    let hash = to_hash(&data, args.url_safe);
    tracing::info!("{} bytes -> {} character hash", data.len(), hash.len());
    exceeds_url_limit(&hash);

    Ok(hash)
}

/// Load a workout, choosing the parser by file extension
pub fn load_workout(path: &Path) -> Result<Workout> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read workout file: {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let workout = match ext.as_str() {
        "yaml" | "yml" => parse_workout_yaml(&content),
        "json" => parse_workout_json(&content),
        _ => anyhow::bail!(
            "Unsupported workout format: {} (use .yaml, .yml, or .json)",
            path.display()
        ),
    };

    workout.with_context(|| format!("Failed to parse workout file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const YAML: &str = "isMetric: true\ntitle: A\nactivityType: 37\nlocationType: 3\nparts:\n- title: Warmup\n";

    fn args(input: PathBuf) -> EncodeArgs {
        EncodeArgs {
            input,
            encoding_version: ENCODING_VERSION,
            url_safe: false,
            bytes: false,
        }
    }

    #[test]
    fn test_encode_yaml_file_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workout.yaml");
        fs::write(&path, YAML).unwrap();

        let mut args = args(path);
        args.bytes = true;
        assert_eq!(encode_file(&args).unwrap(), "1,1,1,65,37,0,0,0,3,1,1,0,1");
    }

    #[test]
    fn test_encode_json_file_hash() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workout.JSON");
        fs::write(
            &path,
            r#"{"isMetric":true,"title":"A","activityType":37,"locationType":3,"parts":[{"title":"Warmup"}]}"#,
        )
        .unwrap();

        let hash = encode_file(&args(path)).unwrap();
        assert_eq!(
            lubba_encoder::from_hash(&hash).unwrap(),
            [1, 1, 1, 65, 37, 0, 0, 0, 3, 1, 1, 0, 1]
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workout.toml");
        fs::write(&path, YAML).unwrap();

        let err = load_workout(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported workout format"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_workout(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read workout file"));
    }

    #[test]
    fn test_unknown_symbol_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workout.yml");
        fs::write(&path, format!("{YAML}  layout: 9+9\n")).unwrap();

        let err = encode_file(&args(path)).unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown layout symbol"));
    }
}
