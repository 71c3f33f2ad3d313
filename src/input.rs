//! Sample loading: file resolution and decoding.
//!
//! A JSON input is one array of samples, or one sample per line with
//! `--ndjson`. A YAML input is one sequence of samples.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

/// Samples decoded from one file, in file order.
#[derive(Debug)]
pub enum Samples {
    Json(Vec<serde_json::Value>),
    Yaml(Vec<serde_yaml::Value>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::Json(xs) => xs.len(),
            Samples::Yaml(xs) => xs.len(),
        }
    }
}

/// Deserialize JSON with the failing path in the error message.
pub fn json_from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

/// Deserialize YAML with the failing path in the error message.
pub fn yaml_from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = serde_yaml::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at YAML path {path} → {}", err.into_inner())
    })
}

pub fn load_file(path: &Path, format: Format, ndjson: bool) -> Result<Samples> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    let samples = decode(&source, format, ndjson)
        .with_context(|| format!("failed to parse source file {}", path.display()))?;
    debug!(path = %path.display(), samples = samples.len(), "loaded samples");
    Ok(samples)
}

pub fn decode(source: &str, format: Format, ndjson: bool) -> Result<Samples> {
    match (format, ndjson) {
        (Format::Json, false) => Ok(Samples::Json(json_from_str_with_path(source)?)),
        (Format::Json, true) => {
            let mut out = Vec::new();
            for (n, line) in source.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let value = json_from_str_with_path(line).with_context(|| format!("line {}", n + 1))?;
                out.push(value);
            }
            Ok(Samples::Json(out))
        }
        (Format::Yaml, false) => Ok(Samples::Yaml(yaml_from_str_with_path(source)?)),
        (Format::Yaml, true) => bail!("--ndjson only applies to JSON input"),
    }
}

/// Expand glob patterns; anything without glob characters is a literal path.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}
