//! Minimal CLI: samples → `export type Data = ...;`
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser};
use rayon::prelude::*;
use tracing::info;

use json_decl::inference::Inference;
use json_decl::render::{self, RenderOptions};

use crate::input::{self, Format, Samples};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a TypeScript type declaration from sample JSON (or YAML) values
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// more logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// input encoding
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// treat input as newline-delimited JSON (NDJSON), one sample per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each sample (e.g. /data/items/0/payload);
    /// samples where it does not resolve count as absent
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each sample; every output is a sample
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// name of the exported type
    #[arg(long, default_value = "Data")]
    type_name: String,

    /// spaces per nesting level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// output .ts file, overwritten if present (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn validate(&self) -> Result<()> {
        if self.format == Format::Yaml && (self.json_pointer.is_some() || self.jq_expr.is_some()) {
            bail!("--json-pointer and --jq-expr require JSON input");
        }
        Ok(())
    }

    /// Fold every sample of every input, in input order.
    fn load_process(&self, inf: &mut Inference) -> Result<()> {
        self.validate()?;
        let source_paths = input::resolve_file_path_patterns(&self.input)?;
        let batches = source_paths
            .par_iter()
            .map(|path| input::load_file(path, self.format, self.ndjson))
            .collect::<Result<Vec<_>>>()?;

        for batch in batches {
            match batch {
                Samples::Json(values) => match self.jq_expr.as_ref() {
                    None => {
                        for value in &values {
                            self.observe_json(inf, value)?;
                        }
                    }
                    Some(jq_expr) => {
                        crate::jq_exec::run_jaq_each(jq_expr, &values, |value| {
                            self.observe_json(inf, &value)
                        })?;
                    }
                },
                Samples::Yaml(values) => {
                    for value in &values {
                        inf.observe(value)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn observe_json(&self, inf: &mut Inference, value: &serde_json::Value) -> Result<()> {
        match self.json_pointer.as_deref() {
            None => inf.observe(value)?,
            Some(ptr) => match value.pointer(ptr) {
                Some(node) => inf.observe(node)?,
                None => inf.observe_missing()?,
            },
        }
        Ok(())
    }
}

impl OutputSettings {
    fn render_options(&self) -> RenderOptions {
        RenderOptions { type_name: self.type_name.clone(), indent: self.indent }
    }

    fn write(&self, source: &str) -> Result<()> {
        match self.out.as_ref() {
            Some(out) => {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(out, source)?;
                info!(path = %out.display(), "wrote declaration");
            }
            None => println!("{source}"),
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        // debug path
        if self.no_op {
            eprintln!("{self:#?}");
            return Ok(());
        }

        let mut inf = Inference::new();
        self.input_settings.load_process(&mut inf)?;
        let shape = inf.solve();
        info!(samples = inf.samples(), "inferred shape");

        let source = render::declaration(&shape, &self.output_settings.render_options());
        self.output_settings.write(&source)
    }
}
