//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror command `*Args` but are populated from clap;
//! `from_matches()` extractors pull the relevant fields, and `Into<*Args>`
//! impls bridge dispatch → command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::r#gen::GenArgs;

pub struct GenParams {
    pub inputs: Vec<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub runtime_path: Option<String>,
    pub color: ColorChoice,
}

impl GenParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            inputs: m
                .get_many::<PathBuf>("inputs")
                .map(|v| v.cloned().collect())
                .unwrap_or_default(),
            out_dir: m.get_one::<PathBuf>("out_dir").cloned(),
            dry_run: m.get_flag("dry_run"),
            runtime_path: m.get_one::<String>("runtime_path").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<GenParams> for GenArgs {
    fn from(p: GenParams) -> Self {
        Self {
            inputs: p.inputs,
            out_dir: p.out_dir,
            dry_run: p.dry_run,
            runtime_path: p.runtime_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub inputs: Vec<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            inputs: m
                .get_many::<PathBuf>("inputs")
                .map(|v| v.cloned().collect())
                .unwrap_or_default(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            inputs: p.inputs,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
