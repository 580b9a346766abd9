//! Usage text generation for the flag registry.
//!
//! Every flag is listed with its value placeholder, usage text, the
//! environment variable that also sets it, and its default.

use owo_colors::OwoColorize;

use crate::layers::cli::{Flag, FlagSet};

/// Configuration for usage text generation.
#[derive(Debug, Clone, Default)]
pub struct HelpConfig {
    /// Program name (defaults to the executable name).
    pub program_name: Option<String>,
    /// Description shown above the usage line.
    pub description: Option<String>,
    /// Whether to emit ANSI colors.
    pub color: bool,
}

/// Generate usage text for a set of flags.
pub fn generate_usage(flags: &FlagSet, config: &HelpConfig) -> String {
    let mut out = String::new();

    let program_name = config
        .program_name
        .clone()
        .or_else(program_name_from_args)
        .unwrap_or_else(|| "program".to_string());

    if let Some(desc) = &config.description {
        out.push_str(desc.trim_end());
        out.push_str("\n\n");
    }

    out.push_str(&format!("{}:\n    ", heading("USAGE", config.color)));
    out.push_str(&program_name);
    if !flags.is_empty() {
        out.push_str(" [OPTIONS]");
    }
    out.push('\n');

    if flags.is_empty() {
        return out;
    }

    out.push_str(&format!("\n{}:\n", heading("OPTIONS", config.color)));
    for flag in flags.iter() {
        write_flag_help(&mut out, flag, config.color);
    }

    out
}

fn program_name_from_args() -> Option<String> {
    let arg0 = std::env::args().next()?;
    let name = camino::Utf8Path::new(&arg0)
        .file_name()
        .map(str::to_string)
        .unwrap_or(arg0);
    Some(name)
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.yellow().bold().to_string()
    } else {
        text.to_string()
    }
}

fn write_flag_help(out: &mut String, flag: &Flag, color: bool) {
    out.push_str("    ");

    let name = format!("-{}", flag.name());
    if color {
        out.push_str(&name.green().to_string());
    } else {
        out.push_str(&name);
    }

    if let Some(placeholder) = flag.kind().placeholder() {
        out.push_str(&format!(" <{placeholder}>"));
    }

    if !flag.usage_text().is_empty() {
        out.push_str("\n            ");
        out.push_str(flag.usage_text().trim());
    }

    let mut tags = Vec::new();
    if let Some(env) = flag.env() {
        tags.push(format!("[env: {env}]"));
    }
    if let Some(default) = flag.default() {
        tags.push(format!("[default: {default}]"));
    }
    if flag.is_mandatory() {
        tags.push("[required]".to_string());
    }
    if !tags.is_empty() {
        out.push_str("\n            ");
        out.push_str(&tags.join(" "));
    }

    out.push('\n');
}
