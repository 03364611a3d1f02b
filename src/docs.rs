//! Documentation generator for option schemas
//!
//! Generates a markdown reference from `OptionSchema` metadata.

use crate::config::{OptionSchema, OptionSpec, OptionType};
use std::fmt::{self, Write};

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Whether to group by category
    pub group_by_category: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            group_by_category: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// List options in declaration order without category headers
    #[must_use]
    pub fn flat(mut self) -> Self {
        self.group_by_category = false;
        self
    }
}

/// Generate markdown documentation for a schema
#[must_use]
pub fn generate_docs(schema: &OptionSchema, config: DocsConfig) -> String {
    SchemaDocs {
        schema,
        config: &config,
    }
    .to_string()
}

/// Markdown rendering of a schema; formatter errors propagate instead of
/// being dropped
struct SchemaDocs<'a> {
    schema: &'a OptionSchema,
    config: &'a DocsConfig,
}

impl fmt::Display for SchemaDocs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.config.title.as_deref().unwrap_or("Options Reference");
        writeln!(f, "# {title}\n")?;

        if let Some(desc) = &self.config.description {
            writeln!(f, "{desc}\n")?;
        }

        if !self.config.group_by_category {
            f.write_str("## Options\n\n")?;
            for (key, spec) in self.schema.iter() {
                format_option(f, key, spec)?;
            }
            return Ok(());
        }

        let mut options: Vec<(&str, &OptionSpec)> = self.schema.iter().collect();
        // Stable sort keeps declaration order within a category
        options.sort_by(|(_, a), (_, b)| category_of(a).cmp(category_of(b)));

        let mut current_category: Option<&str> = None;
        for (key, spec) in options {
            let category = category_of(spec);
            if current_category != Some(category) {
                writeln!(f, "\n## {}\n", capitalize(category))?;
                current_category = Some(category);
            }
            format_option(f, key, spec)?;
        }
        Ok(())
    }
}

fn format_option(out: &mut impl Write, key: &str, spec: &OptionSpec) -> fmt::Result {
    writeln!(out, "### `{key}`\n")?;

    if let Some(desc) = &spec.description {
        writeln!(out, "{desc}\n")?;
    }

    out.write_str("| Property | Value |\n")?;
    out.write_str("|----------|-------|\n")?;
    writeln!(out, "| **Type** | {} |", format_type(spec.option_type))?;
    writeln!(out, "| **Default** | `{}` |\n", spec.default)?;

    if !spec.choices.is_empty() {
        out.write_str("**Allowed values:**\n\n")?;
        for choice in &spec.choices {
            match &choice.description {
                Some(desc) => writeln!(out, "- `\"{}\"` - {desc}", choice.value)?,
                None => writeln!(out, "- `\"{}\"`", choice.value)?,
            }
        }
        out.write_str("\n")?;
    }

    out.write_str("---\n\n")
}

fn category_of(spec: &OptionSpec) -> &str {
    spec.category.as_deref().unwrap_or("general")
}

fn format_type(t: OptionType) -> &'static str {
    match t {
        OptionType::Toggle => "Boolean",
        OptionType::Select => "Select",
        OptionType::List => "Ordered list (no duplicates)",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================
