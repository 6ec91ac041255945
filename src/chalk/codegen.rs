//! Renders the colour table into C++ source through a chain.
//!
//! Both source kinds follow the same pipeline: wrap the ordered colour list,
//! turn each colour into a text fragment, join the fragments, and write the
//! result as a side effect. The pipeline is written once against
//! [`Terminal`] and runs in either mode.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{ChalkError, Color};
use crate::chain::{Immediate, Terminal, Wrap};

const LOG_TARGET: &str = "chainwrap::chalk";

/// Which C++ source to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// One function declaration per line.
    Declarations,
    /// One function definition per colour.
    Definitions,
}

impl SourceKind {
    /// The text generated for a single colour.
    ///
    /// ```rust
    /// use chainwrap::chalk::{Color, SourceKind};
    ///
    /// assert_eq!(
    ///     SourceKind::Declarations.fragment(Color::Red),
    ///     "auto red (const std::string &str) -> std::string;"
    /// );
    /// ```
    pub fn fragment(self, color: Color) -> String {
        let name = color.name();
        match self {
            Self::Declarations => format!("auto {name} (const std::string &str) -> std::string;"),
            Self::Definitions => {
                let replace = color
                    .replacement()
                    .map(|replace| format!(", {}", string_literal(replace)))
                    .unwrap_or_default();
                format!(
                    "\nauto {name} (const std::string &str) -> std::string {{\n  return filterEmpty({}, {}, str{replace});\n}}\n",
                    string_literal(&color.open()),
                    string_literal(&color.close()),
                )
            }
        }
    }

    /// The text placed between fragments.
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Declarations => "\n",
            Self::Definitions => "",
        }
    }
}

// A double-quoted literal with control characters escaped as `\u00XX`, which
// is valid in both JSON and C++.
fn string_literal(text: &str) -> String {
    Value::from(text).to_string()
}

/// Runs the render pipeline over a handle of colours in either mode.
pub fn render<C>(colors: C, kind: SourceKind) -> Wrap<C, String>
where
    C: Terminal<Value = Vec<Color>>,
{
    colors
        .map(move |colors| {
            colors
                .into_iter()
                .map(|color| kind.fragment(color))
                .collect::<Vec<_>>()
        })
        .map(move |fragments| fragments.join(kind.separator()))
}

/// Generates one source file from the colour table.
///
/// # Examples
///
/// ```rust
/// use chainwrap::chalk::{Color, Generator, SourceKind};
///
/// let generator = Generator::new(SourceKind::Declarations, "chalk.inc")
///     .with_colors([Color::Red, Color::Green]);
/// assert_eq!(
///     generator.render(),
///     "auto red (const std::string &str) -> std::string;\n\
///      auto green (const std::string &str) -> std::string;"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    kind: SourceKind,
    output: PathBuf,
    colors: Vec<Color>,
}

impl Generator {
    /// Creates a generator for every colour, writing to `output`.
    pub fn new(kind: SourceKind, output: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            output: output.into(),
            colors: Color::ALL.to_vec(),
        }
    }

    /// Restricts generation to `colors`, in the given order.
    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// The kind of source this generator produces.
    pub const fn kind(&self) -> SourceKind {
        self.kind
    }

    /// The path the source is written to.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Renders the source without writing it.
    pub fn render(&self) -> String {
        render(Immediate::new(self.colors.clone()), self.kind).raw_value()
    }

    /// Renders the source and writes it to the output path.
    ///
    /// # Errors
    ///
    /// Returns [`ChalkError::Write`] if the file cannot be written.
    #[tracing::instrument(skip_all, fields(kind = ?self.kind))]
    pub fn generate(&self) -> Result<String, ChalkError> {
        let mut written = Ok(());
        let source = render(Immediate::new(self.colors.clone()), self.kind)
            .side_effect(|source| written = fs::write(&self.output, source))
            .raw_value();
        written.map_err(|error| ChalkError::write(&self.output, error))?;

        tracing::info!(
            target: LOG_TARGET,
            path = %self.output.display(),
            bytes = source.len(),
            "generated source"
        );
        Ok(source)
    }

    /// Renders and writes the source through a deferred chain.
    ///
    /// # Errors
    ///
    /// Returns [`ChalkError::Write`] if the file cannot be written.
    #[cfg(feature = "async")]
    #[tracing::instrument(skip_all, fields(kind = ?self.kind))]
    pub async fn generate_async(&self) -> Result<String, ChalkError> {
        let output = self.output.clone();
        let source = render(Immediate::new(self.colors.clone()).to_async(), self.kind)
            .try_and_then(move |source| async move {
                tracing::debug!(target: LOG_TARGET, path = %output.display(), "writing source");
                match tokio::fs::write(&output, &source).await {
                    Ok(()) => Ok(source),
                    Err(error) => Err(ChalkError::write(output, error)),
                }
            })
            .await?;

        tracing::info!(
            target: LOG_TARGET,
            path = %self.output.display(),
            bytes = source.len(),
            "generated source"
        );
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn declaration_fragment() {
        assert_eq!(
            SourceKind::Declarations.fragment(Color::BgRed),
            "auto bgRed (const std::string &str) -> std::string;"
        );
    }

    #[rstest]
    fn definition_fragment_without_replace() {
        assert_eq!(
            SourceKind::Definitions.fragment(Color::Red),
            "\nauto red (const std::string &str) -> std::string {\n  return filterEmpty(\"\\u001b[31m\", \"\\u001b[39m\", str);\n}\n"
        );
    }

    #[rstest]
    fn definition_fragment_with_replace() {
        assert_eq!(
            SourceKind::Definitions.fragment(Color::Bold),
            "\nauto bold (const std::string &str) -> std::string {\n  return filterEmpty(\"\\u001b[1m\", \"\\u001b[22m\", str, \"\\u001b[22m\\u001b[1m\");\n}\n"
        );
    }

    #[rstest]
    fn declarations_are_one_per_line_in_order() {
        let source = Generator::new(SourceKind::Declarations, "unused").render();
        let names: Vec<&str> = source
            .lines()
            .map(|line| line.split_whitespace().nth(1).unwrap_or_default())
            .collect();
        let expected: Vec<&str> = Color::ALL.iter().map(|color| color.name()).collect();
        assert_eq!(names, expected);
        assert!(!source.ends_with('\n'));
    }

    #[rstest]
    fn definitions_join_without_separator() {
        let source = Generator::new(SourceKind::Definitions, "unused")
            .with_colors([Color::Red, Color::Green])
            .render();
        let expected = format!(
            "{}{}",
            SourceKind::Definitions.fragment(Color::Red),
            SourceKind::Definitions.fragment(Color::Green)
        );
        assert_eq!(source, expected);
    }

    #[rstest]
    fn empty_color_list_renders_nothing() {
        let source = Generator::new(SourceKind::Declarations, "unused")
            .with_colors([])
            .render();
        assert_eq!(source, "");
    }
}
