// crates/gistsnip/src/description.rs

use anyhow::{bail, Result};
use git_links::GithubLink;
use gist_state::SnippetRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Repository,
    Source,
    Name,
    File,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Field(Field),
}

/// A snippet description with `{placeholder}` fields; `{{` and `}}` are literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionTemplate {
    parts: Vec<Part>,
}

impl DescriptionTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => bail!("Unterminated placeholder in description template {:?}", template),
                        }
                    }
                    let field = match name.trim() {
                        "repository" => Field::Repository,
                        "source" => Field::Source,
                        "name" => Field::Name,
                        "file" => Field::File,
                        "line" => Field::Line,
                        other => bail!("Unknown placeholder {{{}}} in description template", other),
                    };
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Field(field));
                }
                '}' => bail!("Unmatched '}}' in description template {:?}", template),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// Fills the placeholders; the result is trimmed so missing links leave no stray spaces.
    pub fn render(&self, record: &SnippetRecord, link: &GithubLink) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(Field::Repository) => out.push_str(&link.repository),
                Part::Field(Field::Source) => out.push_str(&link.source),
                Part::Field(Field::Name) => out.push_str(&record.name),
                Part::Field(Field::File) => out.push_str(&record.file),
                Part::Field(Field::Line) => out.push_str(&record.line.to_string()),
            }
        }
        out.trim().to_string()
    }
}
