//! Structured artifact templates.
//!
//! A skeleton is fixed text plus named substitution points. The only
//! substitution points are the two [`ProjectIdentity`] fields:
//!
//! | Placeholder              | Value                        |
//! |--------------------------|------------------------------|
//! | `{{PROJECT_NAME}}`       | [`ProjectIdentity::raw`]        |
//! | `{{PROJECT_NAME_UPPER}}` | [`ProjectIdentity::uppercased`] |
//!
//! Anything else between `{{` and `}}` is rejected at parse time, so a
//! typo in a blueprint cannot silently leak into a generated file.

use crate::domain::{error::DomainError, identity::ProjectIdentity};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A named substitution point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Name,
    NameUpper,
}

impl Placeholder {
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Name => "PROJECT_NAME",
            Self::NameUpper => "PROJECT_NAME_UPPER",
        }
    }

    fn resolve<'a>(&self, identity: &'a ProjectIdentity) -> &'a str {
        match self {
            Self::Name => identity.raw(),
            Self::NameUpper => identity.uppercased(),
        }
    }

    fn parse(token: &str) -> Result<Self, DomainError> {
        match token {
            "PROJECT_NAME" => Ok(Self::Name),
            "PROJECT_NAME_UPPER" => Ok(Self::NameUpper),
            other => Err(DomainError::UnknownPlaceholder { name: other.into() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(&'static str),
    Placeholder(Placeholder),
}

/// Parsed skeleton: an ordered list of text and placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    segments: Vec<Segment>,
}

impl Skeleton {
    pub fn parse(source: &'static str) -> Result<Self, DomainError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(mut start) = rest.find(OPEN) {
            // `${{{PROJECT_NAME_UPPER}}_DIR}`: the outermost brace is text.
            while rest[start + OPEN.len()..].starts_with('{') {
                start += 1;
            }
            if start > 0 {
                segments.push(Segment::Text(&rest[..start]));
            }
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or_else(|| DomainError::InvalidSkeleton {
                    reason: format!("unterminated placeholder near '{}'", preview(after_open)),
                })?;
            let placeholder = Placeholder::parse(after_open[..end].trim())?;
            segments.push(Segment::Placeholder(placeholder));
            rest = &after_open[end + CLOSE.len()..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }

        Ok(Self { segments })
    }

    /// Substitute identity fields into the skeleton.
    pub fn render(&self, identity: &ProjectIdentity) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => *text,
                Segment::Placeholder(p) => p.resolve(identity),
            })
            .collect()
    }

    /// All substitution points, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(*p),
            Segment::Text(_) => None,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

fn preview(s: &str) -> &str {
    let end = s
        .char_indices()
        .nth(24)
        .map_or(s.len(), |(idx, _)| idx);
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_placeholders() {
        let skeleton = Skeleton::parse("set({{PROJECT_NAME_UPPER}}_DIR x) # {{PROJECT_NAME}}").unwrap();
        let id = ProjectIdentity::derive("Mesh");
        assert_eq!(skeleton.render(&id), "set(MESH_DIR x) # Mesh");
    }

    #[test]
    fn placeholder_inside_cmake_variable_reference() {
        let skeleton = Skeleton::parse("include(${{{PROJECT_NAME_UPPER}}_SOURCE_DIR}/x)").unwrap();
        let id = ProjectIdentity::derive("Mesh");
        assert_eq!(skeleton.render(&id), "include(${MESH_SOURCE_DIR}/x)");
    }

    #[test]
    fn plain_text_round_trips() {
        let text = "if(WIN32)\n  set(X ${Y})\nendif()\n";
        let skeleton = Skeleton::parse(text).unwrap();
        assert_eq!(skeleton.render(&ProjectIdentity::derive("any")), text);
        assert_eq!(skeleton.placeholders().count(), 0);
    }

    #[test]
    fn single_braces_are_text() {
        let skeleton = Skeleton::parse("int main() {\n}\n${VAR}").unwrap();
        assert_eq!(skeleton.segments().len(), 1);
    }

    #[test]
    fn rejects_unknown_placeholder() {
        assert_eq!(
            Skeleton::parse("{{AUTHOR}}"),
            Err(DomainError::UnknownPlaceholder {
                name: "AUTHOR".into()
            })
        );
    }

    #[test]
    fn rejects_unterminated_placeholder() {
        assert!(matches!(
            Skeleton::parse("project({{PROJECT_NAME)"),
            Err(DomainError::InvalidSkeleton { .. })
        ));
    }

    #[test]
    fn placeholders_listed_in_order() {
        let skeleton =
            Skeleton::parse("{{PROJECT_NAME}}/{{PROJECT_NAME_UPPER}}/{{PROJECT_NAME}}").unwrap();
        let found: Vec<_> = skeleton.placeholders().collect();
        assert_eq!(
            found,
            vec![Placeholder::Name, Placeholder::NameUpper, Placeholder::Name]
        );
    }
}
