//! Named-slot text templates
//!
//! Slots are written `{slot}`. Literal braces are written `{{` and `}}`.

use std::path::Path;

use crate::error::{GenError, Result};

/// A loaded description template
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
}

impl Template {
    /// Wrap template text
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| GenError::TemplateLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(source))
    }

    /// Substitute every slot with its value
    ///
    /// Fails if the template references a slot missing from `values` or
    /// contains an unmatched brace. Extra values are ignored.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String> {
        let src = self.source.as_str();
        let mut out = String::with_capacity(src.len());
        let mut rest = src;

        while let Some(pos) = rest.find(['{', '}']) {
            out.push_str(&rest[..pos]);
            let offset = src.len() - rest.len() + pos;
            let tail = &rest[pos..];

            if tail.starts_with("{{") {
                out.push('{');
                rest = &tail[2..];
            } else if tail.starts_with("}}") {
                out.push('}');
                rest = &tail[2..];
            } else if tail.starts_with('}') {
                return Err(GenError::MalformedTemplate(offset));
            } else {
                let end = tail.find('}').ok_or(GenError::MalformedTemplate(offset))?;
                let slot = &tail[1..end];
                if slot.contains('{') {
                    return Err(GenError::MalformedTemplate(offset));
                }
                let value = values
                    .iter()
                    .find(|(name, _)| *name == slot)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| GenError::UnknownSlot(slot.to_string()))?;
                out.push_str(value);
                rest = &tail[end + 1..];
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_slots() {
        let t = Template::new("<robot name=\"{name}\">{body}</robot>");
        let out = t.render(&[("name", "hammer"), ("body", "<link/>")]).unwrap();
        assert_eq!(out, "<robot name=\"hammer\"><link/></robot>");
    }

    #[test]
    fn test_render_repeated_slot() {
        let t = Template::new("{a}-{a}");
        assert_eq!(t.render(&[("a", "x")]).unwrap(), "x-x");
    }

    #[test]
    fn test_render_escaped_braces() {
        let t = Template::new("{{literal}} {x}");
        assert_eq!(t.render(&[("x", "1")]).unwrap(), "{literal} 1");
    }

    #[test]
    fn test_value_braces_not_expanded() {
        let t = Template::new("{x}");
        assert_eq!(t.render(&[("x", "{y}")]).unwrap(), "{y}");
    }

    #[test]
    fn test_unknown_slot() {
        let t = Template::new("{missing}");
        let err = t.render(&[("name", "hammer")]).unwrap_err();
        assert!(matches!(err, GenError::UnknownSlot(ref s) if s == "missing"));
    }

    #[test]
    fn test_unmatched_braces() {
        assert!(matches!(
            Template::new("abc {name").render(&[("name", "x")]),
            Err(GenError::MalformedTemplate(4))
        ));
        assert!(matches!(
            Template::new("a } b").render(&[]),
            Err(GenError::MalformedTemplate(2))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Template::load(&dir.path().join("nope.xml")).unwrap_err();
        assert!(matches!(err, GenError::TemplateLoad { .. }));
    }
}
