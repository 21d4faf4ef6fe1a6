//! Text transforms applied to raw document text before parsing.

use std::collections::HashMap;

/// Pure `text -> text` rewrite applied to fetched content before parsing.
pub trait TextTransform: Send + Sync {
    /// Returns the rewritten text.
    fn apply(&self, text: &str) -> String;
}

impl<F> TextTransform for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn apply(&self, text: &str) -> String {
        self(text)
    }
}

/// Replaces every occurrence of a literal pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceTransform {
    pattern: String,
    replacement: String,
}

impl ReplaceTransform {
    /// Creates a transform replacing `pattern` with `replacement`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl TextTransform for ReplaceTransform {
    fn apply(&self, text: &str) -> String {
        if self.pattern.is_empty() {
            return text.to_owned();
        }
        text.replace(&self.pattern, &self.replacement)
    }
}

/// Substitutes `#{name}` placeholders from a variable table.
///
/// Placeholders without a matching variable are left as written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaceholderTransform {
    variables: HashMap<String, String>,
}

impl PlaceholderTransform {
    /// Creates a transform with no variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable value.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Returns the value of a variable if set.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }
}

impl TextTransform for PlaceholderTransform {
    fn apply(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("#{") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                rest = &rest[start..];
                break;
            };

            let name = &after[..end];
            match self.variables.get(name.trim()) {
                Some(value) => output.push_str(value),
                None => output.push_str(&rest[start..start + 2 + end + 1]),
            }
            rest = &after[end + 1..];
        }

        output.push_str(rest);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_transforms() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.apply("abc"), "ABC");
    }

    #[test]
    fn replace_every_occurrence() {
        let transform = ReplaceTransform::new("${env}", "prod");
        assert_eq!(transform.apply("a: ${env}\nb: ${env}-x\n"), "a: prod\nb: prod-x\n");
    }

    #[test]
    fn empty_pattern_is_identity() {
        let transform = ReplaceTransform::new("", "x");
        assert_eq!(transform.apply("abc"), "abc");
    }

    #[test]
    fn substitutes_known_placeholders() {
        let transform = PlaceholderTransform::new().with_variable("service-name", "my-service");
        let rendered = transform.apply("file: logs/#{service-name}.log\nname: #{service-name}\n");
        assert_eq!(rendered, "file: logs/my-service.log\nname: my-service\n");
    }

    #[test]
    fn leaves_unknown_and_unterminated_placeholders() {
        let transform = PlaceholderTransform::new().with_variable("a", "1");
        assert_eq!(transform.apply("#{a} #{b} #{a"), "1 #{b} #{a");
    }
}
