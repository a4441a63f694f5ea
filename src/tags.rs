//! Classification tags attached to every touch this source produces.
//! Consumers can filter touches by tag without caring which source made them.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Tag carried by default: the touch came from a touch device.
pub const INPUT_TOUCH: &str = "Touch";

/// Ordered list of tags forwarded with every touch begin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    #[allow(dead_code)]
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    #[allow(dead_code)]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }
}

impl Default for Tags {
    fn default() -> Self {
        Self(vec![INPUT_TOUCH.into()])
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl FromStr for Tags {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tags: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if tags.is_empty() {
            return Err(format!("'{}' contains no tags (expected e.g. \"Touch\" or \"Touch,Pad\")", s));
        }
        Ok(Self(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_input_touch() {
        let tags = Tags::default();
        assert!(tags.contains(INPUT_TOUCH));
        assert_eq!(tags.to_string(), "Touch");
    }

    #[test]
    fn parses_comma_separated_list() {
        let tags: Tags = "Touch, Pad".parse().unwrap();
        assert_eq!(tags, Tags::new(["Touch", "Pad"]));
        assert!(tags.contains("Pad"));
        assert!(!tags.contains("Pen"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!("".parse::<Tags>().is_err());
        assert!(" , ".parse::<Tags>().is_err());
    }
}
