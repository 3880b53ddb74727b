//! Formatter implementations.

use crate::trail::{LinkSpec, LinkTarget, RenderedTrail};
use crate::{Error, Result};

use super::TrailFormatter;

const SEPARATOR: &str = " > ";

/// Formats a trail on one line.
///
/// Sibling links follow their entry in brackets. In verbose mode each
/// linked label is followed by its route and parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    /// Creates a text formatter.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn link(&self, link: &LinkSpec) -> String {
        if !self.verbose {
            return link.label.clone();
        }
        match link.target {
            LinkTarget::Unlinked => link.label.clone(),
            LinkTarget::Front => format!("{} ({})", link.label, link.target.route_name()),
            LinkTarget::Route {
                ref name,
                ref params,
            } => {
                let params: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
                if params.is_empty() {
                    format!("{} ({name})", link.label)
                } else {
                    format!("{} ({name} {})", link.label, params.join(","))
                }
            }
        }
    }
}

impl TrailFormatter for TextFormatter {
    fn format(&self, trail: &RenderedTrail) -> Result<String> {
        let Some(ref entries) = trail.links else {
            return Ok("(no breadcrumb)".to_string());
        };

        let parts: Vec<String> = entries
            .iter()
            .map(|entry| {
                let head = self.link(&entry.link);
                if entry.siblings.is_empty() {
                    head
                } else {
                    let siblings: Vec<String> =
                        entry.siblings.iter().map(|s| self.link(s)).collect();
                    format!("{head} [{}]", siblings.join(" | "))
                }
            })
            .collect();

        Ok(parts.join(SEPARATOR))
    }
}

/// Formats a trail as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl TrailFormatter for JsonFormatter {
    fn format(&self, trail: &RenderedTrail) -> Result<String> {
        serde_json::to_string_pretty(trail).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::LinkTrail;

    fn sample() -> RenderedTrail {
        let mut trail = LinkTrail::new();
        trail
            .add_link(LinkSpec::front("Home"))
            .add_link(LinkSpec::route(
                "Photographs",
                "view.collection.page",
                "node",
                "2",
            ));
        trail.start_link_set().unwrap();
        trail
            .add_sub_link(LinkSpec::route("Maps", "entity.node.canonical", "node", "3"))
            .unwrap()
            .add_sub_link(LinkSpec::unlinked("Scans"))
            .unwrap();
        trail.add_link(LinkSpec::unlinked("Harbour"));
        trail.render()
    }

    #[test]
    fn test_text_format() {
        let out = TextFormatter::new(false).format(&sample()).unwrap();
        assert_eq!(out, "Home > Photographs [Maps | Scans] > Harbour");
    }

    #[test]
    fn test_text_format_verbose() {
        let out = TextFormatter::new(true).format(&sample()).unwrap();
        assert_eq!(
            out,
            "Home (<front>) > Photographs (view.collection.page node=2) \
             [Maps (entity.node.canonical node=3) | Scans] > Harbour"
        );
    }

    #[test]
    fn test_json_format() {
        let out = JsonFormatter.format(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["links"][1]["label"], "Photographs");
        assert_eq!(value["links"][1]["siblings"][0]["label"], "Maps");
        assert_eq!(value["links"][0]["target"]["kind"], "front");
    }

    #[test]
    fn test_empty_trail_json_has_no_links() {
        let out = JsonFormatter.format(&LinkTrail::new().render()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("links").is_none());
    }
}
