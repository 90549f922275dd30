use crate::domain::ports::{CompileIssue, CompileReport, TemplateCompiler};
use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)(mj[a-z0-9-]*)\b[^>]*?(/?)>").expect("valid MJML tag pattern")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"));

/// Elements whose content is HTML or attribute defaults, not MJML.
const RAW_CONTENT: &[&str] = &[
    "mj-accordion-text",
    "mj-accordion-title",
    "mj-attributes",
    "mj-button",
    "mj-html-attribute",
    "mj-navbar-link",
    "mj-preview",
    "mj-raw",
    "mj-social-element",
    "mj-style",
    "mj-table",
    "mj-text",
    "mj-title",
];

const COLUMN_CONTENT: &[&str] = &[
    "mj-accordion",
    "mj-button",
    "mj-carousel",
    "mj-divider",
    "mj-image",
    "mj-navbar",
    "mj-raw",
    "mj-social",
    "mj-spacer",
    "mj-table",
    "mj-text",
];

const CONTAINERS: &[&str] = &[
    "mjml",
    "mj-head",
    "mj-html-attributes",
    "mj-selector",
    "mj-body",
    "mj-wrapper",
    "mj-section",
    "mj-group",
    "mj-column",
    "mj-hero",
    "mj-accordion",
    "mj-accordion-element",
    "mj-carousel",
    "mj-navbar",
    "mj-social",
];

enum Children {
    Only(&'static [&'static str]),
    Any,
}

/// Children each registered element accepts; `None` for unregistered tags.
fn children_of(tag: &str) -> Option<Children> {
    let children = match tag {
        "mjml" => Children::Only(&["mj-head", "mj-body", "mj-raw"]),
        "mj-head" => Children::Only(&[
            "mj-attributes",
            "mj-breakpoint",
            "mj-font",
            "mj-html-attributes",
            "mj-preview",
            "mj-raw",
            "mj-style",
            "mj-title",
        ]),
        "mj-attributes" => Children::Any,
        "mj-html-attributes" => Children::Only(&["mj-selector"]),
        "mj-selector" => Children::Only(&["mj-html-attribute"]),
        "mj-body" => Children::Only(&["mj-hero", "mj-raw", "mj-section", "mj-wrapper"]),
        "mj-wrapper" => Children::Only(&["mj-hero", "mj-raw", "mj-section"]),
        "mj-section" => Children::Only(&["mj-column", "mj-group", "mj-raw"]),
        "mj-group" => Children::Only(&["mj-column", "mj-raw"]),
        "mj-column" | "mj-hero" => Children::Only(COLUMN_CONTENT),
        "mj-accordion" => Children::Only(&["mj-accordion-element", "mj-raw"]),
        "mj-accordion-element" => {
            Children::Only(&["mj-accordion-text", "mj-accordion-title", "mj-raw"])
        }
        "mj-carousel" => Children::Only(&["mj-carousel-image"]),
        "mj-navbar" => Children::Only(&["mj-navbar-link", "mj-raw"]),
        "mj-social" => Children::Only(&["mj-social-element", "mj-raw"]),
        "mj-breakpoint" | "mj-font" | "mj-carousel-image" | "mj-divider" | "mj-image"
        | "mj-spacer" | "mj-include" => Children::Only(&[]),
        other if RAW_CONTENT.contains(&other) => Children::Only(&[]),
        _ => return None,
    };
    Some(children)
}

fn allowed_parents(tag: &str) -> Vec<&'static str> {
    CONTAINERS
        .iter()
        .copied()
        .filter(|parent| matches!(children_of(parent), Some(Children::Only(c)) if c.contains(&tag)))
        .collect()
}

/// Flags unregistered elements and elements placed under a parent that
/// does not accept them, worded the way the MJML validator words them.
pub fn structural_issues(template: &str) -> Vec<CompileIssue> {
    let source = COMMENT.replace_all(template, "");
    let mut issues = Vec::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut raw_until: Option<&str> = None;
    let mut saw_root = false;

    for caps in TAG.captures_iter(&source) {
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());
        let Some(name) = caps.get(2).map(|m| m.as_str()) else {
            continue;
        };

        if let Some(raw) = raw_until {
            if closing && name == raw {
                raw_until = None;
                stack.pop();
            }
            continue;
        }

        if closing {
            if let Some(pos) = stack.iter().rposition(|open| *open == name) {
                stack.truncate(pos);
            }
            continue;
        }

        if !saw_root {
            saw_root = true;
            if name != "mjml" {
                issues.push(CompileIssue {
                    message: format!("not an MJML document: root element is <{}>", name),
                });
            }
        }

        if children_of(name).is_none() {
            issues.push(CompileIssue {
                message: format!("Element {} doesn't exist or is not registered", name),
            });
        } else if let Some(parent) = stack.last().copied() {
            if let Some(Children::Only(allowed)) = children_of(parent) {
                if name != "mj-include" && !allowed.contains(&name) {
                    issues.push(CompileIssue {
                        message: format!(
                            "{} cannot be used inside {}, only inside: {}",
                            name,
                            parent,
                            allowed_parents(name).join(", ")
                        ),
                    });
                }
            }
        }

        if !self_closing {
            if RAW_CONTENT.contains(&name) {
                raw_until = Some(name);
            }
            stack.push(name);
        }
    }

    if !saw_root {
        issues.push(CompileIssue {
            message: "not an MJML document: missing <mjml> root".to_string(),
        });
    }

    issues
}

/// Parses with mrml, then applies the MJML nesting rules mrml accepts
/// silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct MrmlCompiler;

impl TemplateCompiler for MrmlCompiler {
    fn compile(&self, template: &str) -> CompileReport {
        if let Err(e) = mrml::parse(template) {
            tracing::debug!("MJML parse failed: {}", e);
            return CompileReport {
                errors: vec![CompileIssue {
                    message: format!("not a valid MJML document: {}", e),
                }],
            };
        }

        CompileReport {
            errors: structural_issues(template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELCOME: &str = "<mjml>
  <mj-head>
    <mj-title>Welcome</mj-title>
    <mj-attributes><mj-all font-family=\"Arial\" /><mj-class name=\"blue\" color=\"blue\" /></mj-attributes>
  </mj-head>
  <mj-body>
    <!-- <mj-foo> in a comment is ignored -->
    <mj-section>
      <mj-column>
        <mj-image src=\"https://example.com/logo.png\" />
        <mj-text>Hello <b>{{ first }}</b></mj-text>
        <mj-button href=\"#\">Go</mj-button>
      </mj-column>
    </mj-section>
  </mj-body>
</mjml>";

    fn messages(template: &str) -> Vec<String> {
        MrmlCompiler
            .compile(template)
            .errors
            .into_iter()
            .map(|issue| issue.message)
            .collect()
    }

    #[test]
    fn test_well_formed_template_is_clean() {
        assert!(structural_issues(WELCOME).is_empty());
        assert!(MrmlCompiler.compile(WELCOME).is_clean());
    }

    #[test]
    fn test_section_inside_column_is_flagged() {
        let errors = messages(
            "<mjml><mj-body><mj-section><mj-column><mj-section></mj-section></mj-column></mj-section></mj-body></mjml>",
        );
        assert_eq!(
            errors,
            vec!["mj-section cannot be used inside mj-column, only inside: mj-body, mj-wrapper"]
        );
    }

    #[test]
    fn test_column_directly_in_body_is_flagged() {
        let errors = messages(
            "<mjml><mj-body><mj-column><mj-section></mj-section></mj-column></mj-body></mjml>",
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0],
            "mj-column cannot be used inside mj-body, only inside: mj-section, mj-group"
        );
        assert!(errors[1].starts_with("mj-section cannot be used inside mj-column"));
    }

    #[test]
    fn test_unregistered_tag_is_flagged() {
        let errors = messages("<mjml><mj-body><mj-foo></mj-foo></mj-body></mjml>");
        assert_eq!(errors, vec!["Element mj-foo doesn't exist or is not registered"]);
    }

    #[test]
    fn test_plain_text_is_not_an_mjml_document() {
        let errors = messages("hello world");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("not "), "{}", errors[0]);
        assert!(errors[0].contains("MJML document"), "{}", errors[0]);
    }

    #[test]
    fn test_truncated_document_is_reported() {
        let errors = messages("<mjml><mj-body>");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("not a valid MJML document: "));
    }

    #[test]
    fn test_missing_root_without_parser() {
        let issues = structural_issues("<p>no mjml here</p>");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "not an MJML document: missing <mjml> root");
    }
}
