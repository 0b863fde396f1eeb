//! Markdown rendering of pages.
//!
//! Produces a single Markdown document from a [`Page`], suitable for a terminal or for pasting
//! into notes. Block text is already Markdown and is emitted as-is; containers become headings
//! and quotes; free-form trees become fenced JSON code blocks.

use crate::page::{Block, Page, SidebarBlock};

/// Service for rendering pages as Markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a whole page: sidebar summary first, then the main blocks in order.
    pub fn render(&self, page: &Page) -> String {
        let mut parts = vec![self.sidebar(&page.sidebar)];
        parts.extend(page.blocks.iter().map(|b| self.block(b)));
        let mut output = parts.join("\n\n");
        output.push('\n');
        output
    }

    fn sidebar(&self, sidebar: &[SidebarBlock]) -> String {
        sidebar
            .iter()
            .map(|block| match block {
                SidebarBlock::Header { text } => format!("> **{text}**"),
                SidebarBlock::Checkbox { label, checked, .. } => {
                    format!("> - [{}] {label}", if *checked { "x" } else { " " })
                }
                SidebarBlock::FileUploader { label, carried, .. } => {
                    let current = carried
                        .as_ref()
                        .map(|c| c.filename.as_deref().unwrap_or("uploaded document"))
                        .unwrap_or("none");
                    format!("> - {label}: {current}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn block(&self, block: &Block) -> String {
        match block {
            Block::Title { text } => format!("# {text}"),
            Block::Subheader { text } => format!("### {text}"),
            Block::Markdown { markdown } => markdown.clone(),
            Block::Info { markdown } => quote(&format!("ℹ️ {markdown}")),
            Block::Success { markdown } => quote(markdown),
            Block::Warning { markdown } => quote(&format!("⚠️ {markdown}")),
            Block::Error { markdown } => quote(&format!("❌ {markdown}")),
            Block::Status { text } => format!("_{text}_"),
            Block::Expander { label, blocks } => {
                let mut parts = vec![format!("#### ▾ {label}")];
                parts.extend(blocks.iter().map(|b| self.block(b)));
                parts.join("\n\n")
            }
            Block::Json { value } => {
                let pretty =
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                format!("```json\n{pretty}\n```")
            }
            Block::Button { label, .. } => format!("`[ {label} ]`"),
        }
    }
}

/// Prefix every line with a blockquote marker.
fn quote(markdown: &str) -> String {
    markdown
        .lines()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::CarriedUpload;
    use serde_json::json;

    fn page(blocks: Vec<Block>) -> Page {
        Page {
            title: "t".into(),
            sidebar: vec![
                SidebarBlock::Header {
                    text: "Input".into(),
                },
                SidebarBlock::Checkbox {
                    label: "Use Sample Case".into(),
                    name: "use_sample".into(),
                    checked: true,
                },
                SidebarBlock::FileUploader {
                    label: "Upload JSON File".into(),
                    name: "scenario_file".into(),
                    accept: ".json".into(),
                    carried: Some(CarriedUpload {
                        filename: Some("case.json".into()),
                        document: "{}".into(),
                    }),
                },
            ],
            blocks,
        }
    }

    #[test]
    fn renders_sidebar_summary() {
        let out = MarkdownRenderer::new().render(&page(vec![]));
        assert!(out.starts_with("> **Input**\n> - [x] Use Sample Case\n> - Upload JSON File: case.json"));
    }

    #[test]
    fn renders_blocks_in_order() {
        let out = MarkdownRenderer::new().render(&page(vec![
            Block::Title { text: "Case".into() },
            Block::Warning {
                markdown: "Pick one.".into(),
            },
            Block::Expander {
                label: "Results".into(),
                blocks: vec![Block::Json {
                    value: json!({"b": 1, "a": [true]}),
                }],
            },
        ]));

        let title = out.find("# Case").unwrap();
        let warning = out.find("> ⚠️ Pick one.").unwrap();
        let expander = out.find("#### ▾ Results").unwrap();
        assert!(title < warning && warning < expander);
        assert!(out.contains("```json\n{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}\n```"));
    }

    #[test]
    fn multi_line_callouts_stay_quoted() {
        let out = MarkdownRenderer::new().render(&page(vec![Block::Error {
            markdown: "line one\nline two".into(),
        }]));
        assert!(out.contains("> ❌ line one\n> line two"));
    }
}
