//! HTML rendering of pages.
//!
//! The whole page is one multipart form: the sidebar holds the sample toggle and the uploader,
//! the main area holds the scenario and the "Run Agent Diagnosis" button. A previously uploaded
//! document travels back in a hidden field so each submission is a self-contained session.
//!
//! Markdown blocks go through `pulldown-cmark`. Raw HTML inside scenario text is emitted as
//! escaped text, never as markup.

use crate::constants::{
    ACTION_APPLY, FIELD_ACTION, FIELD_SCENARIO_DOCUMENT, FIELD_SCENARIO_FILENAME,
};
use crate::page::{Block, Page, SidebarBlock};
use pulldown_cmark::{html, Event, Parser};

const STYLE: &str = "body{margin:0;font-family:sans-serif;color:#262730}\
form{display:flex;min-height:100vh}\
aside{width:18rem;padding:1.5rem;background:#f0f2f6}\
main{flex:1;padding:1.5rem 3rem}\
.alert{padding:.75rem 1rem;border-radius:.5rem;margin:.5rem 0}\
.info{background:#e8f0fe}.success{background:#e6f4ea}\
.warning{background:#fef7e0}.error{background:#fce8e6}\
.status{font-style:italic;color:#555}\
details{border:1px solid #ddd;border-radius:.5rem;padding:.5rem 1rem;margin:.5rem 0}\
pre.json{background:#f6f8fa;padding:.75rem;overflow:auto}\
.carried{display:none}";

/// Service for rendering pages as standalone HTML documents.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    form_action: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HtmlRenderer {
    /// Create a renderer whose form posts to `form_action`.
    pub fn new(form_action: impl Into<String>) -> Self {
        Self {
            form_action: form_action.into(),
        }
    }

    /// Render a complete HTML document for `page`.
    pub fn render(&self, page: &Page) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_text(&page.title)));
        out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
        out.push_str(&format!(
            "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">\n",
            escape_text(&self.form_action)
        ));

        out.push_str("<aside>\n");
        for block in &page.sidebar {
            self.sidebar_block(&mut out, block);
        }
        out.push_str(&format!(
            "<button type=\"submit\" name=\"{FIELD_ACTION}\" value=\"{ACTION_APPLY}\">Apply</button>\n"
        ));
        out.push_str("</aside>\n<main>\n");
        for block in &page.blocks {
            self.block(&mut out, block);
        }
        out.push_str("</main>\n</form>\n</body>\n</html>\n");
        out
    }

    fn sidebar_block(&self, out: &mut String, block: &SidebarBlock) {
        match block {
            SidebarBlock::Header { text } => {
                out.push_str(&format!("<h2>{}</h2>\n", escape_text(text)));
            }
            SidebarBlock::Checkbox {
                label,
                name,
                checked,
            } => {
                out.push_str(&format!(
                    "<p><label><input type=\"checkbox\" name=\"{}\" value=\"true\" onchange=\"this.form.submit()\"{}> {}</label></p>\n",
                    escape_text(name),
                    if *checked { " checked" } else { "" },
                    escape_text(label)
                ));
            }
            SidebarBlock::FileUploader {
                label,
                name,
                accept,
                carried,
            } => {
                out.push_str(&format!(
                    "<p><label>{}<br><input type=\"file\" name=\"{}\" accept=\"{}\"></label></p>\n",
                    escape_text(label),
                    escape_text(name),
                    escape_text(accept)
                ));
                if let Some(carried) = carried {
                    let filename = carried.filename.as_deref().unwrap_or("");
                    out.push_str(&format!(
                        "<p class=\"status\">Current file: {}</p>\n",
                        escape_text(if filename.is_empty() { "uploaded document" } else { filename })
                    ));
                    out.push_str(&format!(
                        "<textarea class=\"carried\" name=\"{FIELD_SCENARIO_FILENAME}\">{}</textarea>\n",
                        escape_text(filename)
                    ));
                    out.push_str(&format!(
                        "<textarea class=\"carried\" name=\"{FIELD_SCENARIO_DOCUMENT}\">{}</textarea>\n",
                        escape_text(&carried.document)
                    ));
                }
            }
        }
    }

    fn block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Title { text } => out.push_str(&format!("<h1>{}</h1>\n", escape_text(text))),
            Block::Subheader { text } => {
                out.push_str(&format!("<h3>{}</h3>\n", escape_text(text)));
            }
            Block::Markdown { markdown } => out.push_str(&markdown_to_html(markdown)),
            Block::Info { markdown } => alert(out, "info", markdown),
            Block::Success { markdown } => alert(out, "success", markdown),
            Block::Warning { markdown } => alert(out, "warning", markdown),
            Block::Error { markdown } => alert(out, "error", markdown),
            Block::Status { text } => {
                out.push_str(&format!("<p class=\"status\">{}</p>\n", escape_text(text)));
            }
            Block::Expander { label, blocks } => {
                out.push_str(&format!(
                    "<details>\n<summary>{}</summary>\n",
                    escape_text(label)
                ));
                for inner in blocks {
                    self.block(out, inner);
                }
                out.push_str("</details>\n");
            }
            Block::Json { value } => {
                let pretty =
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                out.push_str(&format!(
                    "<pre class=\"json\"><code>{}</code></pre>\n",
                    escape_text(&pretty)
                ));
            }
            Block::Button { label, action } => {
                out.push_str(&format!(
                    "<p><button type=\"submit\" name=\"{FIELD_ACTION}\" value=\"{}\">{}</button></p>\n",
                    escape_text(action),
                    escape_text(label)
                ));
            }
        }
    }
}

fn alert(out: &mut String, class: &str, markdown: &str) {
    out.push_str(&format!("<div class=\"alert {class}\">"));
    out.push_str(&markdown_to_html(markdown));
    out.push_str("</div>\n");
}

/// Render Markdown to HTML, turning any raw HTML into visible text.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Escape text for element content and double-quoted attribute values.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
