//! Page model produced by the presenter.
//!
//! A page is a title, a sidebar of input controls and an ordered list of main-area blocks.
//! Text blocks hold Markdown; renderers decide how to turn the model into HTML or terminal
//! output.

use serde::Serialize;
use serde_json::Value;

/// One rendered page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    /// Browser/tab title.
    pub title: String,
    pub sidebar: Vec<SidebarBlock>,
    pub blocks: Vec<Block>,
}

/// Main-area content.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Subheader { text: String },
    Markdown { markdown: String },
    Info { markdown: String },
    Success { markdown: String },
    Warning { markdown: String },
    Error { markdown: String },
    /// Transient status shown while work runs.
    Status { text: String },
    /// Collapsible panel, closed by default.
    Expander { label: String, blocks: Vec<Block> },
    /// Free-form tree shown verbatim.
    Json { value: Value },
    Button { label: String, action: String },
}

impl Block {
    pub fn markdown(markdown: impl Into<String>) -> Self {
        Block::Markdown {
            markdown: markdown.into(),
        }
    }

    pub fn subheader(text: impl Into<String>) -> Self {
        Block::Subheader { text: text.into() }
    }
}

/// Sidebar input controls, echoing the session state they were rendered from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SidebarBlock {
    Header {
        text: String,
    },
    Checkbox {
        label: String,
        name: String,
        checked: bool,
    },
    FileUploader {
        label: String,
        name: String,
        accept: String,
        /// Previously uploaded document carried forward, with its file name.
        carried: Option<CarriedUpload>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CarriedUpload {
    pub filename: Option<String>,
    pub document: String,
}
