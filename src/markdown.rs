//! Markdown rendering for finalized assistant turns

use pulldown_cmark::{html, Options, Parser};

fn options() -> Options {
    // The GitHub-flavoured subset answers tend to use
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render markdown to an HTML fragment
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
