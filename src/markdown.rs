use pulldown_cmark::{html, Options, Parser};

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options
}

pub fn render_markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut html_out = String::new();
    html::push_html(&mut html_out, parser);
    html_out
}
