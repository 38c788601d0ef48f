use htmlescape::encode_minimal;

use crate::models::{PostDetail, PostSummary};

const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
    const socket = new WebSocket("ws://" + window.location.host + "/ws");
    socket.onmessage = (event) => {
        if (event.data === "reload") {
            window.location.reload();
        }
    };
</script>
"#;

/// Drop page content into the site layout. The layout understands two
/// placeholders: `{{ title }}` and `{{ content }}`.
fn render_with_layout(layout: &str, title: &str, content: &str, is_development: bool) -> String {
    let mut page = layout
        .replace("{{ title }}", &encode_minimal(title))
        .replace("{{ content }}", content);

    if is_development {
        page = page.replace("</body>", &format!("{}</body>", LIVE_RELOAD_SCRIPT));
    }

    page
}

pub fn render_index_page(
    layout: &str,
    site_title: &str,
    posts: &[PostSummary],
    is_development: bool,
) -> String {
    let mut list_items = String::new();
    for post in posts {
        list_items.push_str(&format!(
            "<li><a href=\"/posts/{}\">{}</a> <span class=\"post-date\">{}</span></li>\n",
            encode_minimal(&post.slug),
            encode_minimal(&post.title),
            encode_minimal(&post.date),
        ));
    }

    let content = format!("<ul class=\"post-list\">\n{}</ul>", list_items);
    render_with_layout(layout, site_title, &content, is_development)
}

pub fn render_post_page(
    layout: &str,
    post: &PostDetail,
    is_development: bool,
) -> String {
    let content = format!(
        "<h1>{}</h1>\n<p class=\"post-date\">{}</p>\n{}",
        encode_minimal(&post.title),
        encode_minimal(&post.date),
        post.content_html,
    );
    render_with_layout(layout, &post.title, &content, is_development)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = "<html><head><title>{{ title }}</title></head>\
                          <body>{{ content }}</body></html>";

    #[test]
    fn index_page_links_every_post() {
        let posts = vec![
            PostSummary {
                slug: "one".into(),
                title: "Post One".into(),
                date: "2026-01-01".into(),
            },
            PostSummary {
                slug: "two".into(),
                title: "Post Two".into(),
                date: "No Date".into(),
            },
        ];

        let page = render_index_page(LAYOUT, "My Blog", &posts, false);
        assert!(page.contains("<title>My Blog</title>"));
        assert!(page.contains("<a href=\"/posts/one\">Post One</a>"));
        assert!(page.contains("<a href=\"/posts/two\">Post Two</a>"));
    }

    #[test]
    fn post_page_carries_title_date_and_body() {
        let post = PostDetail {
            title: "Hello".into(),
            date: "2026-01-05".into(),
            content_html: "<h1>Hi</h1>".into(),
        };

        let page = render_post_page(LAYOUT, &post, false);
        assert!(page.contains("<title>Hello</title>"));
        assert!(page.contains("<p class=\"post-date\">2026-01-05</p>"));
        assert!(page.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn front_matter_values_are_escaped() {
        let posts = vec![PostSummary {
            slug: "xss".into(),
            title: "<script>alert(1)</script>".into(),
            date: "No Date".into(),
        }];

        let page = render_index_page(LAYOUT, "My Blog", &posts, false);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn development_mode_injects_reload_script() {
        let page = render_index_page(LAYOUT, "My Blog", &[], true);
        assert!(page.contains("new WebSocket"));

        let page = render_index_page(LAYOUT, "My Blog", &[], false);
        assert!(!page.contains("new WebSocket"));
    }
}
