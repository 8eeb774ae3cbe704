//! HTML templates for generated pages.
//!
//! Every page shares one layout: site header, a sidebar column and the main
//! content. Templates write straight into a `String`.

use std::collections::BTreeMap;
use std::fmt::Write;

use dsweb_renderer::{TocEntry, escape_html as escape};
use dsweb_site::{BlogEntry, ReleaseEntry, TutorialEntry};

/// Site-wide values shown on every page.
pub(crate) struct SiteData<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
}

/// All data needed to render a content page.
pub(crate) struct PageData<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub edit_link: &'a str,
    pub html_content: &'a str,
    pub toc: &'a [TocEntry],
    pub sidebar: &'a str,
    /// Section name, used as the page's CSS class.
    pub section: &'a str,
}

/// Render a complete content page.
pub(crate) fn render_page(site: &SiteData<'_>, page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(8192 + page.html_content.len());
    open_layout(&mut html, site, page.title, page.description, page.section);

    if !page.sidebar.is_empty() {
        html.push_str("<aside class=\"sidebar-column\">\n");
        html.push_str(page.sidebar);
        html.push_str("</aside>\n");
    }

    html.push_str("<main>\n<article>\n<header class=\"article-header\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(page.title));
    if let Some(description) = page.description {
        let _ = writeln!(html, "<p class=\"description\">{}</p>", escape(description));
    }
    let _ = writeln!(
        html,
        "<a class=\"edit-link\" href=\"{}\">Edit on GitHub</a>",
        escape(page.edit_link)
    );
    html.push_str("</header>\n");
    html.push_str(page.html_content);
    html.push_str("\n</article>\n</main>\n");

    render_toc(&mut html, page.toc);
    close_layout(&mut html);
    html
}

/// Render the blog overview, newest post first.
pub(crate) fn render_blog_listing(site: &SiteData<'_>, entries: &[BlogEntry]) -> String {
    let mut html = String::with_capacity(4096);
    open_layout(&mut html, site, "Blog", None, "blog");

    html.push_str("<main>\n<section class=\"entries\">\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<a class=\"entry {}\" href=\"{}\">",
            escape(&entry.kind),
            escape(&entry.slug)
        );
        let _ = writeln!(
            html,
            "<time datetime=\"{date}\">{date}</time>",
            date = entry.date_label()
        );
        let _ = writeln!(html, "<h2 class=\"title\">{}</h2>", escape(&entry.title));
        if let Some(description) = &entry.description {
            let _ = writeln!(html, "<p class=\"description\">{}</p>", escape(description));
        }
        html.push_str("</a>\n");
    }
    html.push_str("</section>\n</main>\n");

    close_layout(&mut html);
    html
}

/// Render release notes grouped by component.
pub(crate) fn render_release_listing(
    site: &SiteData<'_>,
    releases: &BTreeMap<String, Vec<ReleaseEntry>>,
) -> String {
    let mut html = String::with_capacity(4096);
    open_layout(&mut html, site, "Releases", None, "releases");

    html.push_str("<main>\n");
    for (component, entries) in releases {
        let _ = writeln!(
            html,
            "<section class=\"component {}\">\n<h2>{}</h2>\n<ul class=\"releases\">",
            escape(component),
            escape(&component_heading(component))
        );
        for release in entries {
            let _ = writeln!(html, "<li class=\"release\"><a href=\"{}\">", escape(&release.slug));
            let _ = writeln!(
                html,
                "<span class=\"version\">{}</span>",
                escape(&release.version)
            );
            if let Some(description) = &release.description {
                let _ = writeln!(html, "<p class=\"description\">{}</p>", escape(description));
            }
            html.push_str("</a></li>\n");
        }
        html.push_str("</ul>\n</section>\n");
    }
    html.push_str("</main>\n");

    close_layout(&mut html);
    html
}

/// Render the tutorials overview: one section per category, one block per
/// group inside it.
pub(crate) fn render_tutorial_listing(
    site: &SiteData<'_>,
    categories: &BTreeMap<String, BTreeMap<String, Vec<TutorialEntry>>>,
) -> String {
    let mut html = String::with_capacity(4096);
    open_layout(&mut html, site, "Tutorials", None, "tutorials");

    html.push_str("<main>\n<section class=\"section-overview\">\n");
    for (category, groups) in categories {
        let _ = writeln!(
            html,
            "<section class=\"entries {}\">\n<h2>{}</h2>",
            escape(category),
            escape(&label(category))
        );
        for (group, entries) in groups {
            let _ = writeln!(
                html,
                "<div class=\"category\">\n<h3>{}</h3>",
                escape(&label(group))
            );
            for entry in entries {
                let _ = writeln!(html, "<a class=\"entry\" href=\"{}\">", escape(&entry.slug));
                let _ = writeln!(html, "<h4 class=\"title\">{}</h4>", escape(&entry.title));
                if let Some(description) = &entry.description {
                    let _ = writeln!(html, "<p class=\"description\">{}</p>", escape(description));
                }
                html.push_str("</a>\n");
            }
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }
    html.push_str("</section>\n</main>\n");

    close_layout(&mut html);
    html
}

/// Render the page served for unknown URLs.
pub(crate) fn render_not_found(site: &SiteData<'_>) -> String {
    let mut html = String::with_capacity(1024);
    open_layout(&mut html, site, "Page not found", None, "not-found");
    html.push_str("<main>\n<h1>Page not found</h1>\n");
    html.push_str("<p>The page you requested does not exist.</p>\n");
    html.push_str("<a href=\"/\">Back to the homepage</a>\n</main>\n");
    close_layout(&mut html);
    html
}

/// Render a page that forwards the browser to `target`.
pub(crate) fn render_redirect(target: &str) -> String {
    let target = escape(target);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Redirecting…</title>\n\
         <link rel=\"canonical\" href=\"{target}\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={target}\">\n\
         </head>\n<body>\n<a href=\"{target}\">Redirecting to {target}</a>\n</body>\n</html>\n"
    )
}

fn component_heading(component: &str) -> String {
    match component {
        "server" => "Server releases".to_owned(),
        "client-js" => "JavaScript/Node releases".to_owned(),
        other => {
            let mut heading = label(other);
            heading.push_str(" releases");
            heading
        }
    }
}

/// Heading for a URL segment: `request-response` becomes `request response`.
fn label(segment: &str) -> String {
    segment.replace('-', " ")
}

fn open_layout(
    html: &mut String,
    site: &SiteData<'_>,
    title: &str,
    description: Option<&str>,
    page_class: &str,
) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        html,
        "<title>{} | {}</title>",
        escape(title),
        escape(site.title)
    );
    if let Some(description) = description.or(site.description) {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }
    html.push_str("<link rel=\"stylesheet\" href=\"/styles.css\">\n");
    html.push_str("</head>\n");
    let _ = writeln!(html, "<body class=\"{}-page\">", escape(page_class));
    let _ = writeln!(
        html,
        "<header class=\"site-header\"><a href=\"/\">{}</a></header>",
        escape(site.title)
    );
    html.push_str("<div class=\"layout\">\n");
}

fn close_layout(html: &mut String) {
    html.push_str("</div>\n</body>\n</html>\n");
}

fn render_toc(html: &mut String, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    html.push_str("<nav class=\"toc\">\n<h3>On this page</h3>\n<ul>\n");
    for entry in toc {
        let _ = writeln!(
            html,
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level,
            escape(&entry.id),
            escape(&entry.title)
        );
    }
    html.push_str("</ul>\n</nav>\n");
}
