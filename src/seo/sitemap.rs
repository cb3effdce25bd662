//! sitemap.xml rendering.
//!
//! Every configured page is listed once per locale, in declaration order.
//! Each `<url>` carries `xhtml:link` alternates for all locales plus
//! `x-default`, so crawlers see the full hreflang cluster from any entry.

use std::fmt::Write as _;

use crate::config::schema::SitemapPage;
use crate::locale::UrlLocalizer;
use crate::seo::metadata::escape_attr;

const HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#,
    "\n"
);

pub fn render_sitemap(localizer: &UrlLocalizer, pages: &[SitemapPage]) -> String {
    let mut out = String::from(HEADER);

    for page in pages {
        let alternates = localizer.alternates_for(&page.path);
        for locale in localizer.registry().locales() {
            let loc = localizer.canonical_url(&page.path, locale);
            out.push_str("  <url>\n");
            let _ = writeln!(out, "    <loc>{}</loc>", escape_attr(&loc));
            for (hreflang, href) in alternates.iter() {
                let _ = writeln!(
                    out,
                    r#"    <xhtml:link rel="alternate" hreflang="{}" href="{}"/>"#,
                    escape_attr(hreflang),
                    escape_attr(href)
                );
            }
            let _ = writeln!(out, "    <changefreq>{}</changefreq>", escape_attr(&page.change_frequency));
            let _ = writeln!(out, "    <priority>{:.2}</priority>", page.priority);
            out.push_str("  </url>\n");
        }
    }

    out.push_str("</urlset>\n");
    out
}
