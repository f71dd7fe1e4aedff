use std::io::Write;

use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use super::{Page, Renderer};

const HOME_TEMPLATE: &str = "home.html";
const DEALZ_TEMPLATE: &str = "dealz.html";

/// Built-in renderer: Tera templates compiled into the binary.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            (HOME_TEMPLATE, include_str!("../../templates/home.html")),
            (DEALZ_TEMPLATE, include_str!("../../templates/dealz.html")),
        ])
        .context("Failed to compile page templates")?;
        tera.set_escape_fn(escape_html);
        Ok(Self { tera })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, page: &Page, out: &mut dyn Write) -> Result<()> {
        let (template, ctx) = match page {
            Page::Home(base) => (HOME_TEMPLATE, Context::from_serialize(base)?),
            Page::Dealz(dealz) => (DEALZ_TEMPLATE, Context::from_serialize(dealz)?),
        };
        self.tera.render_to(template, &ctx, out)?;
        Ok(())
    }
}

/// Like Tera's default escaper but leaves `/` alone, so links in the
/// generated pages stay readable.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use crate::web::{BaseContext, DealzContext};
    use chrono::{TimeZone, Utc};

    fn base(prefix: &str) -> BaseContext {
        BaseContext {
            path_prefix: prefix.to_string(),
        }
    }

    fn render(page: &Page) -> String {
        let renderer = TeraRenderer::new().unwrap();
        let mut out = Vec::new();
        renderer.render(page, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            id: Some("42".to_string()),
            url: "https://www.ebucks.com/p/42".to_string(),
            image_url: None,
            price: "eB 1,000".to_string(),
            original_price: Some("eB 1,250".to_string()),
        }
    }

    #[test]
    fn home_links_use_prefix() {
        let html = render(&Page::Home(base("/deals")));
        assert!(html.contains(r#"href="/deals/discount.html""#));
        assert!(html.contains(r#"href="/deals/other.html""#));
        assert!(html.contains(r#"href="/deals/index.html""#));
    }

    #[test]
    fn dealz_lists_products_in_order() {
        let page = Page::Dealz(DealzContext {
            base: base(""),
            title: "Discounted (40%)".to_string(),
            last_updated: Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap(),
            products: vec![product("Toaster"), product("Drill")],
        });
        let html = render(&page);

        assert!(html.contains("<h1>Discounted (40%)</h1>"));
        assert!(html.contains("Last updated: 2026-10-16 08:30 UTC"));
        assert!(html.contains("2 products"));
        assert!(html.contains(r#"href="https://www.ebucks.com/p/42""#));
        assert!(html.contains("<s class=\"was\">eB 1,250</s>"));
        let toaster = html.find("Toaster").unwrap();
        let drill = html.find("Drill").unwrap();
        assert!(toaster < drill);
    }

    #[test]
    fn product_names_are_escaped() {
        let page = Page::Dealz(DealzContext {
            base: base(""),
            title: "Other Products".to_string(),
            last_updated: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            products: vec![product("<script>alert(1)</script>")],
        });
        let html = render(&page);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn escape_keeps_slashes() {
        assert_eq!(escape_html("/a?b=1&c='d'"), "/a?b=1&amp;c=&#x27;d&#x27;");
    }
}
