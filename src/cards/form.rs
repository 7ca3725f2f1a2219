//! Server-rendered form for editing a card's text.

const BLOCK: &str = "b-edit-card-form";

/// Props of the edit form. Rendering is a pure function of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCardForm<'a> {
    pub text: &'a str,
    /// Where the form posts to.
    pub on_submit: &'a str,
    /// Cancel is rendered only when set.
    pub on_cancel: Option<&'a str>,
}

impl EditCardForm<'_> {
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(256 + self.text.len());
        html.push_str(&format!(
            r#"<form class="{BLOCK}" method="post" action="{action}">"#,
            action = escape(self.on_submit),
        ));
        html.push_str(&format!(
            r#"<input class="{BLOCK}__area" type="text" name="text" value="{value}" autofocus>"#,
            value = escape(self.text),
        ));
        html.push_str(&format!(r#"<div class="{BLOCK}__buttons">"#));
        html.push_str(&format!(
            r#"<button class="{BLOCK}__button" type="submit">Save</button>"#
        ));
        if let Some(cancel) = self.on_cancel {
            html.push_str(&format!(
                r#"<a class="{BLOCK}__button" role="button" href="{href}">Cancel</a>"#,
                href = escape(cancel),
            ));
        }
        html.push_str("</div></form>");
        html
    }
}

/// Escape text for use in element content and double-quoted attributes.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(on_cancel: Option<&'static str>) -> EditCardForm<'static> {
        EditCardForm {
            text: "fix the build",
            on_submit: "/api/v1/cards/card00001/edit",
            on_cancel,
        }
    }

    #[test]
    fn renders_prefilled_autofocused_input() {
        let html = form(None).render();
        assert!(html.starts_with(r#"<form class="b-edit-card-form" method="post" action="/api/v1/cards/card00001/edit">"#));
        assert!(html.contains(r#"name="text" value="fix the build" autofocus"#));
        assert!(html.contains(r#"class="b-edit-card-form__area""#));
        assert!(html.contains(r#"<div class="b-edit-card-form__buttons">"#));
        assert!(html.contains(r#"type="submit">Save</button>"#));
    }

    #[test]
    fn cancel_only_when_target_present() {
        assert!(!form(None).render().contains("Cancel"));

        let html = form(Some("/boards/board0001/cards/card00001")).render();
        assert!(html.contains(
            r#"<a class="b-edit-card-form__button" role="button" href="/boards/board0001/cards/card00001">Cancel</a>"#
        ));
    }

    #[test]
    fn escapes_text_and_targets() {
        let html = EditCardForm {
            text: r#"<b>"bold" & 'more'</b>"#,
            on_submit: "/x?a=1&b=2",
            on_cancel: None,
        }
        .render();
        assert!(html.contains(
            r#"value="&lt;b&gt;&quot;bold&quot; &amp; &#39;more&#39;&lt;/b&gt;""#
        ));
        assert!(html.contains(r#"action="/x?a=1&amp;b=2""#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn same_props_render_same_markup() {
        assert_eq!(form(Some("/c")).render(), form(Some("/c")).render());
    }
}
