//! Root wrapper of every admin page.
//!
//! Puts two attributes on the root element so a page can be found from the
//! DOM inspector:
//!   - `id`: `"{entity}--{category}"`, e.g. `"a001_demande--list"`
//!   - `data-page-category`: one of the `PAGE_CAT_*` constants

use leptos::prelude::*;

/// List of records
pub const PAGE_CAT_LIST: &str = "list";

#[component]
pub fn PageFrame(
    page_id: &'static str,
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let full_class = if class.is_empty() {
        "page".to_string()
    } else {
        format!("page {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
