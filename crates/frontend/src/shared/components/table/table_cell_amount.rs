//! Table cell for money amounts in the 3-decimal minor unit
//!
//! ```ignore
//! <TableCellAmount value=Signal::derive(move || Some(line_ht)) />
//! <TableCellAmount value=total bold=true />
//! ```

use super::number_format::format_amount;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned amount cell. `None` renders as a dash.
#[component]
pub fn TableCellAmount(
    #[prop(into)]
    value: Signal<Option<f64>>,

    /// Greys the amount out (e.g. a line priced at zero for lack of a catalog price)
    #[prop(optional, into)]
    muted: MaybeProp<bool>,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let text = move || match value.get() {
        Some(v) => format_amount(v),
        None => "—".to_string(),
    };

    let style = move || {
        let mut styles = Vec::new();
        if muted.get().unwrap_or(false) {
            styles.push("color: var(--color-text-tertiary)");
        }
        if bold {
            styles.push("font-weight: 600");
        }
        styles.join("; ")
    };

    view! {
        <TableCell class="text-right">
            <span class="amount" style=style>{text}</span>
        </TableCell>
    }
}
