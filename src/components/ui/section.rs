use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {SectionCard, fieldset, "bg-card text-card-foreground flex flex-col gap-3 rounded-xl border px-6 py-4 shadow-sm"}
    clx! {SectionHeader, div, "flex items-center justify-between gap-2"}
    clx! {SectionTitle, h2, "leading-none font-semibold"}
    clx! {SectionDescription, p, "text-muted-foreground text-xs"}
    clx! {FormFooter, footer, "flex items-center justify-end gap-2 pt-2"}
}

pub use components::*;
