use leptos::prelude::*;
use tw_merge::*;

/// "+" / "-" button of a repeatable group.
///
/// Always `type="button"`: inside the upload form a default button would
/// submit it.
#[component]
pub fn ControlButton(
    #[prop(into)] name: String,
    intent: ControlIntent,
    #[prop(into)] on_press: Callback<()>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let label = match intent {
        ControlIntent::Add => "+",
        ControlIntent::Remove => "-",
    };
    let class = ControlClass { intent }.with_class(class);

    view! {
        <button type="button" name=name class=class on:click=move |_| on_press.run(())>
            {label}
        </button>
    }
}

/* ========================================================== */
/*                       🧬 STRUCT 🧬                         */
/* ========================================================== */

#[derive(TwClass, Default)]
#[tw(class = "inline-flex size-7 items-center justify-center rounded-md border text-sm font-medium shadow-xs transition-all hover:cursor-pointer active:scale-[0.98]")]
pub struct ControlClass {
    intent: ControlIntent,
}

#[derive(TwVariant)]
pub enum ControlIntent {
    #[tw(default, class = "bg-primary text-primary-foreground hover:bg-primary/90")]
    Add,
    #[tw(class = "bg-border/30 hover:bg-border/50 hover:text-foreground")]
    Remove,
}
