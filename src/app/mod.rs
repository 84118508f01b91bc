use crate::builder::{FormAction, FormBuilder};
use crate::components::ui::{
    Alert, AlertDescription, AlertTitle, ControlButton, ControlIntent, FormFooter, SectionCard,
    SectionDescription, SectionHeader, SectionTitle,
};
use crate::config::EnvConfig;
use crate::dom::WebDom;
use crate::error::{FormError, FormResult};
use crate::schema::{SectionKind, DOCUMENT_LABEL};
use leptos::logging::{log, warn};
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use strum::IntoEnumIterator;

// Mount points: the builder appends instances into these.
const SECTION_BODY_CLASS: &str = "flex flex-col gap-2 text-sm [&_input]:mx-1 [&_input[type=text]]:rounded-md [&_input[type=text]]:border [&_input[type=text]]:px-2";

type SharedBuilder = Rc<RefCell<FormBuilder<WebDom>>>;

/// Browser-side owner of the form builder.
///
/// Controls created by the builder hold a weak handle back to it, so every
/// click (leptos buttons and generated ones alike) goes through `dispatch`.
#[derive(Clone)]
pub(crate) struct FormController {
    builder: SharedBuilder,
    last_error: RwSignal<Option<String>>,
    debug: bool,
}

fn run(
    builder: &RefCell<FormBuilder<WebDom>>,
    action: FormAction,
    last_error: RwSignal<Option<String>>,
    debug: bool,
) {
    let result = match builder.try_borrow_mut() {
        Ok(mut b) => {
            let result = b.dispatch(action.clone());
            if debug {
                if let Ok(json) = serde_json::to_string(&b.counts()) {
                    log!("upload form: {action:?} -> {json}");
                }
            }
            result
        }
        // Another handler is still running; drop this click.
        Err(_) => Err(FormError::host("form is busy")),
    };

    match result {
        Ok(()) => last_error.set(None),
        Err(e) => {
            warn!("upload form: {action:?} failed: {e}");
            last_error.set(Some(e.to_string()));
        }
    }
}

impl FormController {
    /// Take over the mount points already rendered into the page.
    pub fn install(cfg: &EnvConfig, last_error: RwSignal<Option<String>>) -> FormResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| FormError::host("no document"))?;
        let debug = cfg.debug;

        let builder: SharedBuilder = Rc::new_cyclic(|weak: &Weak<RefCell<FormBuilder<WebDom>>>| {
            let weak = weak.clone();
            let on_action: Rc<dyn Fn(FormAction)> = Rc::new(move |action: FormAction| {
                if let Some(builder) = weak.upgrade() {
                    run(&builder, action, last_error, debug);
                }
            });
            RefCell::new(FormBuilder::new(WebDom::new(document, on_action)))
        });

        {
            let mut b = builder.borrow_mut();
            b.attach_document()?;
            for _ in 0..cfg.initial_archives {
                b.add_archive()?;
            }
        }

        Ok(Self {
            builder,
            last_error,
            debug,
        })
    }

    pub fn dispatch(&self, action: FormAction) {
        run(&self.builder, action, self.last_error, self.debug);
    }
}

fn section_title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Category => "Categories",
        SectionKind::Human => "Humans",
        SectionKind::Archive => "Archives",
    }
}

fn section_hint(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Category => "Tick \"top\" to mark a top-level category.",
        SectionKind::Human => "First name, optional second name, and role.",
        SectionKind::Archive => "At least one archive is always uploaded.",
    }
}

#[component]
fn RepeatableSection(kind: SectionKind, dispatch: Callback<FormAction>) -> impl IntoView {
    let mount_id = kind.mount_id();
    view! {
        <SectionCard>
            <SectionHeader>
                <SectionTitle>{section_title(kind)}</SectionTitle>
                <div class="flex gap-1">
                    <ControlButton
                        name=format!("{mount_id}BtAdd")
                        intent=ControlIntent::Add
                        on_press=Callback::new(move |()| dispatch.run(FormAction::AddSection(kind)))
                    />
                    <ControlButton
                        name=format!("{mount_id}BtDel")
                        intent=ControlIntent::Remove
                        on_press=Callback::new(move |()| dispatch.run(FormAction::RemoveSection(kind)))
                    />
                </div>
            </SectionHeader>
            <SectionDescription>{section_hint(kind)}</SectionDescription>
            <div id=mount_id class=SECTION_BODY_CLASS></div>
        </SectionCard>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let cfg = EnvConfig::from_window();
    let last_error: RwSignal<Option<String>> = RwSignal::new(None);
    let controller = StoredValue::new_local(None::<FormController>);

    // Mount points only exist once the view is in the document.
    let install_cfg = cfg.clone();
    Effect::new(move |_| {
        if controller.with_value(Option::is_some) {
            return;
        }
        match FormController::install(&install_cfg, last_error) {
            Ok(c) => controller.set_value(Some(c)),
            Err(e) => {
                warn!("upload form: setup failed: {e}");
                last_error.set(Some(e.to_string()));
            }
        }
    });

    let dispatch = Callback::new(move |action: FormAction| {
        controller.with_value(|c| match c {
            Some(c) => c.dispatch(action),
            None => warn!("upload form: {action:?} before setup"),
        });
    });

    view! {
        <form
            method="post"
            enctype="multipart/form-data"
            action=cfg.form_action.clone()
            class="mx-auto flex max-w-3xl flex-col gap-4 px-4 py-8"
        >
            <SectionCard>
                <SectionHeader>
                    <SectionTitle>"Document"</SectionTitle>
                </SectionHeader>
                <SectionDescription>
                    "Characteristics and categories of the uploaded document."
                </SectionDescription>
                <div id=DOCUMENT_LABEL class=SECTION_BODY_CLASS></div>
            </SectionCard>

            {SectionKind::iter()
                .map(|kind| view! { <RepeatableSection kind=kind dispatch=dispatch /> })
                .collect_view()}

            <Show when=move || last_error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    last_error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertTitle>"Nothing changed"</AlertTitle>
                                <AlertDescription class="text-destructive text-xs">
                                    {e}
                                </AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <FormFooter>
                <button
                    type="submit"
                    class="h-9 rounded-md bg-primary px-4 text-sm font-medium text-primary-foreground hover:bg-primary/90"
                >
                    "Upload"
                </button>
            </FormFooter>
        </form>
    }
}
