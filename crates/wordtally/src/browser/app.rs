//! WASM application entry point.
//!
//! One [`WordCounterApp`] owns the page: it recomputes the statistics on
//! every edit and hands them to an [`IncrementalPresenter`]. Each started
//! transition gets its own `setInterval`; a field's previous interval is
//! cleared before the next one is scheduled.

use super::notify;
use super::sink::DomSink;
use super::storage::{DraftStore, Storage};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Document, Event, HtmlElement, HtmlTextAreaElement, KeyboardEvent, Window};
use wordtally_core::actions::{ClearDecision, CopyDecision};
use wordtally_core::sample::{wants_demo, SAMPLE_TEXT};
use wordtally_core::{
    clear_request, copy_request, ActionPolicy, AnimationTicket, EditorCommand,
    IncrementalPresenter, MetricField, MetricsEngine, Modifiers, Notice, ShortcutMap,
    WidgetConfig,
};

/// Id of the editor textarea.
pub const TEXTAREA_ID: &str = "textInput";
/// Id of the clear button.
pub const CLEAR_BUTTON_ID: &str = "clearBtn";
/// Id of the copy button.
pub const COPY_BUTTON_ID: &str = "copyBtn";

const CLEAR_PROMPT: &str = "Are you sure you want to clear all text?";
const RESTORE_PROMPT: &str =
    "We found saved text from your last session. Would you like to restore it?";
const COPIED_LABEL: &str = "<i class=\"fas fa-check\"></i> Copied!";
const COPIED_LABEL_MS: i32 = 2000;
const COPIED_BACKGROUND: &str = "#4caf50";

/// A running `setInterval` and the callback it invokes.
struct Timer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

/// Page state shared by every event handler.
struct Widget {
    window: Window,
    document: Document,
    textarea: HtmlTextAreaElement,
    copy_button: HtmlElement,
    engine: MetricsEngine,
    presenter: IncrementalPresenter<DomSink>,
    /// Indexed by [`MetricField::index`]
    timers: [Option<Timer>; 6],
    policy: ActionPolicy,
    shortcuts: ShortcutMap,
    drafts: Option<DraftStore>,
}

type Shared = Rc<RefCell<Widget>>;

/// Word counter widget bound to the page's editor and statistic elements.
#[wasm_bindgen]
pub struct WordCounterApp {
    shared: Shared,
    clear_button: HtmlElement,
    input_callback: Option<Closure<dyn FnMut(Event)>>,
    clear_callback: Option<Closure<dyn FnMut(Event)>>,
    copy_callback: Option<Closure<dyn FnMut(Event)>>,
    keydown_callback: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    unload_callback: Option<Closure<dyn FnMut(Event)>>,
    autosave: Option<Timer>,
}

#[wasm_bindgen]
impl WordCounterApp {
    /// Attach to the page. `config_toml` overrides the default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<WordCounterApp, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_toml {
            Some(source) => WidgetConfig::from_toml(&source)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?,
            None => WidgetConfig::default(),
        };

        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let textarea = element::<HtmlTextAreaElement>(&document, TEXTAREA_ID)?;
        let clear_button = element::<HtmlElement>(&document, CLEAR_BUTTON_ID)?;
        let copy_button = element::<HtmlElement>(&document, COPY_BUTTON_ID)?;
        let sink = DomSink::new(&document)?.grouped(config.display.group_thousands);

        let drafts = config
            .autosave
            .enabled
            .then(|| DraftStore::new(Storage::local(), config.autosave.key.clone()));

        let shared = Rc::new(RefCell::new(Widget {
            window,
            document,
            textarea,
            copy_button,
            engine: config.engine(),
            presenter: IncrementalPresenter::new(sink, config.animation()),
            timers: std::array::from_fn(|_| None),
            policy: config.actions,
            shortcuts: ShortcutMap::default(),
            drafts,
        }));

        let mut app = Self {
            shared,
            clear_button,
            input_callback: None,
            clear_callback: None,
            copy_callback: None,
            keydown_callback: None,
            unload_callback: None,
            autosave: None,
        };
        app.bind_editor()?;
        app.bind_buttons()?;
        app.bind_shortcuts()?;
        app.load_initial_text()?;
        if config.autosave.enabled {
            app.start_autosave(config.autosave.interval_ms)?;
        }

        refresh(&app.shared);
        Ok(app)
    }

    /// Recompute the statistics for the current editor text.
    pub fn refresh(&self) {
        refresh(&self.shared);
    }

    /// Run the clear command as if the button was pressed.
    pub fn clear(&self) {
        run_command(&self.shared, EditorCommand::Clear);
    }

    /// Run the copy command as if the button was pressed.
    pub fn copy(&self) {
        run_command(&self.shared, EditorCommand::Copy);
    }

    /// Replace the editor text and recompute.
    pub fn set_text(&self, text: &str) {
        self.shared.borrow().textarea.set_value(text);
        refresh(&self.shared);
    }

    /// Current editor text.
    pub fn text(&self) -> String {
        self.shared.borrow().textarea.value()
    }

    /// Statistics for the current editor text as JSON.
    pub fn metrics_json(&self) -> Result<String, JsValue> {
        let widget = self.shared.borrow();
        let metrics = widget.engine.compute(&widget.textarea.value());
        serde_json::to_string(&metrics).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Value currently shown for the statistic with element id `id`.
    pub fn displayed(&self, id: &str) -> Option<usize> {
        let field = MetricField::ALL.into_iter().find(|f| f.element_id() == id)?;
        Some(self.shared.borrow().presenter.displayed(field))
    }

    /// Whether any counter is still moving.
    pub fn is_animating(&self) -> bool {
        self.shared.borrow().presenter.is_animating()
    }

    /// Jump every counter to its final value.
    pub fn finish_animations(&self) {
        let mut widget = self.shared.borrow_mut();
        widget.presenter.finish();
        widget.stop_timers();
    }

    /// Save the draft now.
    pub fn save_draft(&self) {
        save_draft(&self.shared);
    }
}

impl WordCounterApp {
    fn bind_editor(&mut self) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.shared);
        let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(shared) = weak.upgrade() {
                refresh(&shared);
            }
        });
        self.shared
            .borrow()
            .textarea
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
        self.input_callback = Some(cb);
        Ok(())
    }

    fn bind_buttons(&mut self) -> Result<(), JsValue> {
        {
            let widget = self.shared.borrow();
            set_tooltip(&self.clear_button, &widget.shortcuts, EditorCommand::Clear)?;
            set_tooltip(&widget.copy_button, &widget.shortcuts, EditorCommand::Copy)?;
        }

        let clear = command_listener(&self.shared, EditorCommand::Clear);
        self.clear_button
            .add_event_listener_with_callback("click", clear.as_ref().unchecked_ref())?;
        self.clear_callback = Some(clear);

        let copy = command_listener(&self.shared, EditorCommand::Copy);
        self.shared
            .borrow()
            .copy_button
            .add_event_listener_with_callback("click", copy.as_ref().unchecked_ref())?;
        self.copy_callback = Some(copy);
        Ok(())
    }

    fn bind_shortcuts(&mut self) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.shared);
        let cb = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let modifiers = Modifiers::new(e.ctrl_key(), e.alt_key(), e.shift_key(), e.meta_key());
            let command = shared.borrow().shortcuts.resolve(&e.key(), modifiers);
            if let Some(command) = command {
                e.prevent_default();
                run_command(&shared, command);
            }
        });
        self.shared
            .borrow()
            .document
            .add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())?;
        self.keydown_callback = Some(cb);
        Ok(())
    }

    /// Demo text from `?demo`, otherwise an offer to restore the saved draft.
    fn load_initial_text(&self) -> Result<(), JsValue> {
        let widget = self.shared.borrow();
        if wants_demo(&widget.window.location().search()?) {
            widget.textarea.set_value(SAMPLE_TEXT);
            return Ok(());
        }

        let Some(drafts) = &widget.drafts else {
            return Ok(());
        };
        let Some(saved) = drafts.restorable(&widget.textarea.value()) else {
            return Ok(());
        };
        if widget.window.confirm_with_message(RESTORE_PROMPT)? {
            widget.textarea.set_value(&saved);
        } else if let Err(err) = drafts.clear() {
            log_error("Could not clear saved text", &err.to_string());
        }
        Ok(())
    }

    fn start_autosave(&mut self, interval_ms: u64) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.shared);
        let tick = Closure::<dyn FnMut()>::new(move || {
            if let Some(shared) = weak.upgrade() {
                save_draft(&shared);
            }
        });
        let handle = self
            .shared
            .borrow()
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                i32::try_from(interval_ms).unwrap_or(i32::MAX),
            )?;
        self.autosave = Some(Timer {
            handle,
            _callback: tick,
        });

        let weak = Rc::downgrade(&self.shared);
        let unload = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(shared) = weak.upgrade() {
                save_draft(&shared);
            }
        });
        self.shared
            .borrow()
            .window
            .add_event_listener_with_callback("beforeunload", unload.as_ref().unchecked_ref())?;
        self.unload_callback = Some(unload);
        Ok(())
    }
}

impl Drop for WordCounterApp {
    fn drop(&mut self) {
        let mut widget = self.shared.borrow_mut();
        widget.stop_timers();
        if let Some(timer) = self.autosave.take() {
            widget.window.clear_interval_with_handle(timer.handle);
        }

        let detach = |target: &web_sys::EventTarget, event: &str, cb: &js_sys::Function| {
            target.remove_event_listener_with_callback(event, cb).ok();
        };
        if let Some(cb) = &self.input_callback {
            detach(&widget.textarea, "input", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = &self.clear_callback {
            detach(&self.clear_button, "click", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = &self.copy_callback {
            detach(&widget.copy_button, "click", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = &self.keydown_callback {
            detach(&widget.document, "keydown", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = &self.unload_callback {
            detach(&widget.window, "beforeunload", cb.as_ref().unchecked_ref());
        }
    }
}

impl Widget {
    fn stop_timers(&mut self) {
        for timer in self.timers.iter_mut().filter_map(Option::take) {
            self.window.clear_interval_with_handle(timer.handle);
        }
    }
}

// =============================================================================
// Counting
// =============================================================================

fn refresh(shared: &Shared) {
    let tickets = {
        let mut widget = shared.borrow_mut();
        let metrics = widget.engine.compute(&widget.textarea.value());
        widget.presenter.present(&metrics)
    };
    for ticket in tickets {
        schedule(shared, ticket);
    }
}

fn schedule(shared: &Shared, ticket: AnimationTicket) {
    let weak = Rc::downgrade(shared);
    let callback = Closure::<dyn FnMut()>::new(move || tick(&weak, ticket));

    let mut widget = shared.borrow_mut();
    let slot = ticket.field.index();
    if let Some(previous) = widget.timers[slot].take() {
        widget.window.clear_interval_with_handle(previous.handle);
    }

    let interval = widget.presenter.config().step_interval().as_millis() as i32;
    let scheduled = widget
        .window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval,
        );
    match scheduled {
        Ok(handle) => {
            widget.timers[slot] = Some(Timer {
                handle,
                _callback: callback,
            });
        }
        Err(err) => {
            web_sys::console::error_2(&JsValue::from_str("Could not schedule counter"), &err);
            while !widget.presenter.step(ticket).is_done() {}
        }
    }
}

fn tick(weak: &Weak<RefCell<Widget>>, ticket: AnimationTicket) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let mut widget = shared.borrow_mut();
    if widget.presenter.step(ticket).is_done() {
        // the callback stays owned by the slot until the field is rescheduled
        if let Some(timer) = &widget.timers[ticket.field.index()] {
            widget.window.clear_interval_with_handle(timer.handle);
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

fn command_listener(shared: &Shared, command: EditorCommand) -> Closure<dyn FnMut(Event)> {
    let weak = Rc::downgrade(shared);
    Closure::new(move |_: Event| {
        if let Some(shared) = weak.upgrade() {
            run_command(&shared, command);
        }
    })
}

fn run_command(shared: &Shared, command: EditorCommand) {
    match command {
        EditorCommand::Clear => clear_text(shared),
        EditorCommand::Copy => copy_text(shared),
    }
}

fn clear_text(shared: &Shared) {
    let (decision, window, document) = {
        let widget = shared.borrow();
        let decision = clear_request(&widget.textarea.value(), &widget.policy);
        (decision, widget.window.clone(), widget.document.clone())
    };

    match decision {
        ClearDecision::Rejected(notice) => {
            notify::show_or_log(&document, &notice);
            return;
        }
        ClearDecision::NeedsConfirmation => {
            if !window.confirm_with_message(CLEAR_PROMPT).unwrap_or(false) {
                return;
            }
        }
        ClearDecision::Clear => {}
    }

    {
        let widget = shared.borrow();
        widget.textarea.set_value("");
        widget.textarea.focus().ok();
    }
    refresh(shared);
    notify::show_or_log(&document, &Notice::cleared());
}

fn copy_text(shared: &Shared) {
    let (text, window, document, button) = {
        let widget = shared.borrow();
        (
            widget.textarea.value(),
            widget.window.clone(),
            widget.document.clone(),
            widget.copy_button.clone(),
        )
    };

    if let CopyDecision::Rejected(notice) = copy_request(&text) {
        notify::show_or_log(&document, &notice);
        return;
    }

    let promise = window.navigator().clipboard().write_text(&text);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => {
                notify::show_or_log(&document, &Notice::copied());
                flash_copied(&window, &button);
            }
            Err(err) => {
                web_sys::console::error_2(&JsValue::from_str("Copy failed:"), &err);
                notify::show_or_log(&document, &Notice::copy_failed());
            }
        }
    });
}

/// Show the copy confirmation on the button for a moment.
fn flash_copied(window: &Window, button: &HtmlElement) {
    let restore = Closure::once_into_js(mark_copied(button.clone()));
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            restore.unchecked_ref(),
            COPIED_LABEL_MS,
        )
        .ok();
}

/// Swap in the check mark label and green background. The returned closure
/// puts back the label and inline style the button had before.
fn mark_copied(button: HtmlElement) -> impl FnOnce() + 'static {
    let label = button.inner_html();
    let style = button.get_attribute("style");

    button.set_inner_html(COPIED_LABEL);
    let flashed = match &style {
        Some(s) if !s.trim().is_empty() => format!(
            "{}; background: {COPIED_BACKGROUND};",
            s.trim_end().trim_end_matches(';')
        ),
        _ => format!("background: {COPIED_BACKGROUND};"),
    };
    button.set_attribute("style", &flashed).ok();

    move || {
        button.set_inner_html(&label);
        match style {
            Some(s) => button.set_attribute("style", &s).ok(),
            None => button.remove_attribute("style").ok(),
        };
    }
}

// =============================================================================
// Drafts
// =============================================================================

fn save_draft(shared: &Shared) {
    let widget = shared.borrow();
    let Some(drafts) = &widget.drafts else {
        return;
    };
    match drafts.save(&widget.textarea.value()) {
        Ok(true) => log("Text auto-saved"),
        Ok(false) => {}
        Err(err) => log_error("Auto-save failed", &err.to_string()),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("Element '{id}' not found"))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element '{id}' has the wrong type")))
}

/// Advertise the command's shortcut unless the page set its own title.
fn set_tooltip(
    button: &HtmlElement,
    shortcuts: &ShortcutMap,
    command: EditorCommand,
) -> Result<(), JsValue> {
    if button.has_attribute("title") {
        return Ok(());
    }
    button.set_attribute("title", &shortcuts.tooltip(command))
}

fn log_error(context: &str, detail: &str) {
    web_sys::console::error_1(&JsValue::from_str(&format!("{context}: {detail}")));
}

/// Initialize WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console.
#[wasm_bindgen]
pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn button() -> HtmlElement {
        let document = window().and_then(|w| w.document()).expect("document");
        let button = document.create_element("button").expect("button");
        button.set_inner_html("Copy");
        button.dyn_into().expect("html element")
    }

    #[wasm_bindgen_test]
    fn test_copied_flash_sets_and_resets_background() {
        let button = button();
        let restore = mark_copied(button.clone());
        assert_eq!(button.inner_html(), COPIED_LABEL);
        let style = button.get_attribute("style").expect("style");
        assert!(style.contains("background: #4caf50"));

        restore();
        assert_eq!(button.inner_html(), "Copy");
        assert_eq!(button.get_attribute("style"), None);
    }

    #[wasm_bindgen_test]
    fn test_copied_flash_keeps_existing_style() {
        let button = button();
        button.set_attribute("style", "color: red").expect("style");
        let restore = mark_copied(button.clone());
        assert!(button
            .get_attribute("style")
            .is_some_and(|s| s.starts_with("color: red") && s.contains("#4caf50")));

        restore();
        assert_eq!(button.get_attribute("style").as_deref(), Some("color: red"));
    }
}
