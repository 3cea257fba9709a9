use crate::constants::*;
use crate::dom::{self, Listeners};
use crate::markup;
use crate::router::App;
use crate::style;
use maison_core::{
    HandoffTimings, Journey, LabelStop, NavigationHandoff, Navigator, QuizEngine, QuizPhase,
    QuizSession, QuizSnapshot, QuizTimings, Route, TimerScope,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use web_sys as web;

/// The quiz route: quiz session and its view. The router mounts the entry
/// coordinator next to it.
pub struct QuizPage {
    view: Rc<QuizView>,
    _listeners: Listeners,
}

impl QuizPage {
    pub fn mount(app: &Rc<App>) -> anyhow::Result<Self> {
        app.root.set_inner_html(&markup::quiz_page());

        let view = QuizView::new(app);
        let session_view = Rc::downgrade(&view);
        view.session.on_change(move |snap| {
            if let Some(v) = session_view.upgrade() {
                v.apply(snap);
            }
        });
        view.render();

        let mut listeners = Listeners::new();
        let back = view.clone();
        listeners.on_click(&app.document, QUIZ_BACK_ID, move || {
            if markup::back_button_visible(back.session.snapshot().phase) {
                back.leave();
            }
        });

        log::info!(
            "[page] quiz mounted (start_at_warp={})",
            app.signal.start_at_warp()
        );
        Ok(Self {
            view,
            _listeners: listeners,
        })
    }
}

impl Drop for QuizPage {
    fn drop(&mut self) {
        // detach panel handlers before the stage markup goes away
        self.view.panel.borrow_mut().clear();
        log::debug!("[page] quiz unmounted");
    }
}

struct QuizView {
    me: Weak<QuizView>,
    document: web::Document,
    session: QuizSession,
    handoff: NavigationHandoff,
    navigator: Rc<dyn Navigator>,
    rendered: RefCell<Option<QuizSnapshot>>,
    panel: RefCell<Listeners>,
    deferred: TimerScope,
    render_queued: Cell<bool>,
    dragging: Cell<bool>,
}

impl QuizView {
    fn new(app: &Rc<App>) -> Rc<Self> {
        Rc::new_cyclic(|me| Self {
            me: me.clone(),
            document: app.document.clone(),
            session: QuizSession::new(
                QuizEngine::default(),
                app.scheduler.clone(),
                QuizTimings::default(),
            ),
            handoff: NavigationHandoff::new(
                app.signal.clone(),
                app.navigator.clone(),
                app.scheduler.clone(),
                HandoffTimings::default(),
            ),
            navigator: app.navigator.clone(),
            rendered: RefCell::new(None),
            panel: RefCell::new(Listeners::new()),
            deferred: TimerScope::new(app.scheduler.clone()),
            render_queued: Cell::new(false),
            dragging: Cell::new(false),
        })
    }

    /// Patch the DOM in place, or queue a full render when the phase moved.
    fn apply(&self, snap: &QuizSnapshot) {
        let previous = match self.rendered.borrow().as_ref() {
            Some(prev) if prev.phase == snap.phase => prev.clone(),
            _ => {
                self.queue_render();
                return;
            }
        };
        if previous.exiting != snap.exiting {
            if let Some(panel) = self.document.get_element_by_id(QUIZ_PANEL_ID) {
                for class in [EXITING_FORWARD_CLASS, EXITING_BACK_CLASS] {
                    dom::set_class(&panel, class, false);
                }
                if let Some(direction) = snap.exiting {
                    dom::set_class(&panel, markup::exit_class(direction), true);
                }
            }
        }
        if previous.value != snap.value {
            self.update_slider(snap);
        }
        *self.rendered.borrow_mut() = Some(snap.clone());
    }

    // Rendering replaces elements whose listeners may be running; defer it.
    fn queue_render(&self) {
        if self.render_queued.replace(true) {
            return;
        }
        let me = self.me.clone();
        self.deferred.schedule(
            Duration::ZERO,
            Box::new(move || {
                if let Some(view) = me.upgrade() {
                    view.render_queued.set(false);
                    view.render();
                }
            }),
        );
    }

    fn render(&self) {
        let snap = self.session.snapshot();
        if let Some(stage) = self.document.get_element_by_id(QUIZ_STAGE_ID) {
            stage.set_inner_html(&markup::stage(&snap));
        }
        self.dragging.set(false);
        if let Some(back) = self.document.get_element_by_id(QUIZ_BACK_ID) {
            dom::set_class(&back, HIDDEN_CLASS, !markup::back_button_visible(snap.phase));
        }
        let listeners = match snap.phase {
            QuizPhase::Question(_) => self.wire_question(&snap),
            QuizPhase::Result(_) => self.wire_showcase(&snap),
            QuizPhase::Computing => Listeners::new(),
        };
        *self.panel.borrow_mut() = listeners;
        log::debug!("[quiz] render {:?}", snap.phase);
        *self.rendered.borrow_mut() = Some(snap);
    }

    fn wire_question(&self, snap: &QuizSnapshot) -> Listeners {
        let mut listeners = Listeners::new();
        let Some(step) = snap.step.as_ref() else {
            return listeners;
        };
        let id = step.id;
        let doc = &self.document;

        if let Some(slider) = dom::element::<web::HtmlInputElement>(doc, QUIZ_SLIDER_ID) {
            let me = self.me.clone();
            let input = slider.clone();
            listeners.on(&slider, "input", move |_| {
                if let Some(view) = me.upgrade() {
                    if let Err(e) = view.session.set_answer(id, input.value_as_number() as f32) {
                        log::warn!("[quiz] {}", e);
                    }
                }
            });
            let me = self.me.clone();
            listeners.on(&slider, "pointerdown", move |_| {
                if let Some(view) = me.upgrade() {
                    view.set_dragging(true);
                }
            });
            for event in ["pointerup", "change"] {
                let me = self.me.clone();
                listeners.on(&slider, event, move |_| {
                    if let Some(view) = me.upgrade() {
                        view.set_dragging(false);
                        if let Err(e) = view.session.commit_answer(id) {
                            log::warn!("[quiz] {}", e);
                        }
                    }
                });
            }
        }
        for stop in LabelStop::ALL {
            let me = self.me.clone();
            listeners.on_click(doc, &markup::label_id(stop), move || {
                if let Some(view) = me.upgrade() {
                    if let Err(e) = view.session.choose_label(id, stop) {
                        log::warn!("[quiz] {}", e);
                    }
                }
            });
        }
        let me = self.me.clone();
        listeners.on_click(doc, QUIZ_NEXT_ID, move || {
            if let Some(view) = me.upgrade() {
                view.session.advance();
            }
        });
        let me = self.me.clone();
        listeners.on_click(doc, QUIZ_PREV_ID, move || {
            if let Some(view) = me.upgrade() {
                view.session.retreat();
            }
        });
        listeners
    }

    fn wire_showcase(&self, snap: &QuizSnapshot) -> Listeners {
        let mut listeners = Listeners::new();
        let QuizPhase::Result(key) = snap.phase else {
            return listeners;
        };
        let doc = &self.document;
        let navigator = self.navigator.clone();
        listeners.on_click(doc, SHOWCASE_DISCOVER_ID, move || {
            navigator.navigate(&Route::collection(Some(key.product_key())));
        });
        let me = self.me.clone();
        listeners.on_click(doc, RETAKE_ID, move || {
            if let Some(view) = me.upgrade() {
                view.session.restart();
            }
        });
        let me = self.me.clone();
        listeners.on_click(doc, SHOWCASE_BACK_ID, move || {
            if let Some(view) = me.upgrade() {
                view.leave();
            }
        });
        listeners
    }

    fn set_dragging(&self, on: bool) {
        self.dragging.set(on);
        if let Some(panel) = self.document.get_element_by_id(QUIZ_PANEL_ID) {
            dom::set_class(&panel, DRAGGING_CLASS, on);
        }
    }

    fn update_slider(&self, snap: &QuizSnapshot) {
        let (Some(step), Some(value)) = (snap.step.as_ref(), snap.value) else {
            return;
        };
        let pos = style::percent(step.fraction(value));
        if let Some(beam) = dom::element::<web::HtmlElement>(&self.document, QUIZ_BEAM_ID) {
            dom::set_style(&beam, "width", &pos);
        }
        if let Some(handle) = dom::element::<web::HtmlElement>(&self.document, QUIZ_HANDLE_ID) {
            dom::set_style(&handle, "left", &pos);
        }
        if !self.dragging.get() {
            if let Some(input) = dom::element::<web::HtmlInputElement>(&self.document, QUIZ_SLIDER_ID) {
                input.set_value_as_number(value as f64);
            }
        }
        let active = step.active_stop(value);
        for stop in LabelStop::ALL {
            if let Some(label) = self.document.get_element_by_id(&markup::label_id(stop)) {
                dom::set_class(&label, LABEL_ACTIVE_CLASS, stop == active);
            }
        }
    }

    /// Return journey to the discovery hub.
    fn leave(&self) {
        if self.handoff.begin(Journey::back_home()) {
            if let Some(main) = self.document.get_element_by_id(QUIZ_MAIN_ID) {
                dom::set_class(&main, LEAVING_CLASS, true);
            }
        }
    }
}
