// Page markup, built as plain strings.

use crate::constants::*;
use crate::style::percent;
use maison_core::constants::{CURTAIN_ID, SLIDER_STEP};
use maison_core::{
    collection, Direction, LabelStop, ProductKey, QuestionStep, QuizPhase, QuizSnapshot, ResultKey,
};
use std::fmt::Write;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn label_id(stop: LabelStop) -> String {
    let suffix = match stop {
        LabelStop::Left => "left",
        LabelStop::Middle => "middle",
        LabelStop::Right => "right",
    };
    format!("{QUIZ_LABEL_ID_PREFIX}{suffix}")
}

#[inline]
pub fn exit_class(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => EXITING_FORWARD_CLASS,
        Direction::Back => EXITING_BACK_CLASS,
    }
}

/// The page-level back button belongs to the questions only; the result
/// showcase carries its own and `Computing` cannot be left.
#[inline]
pub fn back_button_visible(phase: QuizPhase) -> bool {
    matches!(phase, QuizPhase::Question(_))
}

/// Zero-padded "01 / 03" counter.
pub fn step_counter(index: usize, count: usize) -> String {
    format!("{:02} / {:02}", index + 1, count)
}

pub fn home_page() -> String {
    format!(
        r#"<main class="home">
  <section class="hero">
    <p class="eyebrow">Maison des Rêves</p>
    <h1>Fragrances written like memories</h1>
  </section>
  <section id="{hub}" class="discovery-hub">
    <div id="{intro}" class="hub-intro">
      <h2>Find your signature</h2>
      <p>Three questions. One fragrance that speaks for you.</p>
      <button id="{begin}" class="btn-primary" type="button">Begin Journey</button>
      <button id="{browse}" class="btn-link" type="button">Browse the collection</button>
    </div>
  </section>
</main>"#,
        hub = DISCOVERY_HUB_ID,
        intro = HUB_INTRO_ID,
        begin = BEGIN_JOURNEY_ID,
        browse = BROWSE_COLLECTION_ID,
    )
}

pub fn quiz_page() -> String {
    format!(
        r#"<div id="{curtain}" class="static-curtain"></div>
<main id="{main}" class="quiz">
  <button id="{back}" class="quiz-back" type="button">&larr; Maison</button>
  <div id="{stage}" class="quiz-stage"></div>
</main>"#,
        curtain = CURTAIN_ID,
        main = QUIZ_MAIN_ID,
        back = QUIZ_BACK_ID,
        stage = QUIZ_STAGE_ID,
    )
}

/// Body of the quiz stage for the current phase.
pub fn stage(snapshot: &QuizSnapshot) -> String {
    match (&snapshot.phase, &snapshot.step) {
        (QuizPhase::Question(_), Some(step)) => question_panel(
            step,
            snapshot.value.unwrap_or(step.default_value),
            snapshot.step_index,
            snapshot.step_count,
            snapshot.can_go_back,
        ),
        (QuizPhase::Result(key), _) => showcase(*key),
        _ => computing_panel(),
    }
}

pub fn question_panel(
    step: &QuestionStep,
    value: f32,
    index: usize,
    count: usize,
    can_go_back: bool,
) -> String {
    let fraction = percent(step.fraction(value));
    let active = step.active_stop(value);
    let mut labels = String::new();
    for stop in LabelStop::ALL {
        let class = if stop == active {
            format!("quiz-label {LABEL_ACTIVE_CLASS}")
        } else {
            "quiz-label".to_string()
        };
        _ = write!(
            labels,
            r#"<button id="{}" class="{}" type="button">{}</button>"#,
            label_id(stop),
            class,
            escape(step.label(stop)),
        );
    }
    let prev = if can_go_back {
        format!(r#"<button id="{QUIZ_PREV_ID}" class="btn-link" type="button">Previous</button>"#)
    } else {
        String::new()
    };
    let next_label = if index + 1 >= count { "Reveal" } else { "Next" };
    format!(
        r#"<section id="{panel}" class="quiz-panel" data-step="{id}">
  <p class="quiz-counter">{counter}</p>
  <h2>{title}</h2>
  <p class="quiz-subtitle">{subtitle}</p>
  <div class="quiz-track">
    <div id="{beam}" class="quiz-beam" style="width:{fraction}"></div>
    <div id="{handle}" class="quiz-handle" style="left:{fraction}"></div>
    <input id="{slider}" type="range" min="{min}" max="{max}" step="{step_size}" value="{value}" aria-label="{title}">
  </div>
  <div class="quiz-labels">{labels}</div>
  <nav class="quiz-nav">{prev}<button id="{next}" class="btn-primary" type="button">{next_label}</button></nav>
</section>"#,
        panel = QUIZ_PANEL_ID,
        id = step.id,
        counter = step_counter(index, count),
        title = escape(step.title),
        subtitle = escape(step.subtitle),
        beam = QUIZ_BEAM_ID,
        handle = QUIZ_HANDLE_ID,
        slider = QUIZ_SLIDER_ID,
        min = step.min,
        max = step.max,
        step_size = SLIDER_STEP,
        value = value,
        next = QUIZ_NEXT_ID,
    )
}

pub fn computing_panel() -> String {
    r#"<section class="quiz-computing" aria-live="polite">
  <div class="spinner"></div>
  <p>Composing your signature&hellip;</p>
</section>"#
        .to_string()
}

pub fn showcase(result: ResultKey) -> String {
    let key = result.product_key();
    let product = key.product();
    format!(
        r#"<section class="showcase" data-result="{result}" style="--accent:{accent}">
  <p class="eyebrow">Your signature</p>
  <h2>{name}</h2>
  <p class="tagline">{tagline}</p>
  <p class="story">{story}</p>
  {notes}
  <p class="price">{price} <span>{volume}</span></p>
  <nav class="showcase-nav">
    <button id="{discover}" class="btn-primary" type="button">Discover</button>
    <button id="{retake}" class="btn-link" type="button">Retake</button>
    <button id="{back}" class="btn-link" type="button">Return to the Maison</button>
  </nav>
</section>"#,
        accent = product.accent_color,
        name = escape(product.name),
        tagline = escape(product.tagline),
        story = escape(product.story),
        notes = notes_list(key),
        price = escape(product.price),
        volume = escape(product.volume),
        discover = SHOWCASE_DISCOVER_ID,
        retake = RETAKE_ID,
        back = SHOWCASE_BACK_ID,
    )
}

fn notes_list(key: ProductKey) -> String {
    let notes = key.product().notes;
    format!(
        r#"<dl class="notes"><dt>Top</dt><dd>{}</dd><dt>Heart</dt><dd>{}</dd><dt>Base</dt><dd>{}</dd></dl>"#,
        escape(notes.top),
        escape(notes.heart),
        escape(notes.base),
    )
}

pub fn collection_page(selected: Option<ProductKey>) -> String {
    let mut cards = String::new();
    for (key, product) in collection() {
        let class = if Some(key) == selected {
            "product-card is-selected"
        } else {
            "product-card"
        };
        _ = write!(
            cards,
            r#"<article class="{class}" data-product="{id}" style="--accent:{accent}">
  <h3>{name}</h3>
  <p class="tagline">{tagline}</p>
  <p>{description}</p>
  {notes}
  <p class="price">{price} <span>{volume}</span></p>
</article>"#,
            id = product.id,
            accent = product.accent_color,
            name = escape(product.name),
            tagline = escape(product.tagline),
            description = escape(product.description),
            notes = notes_list(key),
            price = escape(product.price),
            volume = escape(product.volume),
        );
    }
    format!(
        r#"<main class="collection">
  <header>
    <button id="{home}" class="btn-link" type="button">&larr; Maison</button>
    <h1>The Collection</h1>
  </header>
  <div class="product-grid">{cards}</div>
  <button id="{quiz}" class="btn-primary" type="button">Find your signature</button>
</main>"#,
        home = COLLECTION_HOME_ID,
        quiz = COLLECTION_QUIZ_ID,
    )
}
