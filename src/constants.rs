// Element ids, class names and visual constants shared by the web frontend.

// Mount points
pub const APP_ROOT_ID: &str = "app-root";
pub const CANVAS_ID: &str = "warp-canvas";

// Home page
pub const DISCOVERY_HUB_ID: &str = "discovery-hub";
pub const BEGIN_JOURNEY_ID: &str = "begin-journey";
pub const BROWSE_COLLECTION_ID: &str = "browse-collection";
pub const HUB_INTRO_ID: &str = "hub-intro";

// Quiz page
pub const QUIZ_MAIN_ID: &str = "quiz-main";
pub const QUIZ_STAGE_ID: &str = "quiz-stage";
pub const QUIZ_BACK_ID: &str = "quiz-back";
pub const QUIZ_PANEL_ID: &str = "quiz-panel";
pub const QUIZ_SLIDER_ID: &str = "quiz-slider";
pub const QUIZ_BEAM_ID: &str = "quiz-beam";
pub const QUIZ_HANDLE_ID: &str = "quiz-handle";
pub const QUIZ_NEXT_ID: &str = "quiz-next";
pub const QUIZ_PREV_ID: &str = "quiz-prev";
pub const QUIZ_LABEL_ID_PREFIX: &str = "quiz-label-"; // + left|middle|right

// Result showcase
pub const RETAKE_ID: &str = "showcase-retake";
pub const SHOWCASE_BACK_ID: &str = "showcase-back";
pub const SHOWCASE_DISCOVER_ID: &str = "showcase-discover";

// Collection page
pub const COLLECTION_QUIZ_ID: &str = "collection-quiz";
pub const COLLECTION_HOME_ID: &str = "collection-home";

// State classes (transitions live in the stylesheet)
pub const EXITING_FORWARD_CLASS: &str = "is-exiting-forward"; // fade, rise, blur
pub const EXITING_BACK_CLASS: &str = "is-exiting-back"; // fade, sink, blur
pub const LEAVING_CLASS: &str = "is-leaving"; // page-level exit during a handoff
pub const DRAGGING_CLASS: &str = "is-dragging"; // disables slider easing
pub const LABEL_ACTIVE_CLASS: &str = "label-active";
pub const HIDDEN_CLASS: &str = "hidden";
pub const CURTAIN_LEAVING_CLASS: &str = "curtain-leaving";

// Background
pub const BACKGROUND_COLOR: &str = "#0c0a09";
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const FIELD_SEED: u64 = 0x6d61_6973_6f6e; // fixed layout across reloads
pub const MAX_FRAME_DT: f32 = 0.1; // seconds; clamps the step after a hidden tab
