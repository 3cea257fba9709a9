use crate::catalog::ResultKey;
use crate::constants::BALANCED_LABEL;
use crate::error::QuizError;
use fnv::FnvHashMap;

/// One question screen of the quiz. Static and immutable.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionStep {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub min: f32,
    pub max: f32,
    pub default_value: f32,
    pub left_label: &'static str,
    pub right_label: &'static str,
}

/// The three clickable labels under a slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStop {
    Left,
    Middle,
    Right,
}

impl LabelStop {
    pub const ALL: [LabelStop; 3] = [LabelStop::Left, LabelStop::Middle, LabelStop::Right];
}

impl QuestionStep {
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default_value;
        }
        value.clamp(self.min, self.max)
    }

    /// Nearest integer inside the range.
    #[inline]
    pub fn snap(&self, value: f32) -> f32 {
        self.clamp(self.clamp(value).round())
    }

    /// Handle position in [0, 1].
    pub fn fraction(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / span
    }

    pub fn stop_value(&self, stop: LabelStop) -> f32 {
        match stop {
            LabelStop::Left => self.min,
            LabelStop::Middle => ((self.min + self.max) * 0.5).round(),
            LabelStop::Right => self.max,
        }
    }

    pub fn label(&self, stop: LabelStop) -> &'static str {
        match stop {
            LabelStop::Left => self.left_label,
            LabelStop::Middle => BALANCED_LABEL,
            LabelStop::Right => self.right_label,
        }
    }

    /// Label highlighted for `value` (the rounded value's stop).
    pub fn active_stop(&self, value: f32) -> LabelStop {
        let snapped = self.snap(value);
        LabelStop::ALL
            .into_iter()
            .min_by(|a, b| {
                let da = (self.stop_value(*a) - snapped).abs();
                let db = (self.stop_value(*b) - snapped).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(LabelStop::Middle)
    }
}

pub static STEPS: [QuestionStep; 3] = [
    QuestionStep {
        id: "projection",
        title: "Scent Projection",
        subtitle: "How noticeable should your presence be?",
        min: 1.0,
        max: 3.0,
        default_value: 2.0,
        left_label: "Intimate",
        right_label: "Bold",
    },
    QuestionStep {
        id: "occasion",
        title: "Ideal Occasion",
        subtitle: "Where does your story take place?",
        min: 1.0,
        max: 3.0,
        default_value: 2.0,
        left_label: "Daylight",
        right_label: "Midnight",
    },
    QuestionStep {
        id: "character",
        title: "Dominant Note",
        subtitle: "The soul of the fragrance",
        min: 1.0,
        max: 3.0,
        default_value: 2.0,
        left_label: "Clean",
        right_label: "Spicy",
    },
];

/// Step ids that take part in scoring.
pub const SCORED_STEPS: [&str; 3] = ["projection", "occasion", "character"];

/// Current value per step. Missing entries read as the step default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnswerSet {
    values: FnvHashMap<&'static str, f32>,
}

impl AnswerSet {
    pub fn value(&self, step: &QuestionStep) -> f32 {
        self.values
            .get(step.id)
            .copied()
            .unwrap_or(step.default_value)
    }

    /// Raw lookup by id; `None` for unknown ids and untouched steps.
    pub fn get(&self, id: &str) -> Option<f32> {
        self.values.get(id).copied()
    }

    fn set(&mut self, step: &QuestionStep, value: f32) {
        self.values.insert(step.id, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sum of the rounded scored answers mapped onto the three fragrances.
/// Boundaries are inclusive to the lower bucket: 3..=4 is A, 5..=7 is B,
/// 8..=9 is C.
pub fn compute_result(steps: &[QuestionStep], answers: &AnswerSet) -> ResultKey {
    let total: i32 = SCORED_STEPS
        .iter()
        .map(|id| {
            steps
                .iter()
                .find(|s| s.id == *id)
                .map(|s| answers.value(s))
                .or_else(|| answers.get(id))
                .unwrap_or(0.0)
                .round() as i32
        })
        .sum();
    result_for_total(total)
}

#[inline]
pub fn result_for_total(total: i32) -> ResultKey {
    if total <= 4 {
        ResultKey::A
    } else if total <= 7 {
        ResultKey::B
    } else {
        ResultKey::C
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Question(usize),
    Computing,
    Result(ResultKey),
}

/// Issued when a step exit starts; hand it back once the exit animation is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitTicket {
    pub direction: Direction,
    generation: u64,
}

/// Issued on entering `Computing`; hand it back after the scoring delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTicket {
    generation: u64,
}

/// Read-only view of the engine for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub step_index: usize,
    pub step_count: usize,
    pub step: Option<QuestionStep>,
    pub value: Option<f32>,
    pub exiting: Option<Direction>,
    pub can_go_back: bool,
}

/// Linear question flow with terminal scoring.
///
/// `Question(i) -> Question(i+1) -> .. -> Computing -> Result`, with `Back`
/// moves between questions and `restart` from anywhere. Moves are two-phase:
/// `advance`/`retreat` start an exit and return an [`ExitTicket`], and
/// `finish_exit` applies the move. While an exit is in flight further moves
/// are ignored. Every restart bumps a generation counter so tickets issued
/// before it are refused.
#[derive(Clone, Debug)]
pub struct QuizEngine {
    steps: &'static [QuestionStep],
    answers: AnswerSet,
    phase: QuizPhase,
    exiting: Option<Direction>,
    generation: u64,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new(&STEPS)
    }
}

impl QuizEngine {
    pub fn new(steps: &'static [QuestionStep]) -> Self {
        Self {
            steps,
            answers: AnswerSet::default(),
            phase: QuizPhase::Question(0),
            exiting: None,
            generation: 0,
        }
    }

    pub fn steps(&self) -> &'static [QuestionStep] {
        self.steps
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// `N` once past the last question.
    pub fn step_index(&self) -> usize {
        match self.phase {
            QuizPhase::Question(i) => i,
            QuizPhase::Computing | QuizPhase::Result(_) => self.steps.len(),
        }
    }

    pub fn is_computing(&self) -> bool {
        self.phase == QuizPhase::Computing
    }

    pub fn result(&self) -> Option<ResultKey> {
        match self.phase {
            QuizPhase::Result(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting.is_some()
    }

    pub fn current_step(&self) -> Option<&'static QuestionStep> {
        match self.phase {
            QuizPhase::Question(i) => self.steps.get(i),
            _ => None,
        }
    }

    pub fn value(&self, step_id: &str) -> Option<f32> {
        self.find(step_id).map(|s| self.answers.value(s))
    }

    fn find(&self, step_id: &str) -> Option<&'static QuestionStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    fn active(&self, step_id: &str) -> Result<&'static QuestionStep, QuizError> {
        let step = self
            .find(step_id)
            .ok_or_else(|| QuizError::UnknownStep(step_id.to_string()))?;
        match self.current_step() {
            Some(cur) if cur.id == step.id => Ok(step),
            cur => Err(QuizError::InactiveStep {
                requested: step_id.to_string(),
                active: cur.map(|s| s.id),
            }),
        }
    }

    /// Store a continuous value for the active step, clamped to its range.
    /// Returns the stored value.
    pub fn set_answer(&mut self, step_id: &str, value: f32) -> Result<f32, QuizError> {
        let step = self.active(step_id)?;
        let v = step.clamp(value);
        self.answers.set(step, v);
        Ok(v)
    }

    /// Snap the active step's value to the nearest integer in range.
    pub fn commit_answer(&mut self, step_id: &str) -> Result<f32, QuizError> {
        let step = self.active(step_id)?;
        let v = step.snap(self.answers.value(step));
        self.answers.set(step, v);
        Ok(v)
    }

    pub fn choose_label(&mut self, step_id: &str, stop: LabelStop) -> Result<f32, QuizError> {
        let step = self.active(step_id)?;
        self.set_answer(step_id, step.stop_value(stop))?;
        self.commit_answer(step_id)
    }

    pub fn advance(&mut self) -> Option<ExitTicket> {
        match self.phase {
            QuizPhase::Question(_) if self.exiting.is_none() => {
                Some(self.begin_exit(Direction::Forward))
            }
            _ => {
                log::debug!("[quiz] advance ignored in {:?}", self.phase);
                None
            }
        }
    }

    pub fn retreat(&mut self) -> Option<ExitTicket> {
        match self.phase {
            QuizPhase::Question(i) if i > 0 && self.exiting.is_none() => {
                Some(self.begin_exit(Direction::Back))
            }
            _ => {
                log::debug!("[quiz] retreat ignored in {:?}", self.phase);
                None
            }
        }
    }

    fn begin_exit(&mut self, direction: Direction) -> ExitTicket {
        self.exiting = Some(direction);
        ExitTicket {
            direction,
            generation: self.generation,
        }
    }

    /// Apply the move started by `ticket`. Leaving the last question enters
    /// `Computing` and returns the ticket for the reveal.
    pub fn finish_exit(&mut self, ticket: ExitTicket) -> Option<RevealTicket> {
        if ticket.generation != self.generation || self.exiting != Some(ticket.direction) {
            log::debug!("[quiz] stale exit ticket dropped");
            return None;
        }
        self.exiting = None;
        let QuizPhase::Question(i) = self.phase else {
            return None;
        };
        match ticket.direction {
            Direction::Forward if i + 1 < self.steps.len() => {
                self.phase = QuizPhase::Question(i + 1);
                None
            }
            Direction::Forward => {
                self.phase = QuizPhase::Computing;
                log::info!("[quiz] computing");
                Some(RevealTicket {
                    generation: self.generation,
                })
            }
            Direction::Back => {
                self.phase = QuizPhase::Question(i.saturating_sub(1));
                None
            }
        }
    }

    /// Leave `Computing` with the scored result. Refused if the quiz was
    /// restarted after the ticket was issued.
    pub fn reveal(&mut self, ticket: RevealTicket) -> Option<ResultKey> {
        if ticket.generation != self.generation || self.phase != QuizPhase::Computing {
            log::debug!("[quiz] stale reveal dropped");
            return None;
        }
        let result = self.compute_result();
        self.phase = QuizPhase::Result(result);
        log::info!("[quiz] result={} ({})", result, result.product().name);
        Some(result)
    }

    pub fn compute_result(&self) -> ResultKey {
        compute_result(self.steps, &self.answers)
    }

    pub fn restart(&mut self) {
        self.answers = AnswerSet::default();
        self.phase = QuizPhase::Question(0);
        self.exiting = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let step = self.current_step();
        QuizSnapshot {
            phase: self.phase,
            step_index: self.step_index(),
            step_count: self.steps.len(),
            step: step.cloned(),
            value: step.map(|s| self.answers.value(s)),
            exiting: self.exiting,
            can_go_back: matches!(self.phase, QuizPhase::Question(i) if i > 0),
        }
    }
}
