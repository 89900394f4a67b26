//! Animated presentation of metric values.
//!
//! [`IncrementalPresenter`] keeps one [`PresentedValue`] per metric field and
//! moves the displayed number towards the latest computed value in a fixed
//! number of steps. Every write goes through an injected [`DisplaySink`], so
//! the presenter knows nothing about the rendering surface.
//!
//! Time is supplied by the host in one of two ways:
//!
//! - timer driven: [`IncrementalPresenter::present`] returns an
//!   [`AnimationTicket`] per started transition and the host calls
//!   [`IncrementalPresenter::step`] with it on every tick. The host must
//!   cancel the timer of the previous ticket for that field before
//!   scheduling the new one.
//! - frame driven: the host calls [`IncrementalPresenter::advance`] with the
//!   elapsed time, and due steps are taken for every field.
//!
//! Each field carries a generation counter. Presenting new metrics bumps it
//! and replaces the in-flight animation, so a ticket from a superseded
//! transition is rejected and can never write a stale value.
//!
//! # Examples
//!
//! ```
//! use wordtally_core::{compute, AnimationConfig, IncrementalPresenter, MetricField, StepOutcome};
//!
//! let mut shown = Vec::new();
//! let mut presenter = IncrementalPresenter::new(
//!     |field: MetricField, value: usize| shown.push((field, value)),
//!     AnimationConfig::default(),
//! );
//!
//! for ticket in presenter.present(&compute("Hello world.")) {
//!     while let StepOutcome::Advanced(_) = presenter.step(ticket) {}
//! }
//! assert_eq!(presenter.displayed(MetricField::Words), 2);
//! assert_eq!(presenter.displayed(MetricField::Characters), 12);
//! ```

use crate::animation::{AnimationConfig, CountAnimation};
use crate::metrics::{MetricField, TextMetrics};
use std::time::Duration;

/// Rendering collaborator: shows `value` in the element for `field`.
pub trait DisplaySink {
    /// Set the displayed text of the element for `field`.
    fn set_display(&mut self, field: MetricField, value: usize);
}

impl<F> DisplaySink for F
where
    F: FnMut(MetricField, usize),
{
    fn set_display(&mut self, field: MetricField, value: usize) {
        self(field, value);
    }
}

/// Displayed and target value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentedValue {
    /// Value currently shown
    pub displayed: usize,
    /// Latest computed value
    pub target: usize,
    /// Incremented every time a transition is started or cancelled
    pub generation: u64,
}

/// Handle for one scheduled transition of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationTicket {
    /// Field being animated
    pub field: MetricField,
    /// Generation the transition belongs to
    pub generation: u64,
}

/// Result of [`IncrementalPresenter::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The ticket was superseded; nothing was written
    Stale,
    /// A step was taken and more remain
    Advanced(usize),
    /// The final step was taken; the value equals the target
    Finished(usize),
}

impl StepOutcome {
    /// Whether the host should stop the timer for this ticket.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        !matches!(self, Self::Advanced(_))
    }
}

#[derive(Debug, Clone, Default)]
struct FieldSlot {
    value: PresentedValue,
    animation: Option<CountAnimation>,
    elapsed: Duration,
}

/// Drives the six metric displays towards the latest [`TextMetrics`].
pub struct IncrementalPresenter<S: DisplaySink> {
    sink: S,
    config: AnimationConfig,
    slots: [FieldSlot; 6],
}

impl<S: DisplaySink> std::fmt::Debug for IncrementalPresenter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalPresenter")
            .field("config", &self.config)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl<S: DisplaySink> IncrementalPresenter<S> {
    /// Create a presenter and render the zero baseline for every field.
    pub fn new(mut sink: S, config: AnimationConfig) -> Self {
        for field in MetricField::ALL {
            sink.set_display(field, 0);
        }
        Self {
            sink,
            config,
            slots: Default::default(),
        }
    }

    /// Animation timing in use.
    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Start transitions towards `metrics`.
    ///
    /// Fields already showing their new value are left alone. For every
    /// other field the in-flight transition, if any, is cancelled and a new
    /// one starts from the value currently shown. Returns one ticket per
    /// started transition.
    pub fn present(&mut self, metrics: &TextMetrics) -> Vec<AnimationTicket> {
        let mut tickets = Vec::new();

        for field in MetricField::ALL {
            let target = metrics.get(field);
            let slot = &mut self.slots[field.index()];
            slot.value.target = target;

            if slot.animation.take().is_some() {
                slot.value.generation += 1;
                tracing::debug!(
                    ?field,
                    generation = slot.value.generation,
                    displayed = slot.value.displayed,
                    target,
                    "superseded in-flight count animation"
                );
            }

            if slot.value.displayed == target {
                continue;
            }

            let animation = CountAnimation::with_config(slot.value.displayed, target, &self.config);
            if animation.is_complete() {
                slot.value.displayed = target;
                self.sink.set_display(field, target);
                continue;
            }

            slot.value.generation += 1;
            slot.animation = Some(animation);
            slot.elapsed = Duration::ZERO;
            tickets.push(AnimationTicket {
                field,
                generation: slot.value.generation,
            });
        }

        tickets
    }

    /// Take one step of the transition identified by `ticket`.
    pub fn step(&mut self, ticket: AnimationTicket) -> StepOutcome {
        let slot = &mut self.slots[ticket.field.index()];
        if slot.value.generation != ticket.generation {
            return StepOutcome::Stale;
        }
        step_slot(slot, &mut self.sink, ticket.field)
    }

    /// Take every step that became due after `elapsed` more time.
    pub fn advance(&mut self, elapsed: Duration) {
        let interval = self.config.step_interval();

        for field in MetricField::ALL {
            let slot = &mut self.slots[field.index()];
            if slot.animation.is_none() {
                continue;
            }
            slot.elapsed += elapsed;

            while slot.animation.is_some() {
                if !interval.is_zero() {
                    if slot.elapsed < interval {
                        break;
                    }
                    slot.elapsed -= interval;
                }
                step_slot(slot, &mut self.sink, field);
            }
        }
    }

    /// Jump every in-flight transition straight to its target.
    pub fn finish(&mut self) {
        for field in MetricField::ALL {
            let slot = &mut self.slots[field.index()];
            if slot.animation.take().is_some() {
                slot.value.generation += 1;
                slot.value.displayed = slot.value.target;
                self.sink.set_display(field, slot.value.target);
            }
        }
    }

    /// State of one field.
    pub const fn value(&self, field: MetricField) -> PresentedValue {
        self.slots[field.index()].value
    }

    /// Value currently shown for `field`.
    pub const fn displayed(&self, field: MetricField) -> usize {
        self.slots[field.index()].value.displayed
    }

    /// Latest computed value for `field`.
    pub const fn target(&self, field: MetricField) -> usize {
        self.slots[field.index()].value.target
    }

    /// Whether any field is mid-transition.
    pub fn is_animating(&self) -> bool {
        self.slots.iter().any(|s| s.animation.is_some())
    }

    /// Number of fields mid-transition.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.animation.is_some()).count()
    }

    /// Rendering collaborator.
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

fn step_slot<S: DisplaySink>(slot: &mut FieldSlot, sink: &mut S, field: MetricField) -> StepOutcome {
    let Some(animation) = slot.animation.as_mut() else {
        return StepOutcome::Stale;
    };

    let value = animation.advance();
    let done = animation.is_complete();
    slot.value.displayed = value;
    sink.set_display(field, value);

    if done {
        slot.animation = None;
        StepOutcome::Finished(value)
    } else {
        StepOutcome::Advanced(value)
    }
}
