use super::{Aborted, RunContext};
use crate::data_models::{SearchStep, format_number};
use crate::view::{Highlight, Message, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Low,
    Mid,
    High,
    ClearHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Found { index: usize },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Showing { step: usize, phase: Phase },
    Done(Verdict),
    Aborted,
}

impl AnimationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnimationState::Done(_) | AnimationState::Aborted)
    }
}

/// Walks a step trace phase by phase. A found step ends the walk right after
/// its `mid` has been shown.
pub struct StepMachine<'a> {
    steps: &'a [SearchStep],
    state: AnimationState,
}

impl<'a> StepMachine<'a> {
    pub fn new(steps: &'a [SearchStep]) -> StepMachine<'a> {
        StepMachine {
            steps,
            state: AnimationState::Idle,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn advance(&mut self) -> AnimationState {
        let last = self.steps.len().saturating_sub(1);
        self.state = match self.state {
            AnimationState::Idle if self.steps.is_empty() => AnimationState::Done(Verdict::NotFound),
            AnimationState::Idle => AnimationState::Showing {
                step: 0,
                phase: Phase::Low,
            },
            AnimationState::Showing { step, phase } => match phase {
                Phase::Low => AnimationState::Showing {
                    step,
                    phase: Phase::Mid,
                },
                Phase::Mid if self.steps[step].found => AnimationState::Done(Verdict::Found {
                    index: self.steps[step].mid,
                }),
                Phase::Mid => AnimationState::Showing {
                    step,
                    phase: Phase::High,
                },
                Phase::High => AnimationState::Showing {
                    step,
                    phase: Phase::ClearHigh,
                },
                Phase::ClearHigh if step < last => AnimationState::Showing {
                    step: step + 1,
                    phase: Phase::Low,
                },
                Phase::ClearHigh => AnimationState::Done(Verdict::NotFound),
            },
            terminal => terminal,
        };
        self.state
    }

    pub fn abort(&mut self) {
        if !self.state.is_terminal() {
            self.state = AnimationState::Aborted;
        }
    }
}

pub fn found_message(target: f64, index: usize) -> String {
    format!("Target {} found at index {}.", format_number(target), index)
}

pub fn found_all_message(target: f64, indices: &[usize]) -> String {
    let list = indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!("Target {} found at indices {}.", format_number(target), list)
}

pub fn not_found_message(target: f64) -> String {
    format!("Target {} not found.", format_number(target))
}

pub struct StepAnimator;

impl StepAnimator {
    /// Plays `steps` against the displayed (sorted) array. `results` lists
    /// every matching index the service reported; when it holds more than
    /// one, a found run ends with all of them highlighted.
    pub async fn run<V: View>(
        ctx: &RunContext<V>,
        steps: &[SearchStep],
        target: f64,
        results: Option<&[usize]>,
    ) -> Result<Verdict, Aborted> {
        let mut machine = StepMachine::new(steps);
        match Self::drive(ctx, &mut machine, target, results).await {
            Ok(verdict) => Ok(verdict),
            Err(Aborted) => {
                machine.abort();
                log::debug!("step animation aborted");
                Err(Aborted)
            }
        }
    }

    async fn drive<V: View>(
        ctx: &RunContext<V>,
        machine: &mut StepMachine<'_>,
        target: f64,
        results: Option<&[usize]>,
    ) -> Result<Verdict, Aborted> {
        loop {
            ctx.checkpoint()?;
            match machine.advance() {
                AnimationState::Showing { step, phase } => {
                    let s = &machine.steps[step];
                    ctx.mutate(|view| match phase {
                        Phase::Low => {
                            let mut line = format!(
                                "Step {}: low={}, mid={}, high={}",
                                step + 1,
                                s.low,
                                s.mid,
                                s.high
                            );
                            if let Some(value) = s.mid_value {
                                line.push_str(&format!(", checking {}", format_number(value)));
                            }
                            view.narrate(line);
                            if let Some(message) = &s.message {
                                view.narrate(message.clone());
                            }
                            view.focus(s.low, Highlight::Low);
                        }
                        Phase::Mid => view.focus(s.mid, Highlight::Mid),
                        Phase::High => view.focus(s.high, Highlight::High),
                        Phase::ClearHigh => view.clear_highlights(),
                    })
                    .await?;
                    ctx.pause().await?;
                }
                AnimationState::Done(Verdict::Found { index }) => {
                    let all = results.filter(|r| r.len() > 1);
                    ctx.mutate(|view| {
                        view.clear_highlights();
                        match all {
                            Some(indices) => {
                                for i in indices {
                                    view.highlight(*i, Highlight::Found);
                                }
                                view.set_message(Message::success(found_all_message(target, indices)));
                            }
                            None => {
                                view.highlight(index, Highlight::Found);
                                view.set_message(Message::success(found_message(target, index)));
                            }
                        }
                    })
                    .await?;
                    return Ok(Verdict::Found { index });
                }
                AnimationState::Done(Verdict::NotFound) => {
                    ctx.mutate(|view| {
                        view.clear_highlights();
                        view.set_message(Message::error(not_found_message(target)));
                    })
                    .await?;
                    return Ok(Verdict::NotFound);
                }
                AnimationState::Idle | AnimationState::Aborted => return Err(Aborted),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(low: usize, mid: usize, high: usize, found: bool) -> SearchStep {
        SearchStep::new(low, mid, high, found)
    }

    #[test]
    fn test_machine_walks_every_phase_then_not_found() {
        let steps = vec![step(0, 1, 3, false), step(2, 2, 3, false)];
        let mut machine = StepMachine::new(&steps);
        let mut seen = Vec::new();
        while !machine.advance().is_terminal() {
            seen.push(machine.state());
        }
        assert_eq!(seen.len(), 8);
        assert_eq!(
            seen[4],
            AnimationState::Showing {
                step: 1,
                phase: Phase::Low
            }
        );
        assert_eq!(machine.state(), AnimationState::Done(Verdict::NotFound));
    }

    #[test]
    fn test_machine_short_circuits_on_found() {
        let steps = vec![step(0, 1, 3, false), step(2, 2, 3, true), step(9, 9, 9, false)];
        let mut machine = StepMachine::new(&steps);
        while !machine.advance().is_terminal() {}
        assert_eq!(machine.state(), AnimationState::Done(Verdict::Found { index: 2 }));
    }

    #[test]
    fn test_machine_empty_trace_is_not_found() {
        let mut machine = StepMachine::new(&[]);
        assert_eq!(machine.advance(), AnimationState::Done(Verdict::NotFound));
    }

    #[test]
    fn test_abort_only_from_non_terminal() {
        let steps = vec![step(0, 0, 0, true)];
        let mut machine = StepMachine::new(&steps);
        machine.advance();
        machine.abort();
        assert_eq!(machine.state(), AnimationState::Aborted);
        assert_eq!(machine.advance(), AnimationState::Aborted);

        let mut done = StepMachine::new(&[]);
        done.advance();
        done.abort();
        assert_eq!(done.state(), AnimationState::Done(Verdict::NotFound));
    }
}
