//! Lays tweens out on a shared clock with positions relative to what came before, then hands
//! them back with their start folded into the delay.

use super::tween::Tween;

/// Where the next entry starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// At the current end of the timeline
    End,
    /// `offset` seconds after the current end of the timeline
    AfterEnd(f32),
    /// `offset` seconds after the previous entry *started*
    WithPrevious(f32),
    /// `offset` seconds after the previous entry *ended* (negative overlaps it)
    AfterPrevious(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEntry<T> {
    pub target: T,
    pub tween:  Tween,
}

#[derive(Clone, Debug)]
pub struct Timeline<T> {
    entries:  Vec<TimelineEntry<T>>,
    previous: (f32, f32),
    end:      f32,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            entries:  Vec::new(),
            previous: (0.0, 0.0),
            end:      0.0,
        }
    }
}

impl<T: Copy> Timeline<T> {
    /// Adds every tween to every target as one entry. The entry lasts as long as its longest
    /// finite tween; infinite tweens start on time but don't stretch the timeline.
    pub fn add(&mut self, targets: &[T], tweens: &[Tween], placement: Placement) -> &mut Self {
        let start = self.resolve(placement);
        let span = tweens
            .iter()
            .filter_map(Tween::span_secs)
            .fold(0.0_f32, f32::max);

        for &target in targets {
            for tween in tweens {
                let delay_secs = tween.delay_secs + start;
                self.entries.push(TimelineEntry {
                    target,
                    tween: tween.clone().with_delay(delay_secs),
                });
            }
        }

        self.previous = (start, start + span);
        self.end = self.end.max(start + span);
        self
    }

    /// Absolute start, never before zero
    pub fn resolve(&self, placement: Placement) -> f32 {
        let (previous_start, previous_end) = self.previous;
        let start = match placement {
            Placement::End => self.end,
            Placement::AfterEnd(offset) => self.end + offset,
            Placement::WithPrevious(offset) => previous_start + offset,
            Placement::AfterPrevious(offset) => previous_end + offset,
        };
        start.max(0.0)
    }

    pub const fn duration_secs(&self) -> f32 { self.end }

    #[cfg(test)]
    pub fn entries(&self) -> &[TimelineEntry<T>] { &self.entries }

    pub fn into_entries(self) -> Vec<TimelineEntry<T>> { self.entries }
}
