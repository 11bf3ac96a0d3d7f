use bevy::dev_tools::states::*;
use bevy::prelude::*;

use crate::schedule::LandingSet;

pub struct StatePlugin;

impl Plugin for StatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<LandingState>()
            .add_message::<SequenceEvent>()
            .add_systems(
                Update,
                apply_sequence_events.in_set(LandingSet::Sequencing),
            )
            .add_systems(Update, log_transitions::<LandingState>);
    }
}

/// Landing page sequence: logo reveal, donation panel, optional flythrough, panel hidden.
///
/// `Launch` is the default so nothing in `OnEnter(Intro)` fires before the camera and the UI
/// tree exist and the planet textures have settled.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Reflect, States)]
pub enum LandingState {
    #[default]
    Launch,
    Intro,
    IntroToDonation,
    Donation,
    DonationToFlight,
    HiddenFinal,
}

/// Things that happen to the sequence. Systems only ever send these; the
/// transition table below is the single place that decides what they mean.
#[derive(Message, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SequenceEvent {
    AssetsSettled,
    LogoFinished,
    PanelRevealed,
    CloseRequested,
    FlightFinished,
}

impl LandingState {
    /// The transition table. `None` means the event is ignored in this state.
    ///
    /// A `CloseRequested` while already flying is deliberately not a transition: the flight
    /// systems restart the flythrough in place instead of re-entering the state.
    pub const fn next(self, event: SequenceEvent) -> Option<Self> {
        match (self, event) {
            (Self::Launch, SequenceEvent::AssetsSettled) => Some(Self::Intro),
            (Self::Intro, SequenceEvent::LogoFinished) => Some(Self::IntroToDonation),
            (Self::IntroToDonation, SequenceEvent::PanelRevealed) => Some(Self::Donation),
            (Self::IntroToDonation | Self::Donation, SequenceEvent::CloseRequested) => {
                Some(Self::DonationToFlight)
            },
            (Self::DonationToFlight, SequenceEvent::FlightFinished) => Some(Self::HiddenFinal),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool { matches!(self, Self::HiddenFinal) }
}

impl SequenceEvent {
    /// Sent because the visitor asked for something, not because a stage timer ran out
    pub const fn is_request(self) -> bool { matches!(self, Self::CloseRequested) }
}

/// Picks the one transition this frame makes out of everything sent during it.
///
/// Requests go before timer events, so a close that lands in the same frame as the panel
/// finishing its reveal is not lost to the reveal.
pub fn pick_transition(
    current: LandingState,
    events: &[SequenceEvent],
) -> Option<(SequenceEvent, LandingState)> {
    let requests = events.iter().filter(|event| event.is_request());
    let timers = events.iter().filter(|event| !event.is_request());
    requests
        .chain(timers)
        .find_map(|event| current.next(*event).map(|next| (*event, next)))
}

pub fn apply_sequence_events(
    mut events: MessageReader<SequenceEvent>,
    state: Res<State<LandingState>>,
    mut next_state: ResMut<NextState<LandingState>>,
) {
    let current = *state.get();
    let events: Vec<SequenceEvent> = events.read().copied().collect();
    if events.is_empty() {
        return;
    }

    match pick_transition(current, &events) {
        Some((event, next)) => {
            debug!("{current:?} --{event:?}--> {next:?}");
            next_state.set(next);
            // the rest were sent against a state we are about to leave
            for dropped in events.iter().filter(|other| **other != event) {
                debug!("{dropped:?} dropped, transition already queued this frame");
            }
        },
        None if current.is_terminal() => {
            debug!("{events:?} after the sequence finished");
        },
        None => debug!("{events:?} ignored in {current:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [LandingState; 6] = [
        LandingState::Launch,
        LandingState::Intro,
        LandingState::IntroToDonation,
        LandingState::Donation,
        LandingState::DonationToFlight,
        LandingState::HiddenFinal,
    ];

    #[test]
    fn happy_path_walks_every_state_in_order() {
        let path = [
            SequenceEvent::AssetsSettled,
            SequenceEvent::LogoFinished,
            SequenceEvent::PanelRevealed,
            SequenceEvent::CloseRequested,
            SequenceEvent::FlightFinished,
        ];

        let mut state = LandingState::Launch;
        for event in path {
            state = state.next(event).unwrap();
        }
        assert_eq!(state, LandingState::HiddenFinal);
    }

    #[test]
    fn donation_only_follows_panel_reveal() {
        for state in ALL_STATES {
            for event in [
                SequenceEvent::AssetsSettled,
                SequenceEvent::LogoFinished,
                SequenceEvent::PanelRevealed,
                SequenceEvent::CloseRequested,
                SequenceEvent::FlightFinished,
            ] {
                if state.next(event) == Some(LandingState::Donation) {
                    assert_eq!(state, LandingState::IntroToDonation);
                    assert_eq!(event, SequenceEvent::PanelRevealed);
                }
            }
        }
    }

    #[test]
    fn intro_cannot_be_skipped_by_close() {
        assert_eq!(LandingState::Intro.next(SequenceEvent::CloseRequested), None);
        assert_eq!(LandingState::Launch.next(SequenceEvent::CloseRequested), None);
    }

    #[test]
    fn close_while_flying_is_not_a_transition() {
        assert_eq!(
            LandingState::DonationToFlight.next(SequenceEvent::CloseRequested),
            None
        );
    }

    #[test]
    fn hidden_final_is_terminal() {
        assert!(LandingState::HiddenFinal.is_terminal());
        for event in [
            SequenceEvent::AssetsSettled,
            SequenceEvent::LogoFinished,
            SequenceEvent::PanelRevealed,
            SequenceEvent::CloseRequested,
            SequenceEvent::FlightFinished,
        ] {
            assert_eq!(LandingState::HiddenFinal.next(event), None);
        }
    }

    #[test]
    fn close_beats_a_reveal_sent_in_the_same_frame() {
        let events = [SequenceEvent::PanelRevealed, SequenceEvent::CloseRequested];
        assert_eq!(
            pick_transition(LandingState::IntroToDonation, &events),
            Some((SequenceEvent::CloseRequested, LandingState::DonationToFlight))
        );
    }

    #[test]
    fn timer_event_still_applies_when_the_request_does_not() {
        // close means nothing during the intro, so the logo finishing still moves on
        let events = [SequenceEvent::CloseRequested, SequenceEvent::LogoFinished];
        assert_eq!(
            pick_transition(LandingState::Intro, &events),
            Some((SequenceEvent::LogoFinished, LandingState::IntroToDonation))
        );
        assert_eq!(pick_transition(LandingState::HiddenFinal, &events), None);
    }
}
