//! The voice-phrase gate in front of the dashboard. A novelty, not a
//! security boundary: the transcript just has to contain one of the
//! accepted phrase forms after normalization.

const UNLOCK_PHRASES: [&str; 3] = ["i'm tarun", "im tarun", "i am tarun"];

pub fn phrase_matches(transcript: &str) -> bool {
    let normalized = transcript.trim().to_lowercase();
    UNLOCK_PHRASES.iter().any(|p| normalized.contains(p))
}

/// Explicit session value handed to the dashboard's caller. The only
/// transitions are unlock via a matching phrase and explicit logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    pub fn unlock(&mut self, transcript: &str) -> bool {
        if phrase_matches(transcript) {
            *self = SessionState::Authenticated;
            true
        } else {
            false
        }
    }

    pub fn logout(&mut self) {
        *self = SessionState::Unauthenticated;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod phrase_tests {
        use super::*;

        #[test]
        fn accepts_all_phrase_forms() {
            assert!(phrase_matches("i'm tarun"));
            assert!(phrase_matches("im tarun"));
            assert!(phrase_matches("i am tarun"));
        }

        #[test]
        fn case_insensitive_and_trimmed() {
            assert!(phrase_matches("  I'm Tarun  "));
            assert!(phrase_matches("I AM TARUN"));
        }

        #[test]
        fn matches_inside_longer_transcript() {
            // Speech recognition often pads the transcript.
            assert!(phrase_matches("hello there I'm Tarun speaking"));
        }

        #[test]
        fn rejects_other_phrases() {
            assert!(!phrase_matches("i'm arun"));
            assert!(!phrase_matches("tarun"));
            assert!(!phrase_matches(""));
            assert!(!phrase_matches("let me in"));
        }
    }

    mod state_tests {
        use super::*;

        #[test]
        fn starts_unauthenticated() {
            let state = SessionState::default();
            assert!(!state.is_authenticated());
        }

        #[test]
        fn unlock_with_matching_phrase() {
            let mut state = SessionState::default();
            assert!(state.unlock("I'm Tarun"));
            assert!(state.is_authenticated());
        }

        #[test]
        fn failed_unlock_leaves_state_unchanged() {
            let mut state = SessionState::default();
            assert!(!state.unlock("open sesame"));
            assert!(!state.is_authenticated());
        }

        #[test]
        fn logout_is_the_only_way_back() {
            let mut state = SessionState::default();
            state.unlock("im tarun");
            assert!(state.is_authenticated());

            // A bad phrase while authenticated does not log out.
            assert!(!state.unlock("someone else"));
            assert!(state.is_authenticated());

            state.logout();
            assert!(!state.is_authenticated());
        }
    }
}
