use serde::Serialize;

/// Lifecycle of one verification session.
///
/// `Created -> Presented -> {Completed | Failed | Cancelled}`. The last
/// three are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Created,
    Presented,
    Completed,
    Failed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Failed | SessionState::Cancelled
        )
    }

    /// Whether `self -> next` is a legal edge.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        match (self, next) {
            (SessionState::Created, SessionState::Presented) => true,
            (SessionState::Presented, next) => next.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Created => "CREATED",
            SessionState::Presented => "PRESENTED",
            SessionState::Completed => "COMPLETED",
            SessionState::Failed => "FAILED",
            SessionState::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SessionState; 5] = [
        SessionState::Created,
        SessionState::Presented,
        SessionState::Completed,
        SessionState::Failed,
        SessionState::Cancelled,
    ];

    #[test]
    fn only_forward_edges_are_legal() {
        for from in ALL {
            for to in ALL {
                let expected = matches!(
                    (from, to),
                    (SessionState::Created, SessionState::Presented)
                        | (SessionState::Presented, SessionState::Completed)
                        | (SessionState::Presented, SessionState::Failed)
                        | (SessionState::Presented, SessionState::Cancelled)
                );
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn terminal_states_have_no_way_out() {
        for state in ALL.into_iter().filter(|s| s.is_terminal()) {
            assert!(ALL.iter().all(|next| !state.can_transition_to(*next)));
        }
    }
}
