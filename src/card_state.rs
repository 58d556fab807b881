//! Event Card State
//!
//! Display state of an event card, derived from fetched data only. The
//! server moves an event between these states; the client just re-derives.

use chrono::{DateTime, Utc};

use crate::dates::{is_registration_deadline_passed, is_withdrawal_deadline_passed, parse_timestamp};
use crate::models::{Event, RegistrationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    NotRegisteredOpen,
    NotRegisteredClosed,
    WaitlistOpen,
    WaitlistClosed,
    RegisteredPrimary,
    RegisteredWaitlisted,
    RegisteredPastWithdrawalDeadline,
}

/// What the card's button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Register,
    JoinWaitlist,
    Withdraw,
}

impl CardState {
    pub fn derive(
        event: &Event,
        registration: Option<&RegistrationStatus>,
        now: DateTime<Utc>,
    ) -> Self {
        if let Some(status) = registration.filter(|s| s.registered) {
            let withdrawal_closed = event
                .withdrawal_deadline
                .as_deref()
                .is_some_and(|d| is_withdrawal_deadline_passed(d, now));
            return if withdrawal_closed {
                CardState::RegisteredPastWithdrawalDeadline
            } else if status.waitlisted {
                CardState::RegisteredWaitlisted
            } else {
                CardState::RegisteredPrimary
            };
        }

        let deadline_passed = event
            .registration_deadline
            .as_deref()
            .is_some_and(|d| is_registration_deadline_passed(d, now));
        let already_happened = parse_timestamp(&event.date).is_some_and(|date| now > date);
        let closed = event.cancelled || deadline_passed || already_happened;

        if event.is_full() {
            let waitlist_full = event.waitlisted >= event.waitlist_capacity;
            if closed || waitlist_full {
                CardState::WaitlistClosed
            } else {
                CardState::WaitlistOpen
            }
        } else if closed {
            CardState::NotRegisteredClosed
        } else {
            CardState::NotRegisteredOpen
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardState::NotRegisteredOpen => "Inscripción abierta",
            CardState::NotRegisteredClosed => "Inscripción cerrada",
            CardState::WaitlistOpen => "Cupo completo, lista de suplentes abierta",
            CardState::WaitlistClosed => "Cupo completo",
            CardState::RegisteredPrimary => "Inscripto",
            CardState::RegisteredWaitlisted => "Inscripto como suplente",
            CardState::RegisteredPastWithdrawalDeadline => "Inscripto, plazo de baja vencido",
        }
    }

    pub fn action(&self) -> Option<CardAction> {
        match self {
            CardState::NotRegisteredOpen => Some(CardAction::Register),
            CardState::WaitlistOpen => Some(CardAction::JoinWaitlist),
            CardState::RegisteredPrimary | CardState::RegisteredWaitlisted => {
                Some(CardAction::Withdraw)
            }
            CardState::NotRegisteredClosed
            | CardState::WaitlistClosed
            | CardState::RegisteredPastWithdrawalDeadline => None,
        }
    }
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Register => "Inscribirme",
            CardAction::JoinWaitlist => "Anotarme como suplente",
            CardAction::Withdraw => "Darme de baja",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn event() -> Event {
        Event {
            id: 1,
            name: "Travesía".to_string(),
            description: None,
            date: "2025-03-20T08:00:00Z".to_string(),
            place: None,
            capacity: 2,
            registered: 0,
            waitlist_capacity: 2,
            waitlisted: 0,
            registration_deadline: Some("2025-03-15T00:00:00Z".to_string()),
            withdrawal_deadline: Some("2025-03-18T00:00:00Z".to_string()),
            category: None,
            cancelled: false,
            image: None,
            group_id: None,
        }
    }

    fn registered(waitlisted: bool) -> RegistrationStatus {
        RegistrationStatus {
            registered: true,
            waitlisted,
            waitlist_position: waitlisted.then_some(1),
        }
    }

    #[test]
    fn test_open_and_closed() {
        assert_eq!(CardState::derive(&event(), None, now()), CardState::NotRegisteredOpen);

        let mut closed = event();
        closed.registration_deadline = Some("2025-03-01T00:00:00Z".to_string());
        assert_eq!(CardState::derive(&closed, None, now()), CardState::NotRegisteredClosed);

        let mut cancelled = event();
        cancelled.cancelled = true;
        assert_eq!(CardState::derive(&cancelled, None, now()), CardState::NotRegisteredClosed);
    }

    #[test]
    fn test_waitlist_states() {
        let mut full = event();
        full.registered = 2;
        assert_eq!(CardState::derive(&full, None, now()), CardState::WaitlistOpen);

        full.waitlisted = 2;
        assert_eq!(CardState::derive(&full, None, now()), CardState::WaitlistClosed);

        let mut late = event();
        late.registered = 2;
        late.registration_deadline = Some("2025-03-01T00:00:00Z".to_string());
        assert_eq!(CardState::derive(&late, None, now()), CardState::WaitlistClosed);
    }

    #[test]
    fn test_registered_states() {
        let not_registered = RegistrationStatus::not_registered();
        assert_eq!(
            CardState::derive(&event(), Some(&not_registered), now()),
            CardState::NotRegisteredOpen
        );
        assert_eq!(
            CardState::derive(&event(), Some(&registered(false)), now()),
            CardState::RegisteredPrimary
        );
        assert_eq!(
            CardState::derive(&event(), Some(&registered(true)), now()),
            CardState::RegisteredWaitlisted
        );

        let after_withdrawal = Utc.with_ymd_and_hms(2025, 3, 19, 0, 0, 0).unwrap();
        assert_eq!(
            CardState::derive(&event(), Some(&registered(true)), after_withdrawal),
            CardState::RegisteredPastWithdrawalDeadline
        );
    }

    #[test]
    fn test_actions() {
        assert_eq!(CardState::NotRegisteredOpen.action(), Some(CardAction::Register));
        assert_eq!(CardState::WaitlistOpen.action(), Some(CardAction::JoinWaitlist));
        assert_eq!(CardState::RegisteredWaitlisted.action(), Some(CardAction::Withdraw));
        assert_eq!(CardState::RegisteredPastWithdrawalDeadline.action(), None);
        assert_eq!(CardState::WaitlistClosed.action(), None);
    }
}
