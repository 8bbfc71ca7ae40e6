//! Request lifecycle authority. Every write to `status` or
//! `assigned_supervisor` is computed here, and every status-dependent
//! permission check goes through the gate functions, so the rules live in
//! one place instead of being repeated across handlers.

use uuid::Uuid;

use crate::models::{
    requestmodel::{EssayRequest, RequestStatus},
    usermodel::{User, UserRole},
};

use super::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestEvent {
    /// Admin manually assigns (or re-assigns) a supervisor.
    Assign { supervisor_id: Uuid },
    /// Admin accepts a supervisor's bid.
    AcceptBid { supervisor_id: Uuid },
    /// Admin approves the payment record. The approving admin becomes the
    /// assigned supervisor; see the design notes before "fixing" this.
    ApprovePayment { admin_id: Uuid },
    /// Admin marks the work delivered.
    Complete,
    /// Admin turns the request down before any assignment.
    Reject,
}

/// The computed next state for a request. `assigned_supervisor` here is the
/// column's full new value, not a delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub status: RequestStatus,
    pub assigned_supervisor: Option<Uuid>,
}

pub fn transition(
    request: &EssayRequest,
    event: RequestEvent,
) -> Result<Transition, ServiceError> {
    use RequestStatus::*;

    let next = match (request.status, event) {
        // Assignment overwrites any previous supervisor; legal until the
        // request reaches a terminal status.
        (Pending | Accepted, RequestEvent::Assign { supervisor_id })
        | (Pending | Accepted, RequestEvent::AcceptBid { supervisor_id }) => Transition {
            status: Accepted,
            assigned_supervisor: Some(supervisor_id),
        },
        (Pending | Accepted, RequestEvent::ApprovePayment { admin_id }) => Transition {
            status: Accepted,
            assigned_supervisor: Some(admin_id),
        },
        (Accepted, RequestEvent::Complete) => Transition {
            status: Completed,
            assigned_supervisor: request.assigned_supervisor,
        },
        (Pending, RequestEvent::Reject) => Transition {
            status: Rejected,
            assigned_supervisor: None,
        },
        _ => return Err(ServiceError::InvalidTransition(request.id, request.status)),
    };

    Ok(next)
}

/// Bids may only target a request that exists and is still pending. Both
/// failure modes collapse into one message so callers cannot probe for
/// request ids they are not allowed to see.
pub fn ensure_biddable(request: Option<&EssayRequest>) -> Result<&EssayRequest, ServiceError> {
    match request {
        Some(request) if request.status == RequestStatus::Pending => Ok(request),
        _ => Err(ServiceError::BiddingClosed),
    }
}

/// Chat opens once a request is accepted with a supervisor on it.
pub fn ensure_chat_open(request: &EssayRequest) -> Result<(), ServiceError> {
    if request.status == RequestStatus::Accepted && request.assigned_supervisor.is_some() {
        Ok(())
    } else {
        Err(ServiceError::ChatUnavailable)
    }
}

/// Admins always pass; the owning student and the assigned supervisor are
/// the only other chat participants.
pub fn chat_participant(request: &EssayRequest, user: &User) -> Result<(), ServiceError> {
    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::Student => request.student_id == user.id,
        UserRole::Supervisor => request.assigned_supervisor == Some(user.id),
    };

    if allowed {
        Ok(())
    } else {
        Err(ServiceError::AccessDenied)
    }
}

/// Read access to a single request: students see their own, supervisors see
/// open requests plus their own assignments, admins see everything.
pub fn view_request(request: &EssayRequest, user: &User) -> Result<(), ServiceError> {
    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::Student => request.student_id == user.id,
        UserRole::Supervisor => {
            request.status == RequestStatus::Pending
                || request.assigned_supervisor == Some(user.id)
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(ServiceError::AccessDenied)
    }
}

/// Field edits are reserved for the owning student and admins.
pub fn edit_request(request: &EssayRequest, user: &User) -> Result<(), ServiceError> {
    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::Student => request.student_id == user.id,
        UserRole::Supervisor => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(ServiceError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(status: RequestStatus, assigned_supervisor: Option<Uuid>) -> EssayRequest {
        EssayRequest {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            title: "Greek history essay".to_string(),
            due_date: Utc::now(),
            word_count: 2000,
            assignment_type: "essay".to_string(),
            field_of_study: "history".to_string(),
            attachments: vec![],
            extra_information: None,
            status,
            assigned_supervisor,
            created_at: Utc::now(),
        }
    }

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            email: "someone@university.gr".to_string(),
            name: "Someone".to_string(),
            role,
            password_hash: "hash".to_string(),
            profile_pic: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn assign_moves_pending_to_accepted() {
        let supervisor_id = Uuid::new_v4();
        let next = transition(
            &request(RequestStatus::Pending, None),
            RequestEvent::Assign { supervisor_id },
        )
        .unwrap();
        assert_eq!(next.status, RequestStatus::Accepted);
        assert_eq!(next.assigned_supervisor, Some(supervisor_id));
    }

    #[test]
    fn assign_reassigns_an_accepted_request() {
        let old = Uuid::new_v4();
        let new = Uuid::new_v4();
        let next = transition(
            &request(RequestStatus::Accepted, Some(old)),
            RequestEvent::Assign { supervisor_id: new },
        )
        .unwrap();
        assert_eq!(next.assigned_supervisor, Some(new));
    }

    #[test]
    fn assign_is_refused_from_terminal_statuses() {
        for status in [RequestStatus::Rejected, RequestStatus::Completed] {
            let result = transition(
                &request(status, None),
                RequestEvent::Assign {
                    supervisor_id: Uuid::new_v4(),
                },
            );
            assert!(matches!(
                result,
                Err(ServiceError::InvalidTransition(_, _))
            ));
        }
    }

    #[test]
    fn accept_bid_assigns_the_bidding_supervisor() {
        let supervisor_id = Uuid::new_v4();
        let next = transition(
            &request(RequestStatus::Pending, None),
            RequestEvent::AcceptBid { supervisor_id },
        )
        .unwrap();
        assert_eq!(next.status, RequestStatus::Accepted);
        assert_eq!(next.assigned_supervisor, Some(supervisor_id));
    }

    #[test]
    fn payment_approval_assigns_the_admin() {
        let admin_id = Uuid::new_v4();
        let next = transition(
            &request(RequestStatus::Pending, None),
            RequestEvent::ApprovePayment { admin_id },
        )
        .unwrap();
        assert_eq!(next.status, RequestStatus::Accepted);
        assert_eq!(next.assigned_supervisor, Some(admin_id));
    }

    #[test]
    fn payment_approval_cannot_revive_a_dead_request() {
        for status in [RequestStatus::Rejected, RequestStatus::Completed] {
            let result = transition(
                &request(status, None),
                RequestEvent::ApprovePayment {
                    admin_id: Uuid::new_v4(),
                },
            );
            assert!(result.is_err());
        }
    }

    #[test]
    fn complete_requires_accepted_and_keeps_the_supervisor() {
        let supervisor_id = Uuid::new_v4();
        let next = transition(
            &request(RequestStatus::Accepted, Some(supervisor_id)),
            RequestEvent::Complete,
        )
        .unwrap();
        assert_eq!(next.status, RequestStatus::Completed);
        assert_eq!(next.assigned_supervisor, Some(supervisor_id));

        assert!(transition(&request(RequestStatus::Pending, None), RequestEvent::Complete).is_err());
    }

    #[test]
    fn reject_only_works_on_pending() {
        let next = transition(&request(RequestStatus::Pending, None), RequestEvent::Reject).unwrap();
        assert_eq!(next.status, RequestStatus::Rejected);
        assert_eq!(next.assigned_supervisor, None);

        assert!(transition(
            &request(RequestStatus::Accepted, Some(Uuid::new_v4())),
            RequestEvent::Reject
        )
        .is_err());
    }

    #[test]
    fn bidding_gate_rejects_missing_and_non_pending() {
        assert!(ensure_biddable(None).is_err());

        let accepted = request(RequestStatus::Accepted, Some(Uuid::new_v4()));
        assert!(matches!(
            ensure_biddable(Some(&accepted)),
            Err(ServiceError::BiddingClosed)
        ));

        let pending = request(RequestStatus::Pending, None);
        assert!(ensure_biddable(Some(&pending)).is_ok());
    }

    #[test]
    fn chat_gate_requires_accepted_with_supervisor() {
        assert!(ensure_chat_open(&request(RequestStatus::Accepted, Some(Uuid::new_v4()))).is_ok());
        assert!(ensure_chat_open(&request(RequestStatus::Pending, None)).is_err());
        assert!(ensure_chat_open(&request(RequestStatus::Accepted, None)).is_err());
        assert!(
            ensure_chat_open(&request(RequestStatus::Completed, Some(Uuid::new_v4()))).is_err()
        );
    }

    #[test]
    fn chat_participants_are_owner_assignee_and_admin() {
        let mut req = request(RequestStatus::Accepted, None);
        let student = user(UserRole::Student);
        let supervisor = user(UserRole::Supervisor);
        let admin = user(UserRole::Admin);
        req.student_id = student.id;
        req.assigned_supervisor = Some(supervisor.id);

        assert!(chat_participant(&req, &student).is_ok());
        assert!(chat_participant(&req, &supervisor).is_ok());
        assert!(chat_participant(&req, &admin).is_ok());

        assert!(chat_participant(&req, &user(UserRole::Student)).is_err());
        assert!(chat_participant(&req, &user(UserRole::Supervisor)).is_err());
    }

    #[test]
    fn supervisors_see_pending_or_their_own_assignments() {
        let supervisor = user(UserRole::Supervisor);

        assert!(view_request(&request(RequestStatus::Pending, None), &supervisor).is_ok());

        let theirs = request(RequestStatus::Accepted, Some(supervisor.id));
        assert!(view_request(&theirs, &supervisor).is_ok());

        let someone_elses = request(RequestStatus::Accepted, Some(Uuid::new_v4()));
        assert!(view_request(&someone_elses, &supervisor).is_err());
    }

    #[test]
    fn students_only_see_their_own_requests() {
        let student = user(UserRole::Student);
        let mut own = request(RequestStatus::Pending, None);
        own.student_id = student.id;

        assert!(view_request(&own, &student).is_ok());
        assert!(view_request(&request(RequestStatus::Pending, None), &student).is_err());
    }

    #[test]
    fn edits_are_owner_or_admin_only() {
        let student = user(UserRole::Student);
        let mut own = request(RequestStatus::Pending, None);
        own.student_id = student.id;

        assert!(edit_request(&own, &student).is_ok());
        assert!(edit_request(&own, &user(UserRole::Admin)).is_ok());
        assert!(edit_request(&own, &user(UserRole::Student)).is_err());
        assert!(edit_request(&own, &user(UserRole::Supervisor)).is_err());
    }
}
