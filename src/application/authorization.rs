use crate::domain::membership::{AuthorizationOutcome, MembershipOutcome, MembershipState};
use crate::domain::ports::CodeHost;
use tracing::{debug, warn};

/// Query team membership and map the port contract into an outcome: a
/// failed lookup becomes a diagnostic error, an absent record a plain
/// non-member.
pub async fn check_team_membership(
    host: &dyn CodeHost,
    org: &str,
    team: &str,
    user: &str,
) -> MembershipOutcome {
    match host.team_membership(org, team, user).await {
        Ok(Some(state)) => MembershipOutcome::with_state(state),
        Ok(None) => MembershipOutcome::non_member(),
        Err(e) => MembershipOutcome::failed(format!("failed to check team membership: {e}")),
    }
}

/// Query organization membership, same mapping as the team tier.
pub async fn check_org_membership(
    host: &dyn CodeHost,
    org: &str,
    user: &str,
) -> MembershipOutcome {
    match host.org_membership(org, user).await {
        Ok(Some(state)) => MembershipOutcome::with_state(state),
        Ok(None) => MembershipOutcome::non_member(),
        Err(e) => {
            MembershipOutcome::failed(format!("failed to check organization membership: {e}"))
        }
    }
}

/// Two-tier membership check: team first, organization as fallback.
///
/// An active team member needs no fallback. Otherwise the organization
/// tier is consulted; an active organization member is accepted, with the
/// outcome annotated because team membership could not be positively
/// confirmed. If neither tier confirms membership, the team-tier outcome
/// is returned so its error (if any) wins.
pub async fn check_membership(
    host: &dyn CodeHost,
    org: &str,
    team: &str,
    user: &str,
) -> MembershipOutcome {
    let team_outcome = check_team_membership(host, org, team, user).await;
    if team_outcome.is_member {
        return team_outcome;
    }

    debug!(user, "team membership not confirmed, trying organization fallback");
    let org_outcome = check_org_membership(host, org, user).await;
    if org_outcome.is_member {
        warn!(user, "authorized via organization fallback");
        return MembershipOutcome {
            error: Some(
                "could not verify team membership, but user is an organization member".to_string(),
            ),
            ..org_outcome
        };
    }

    team_outcome
}

/// Decide whether a requester may spend funds.
pub async fn check_authorization(
    host: &dyn CodeHost,
    user: &str,
    org: &str,
    team: &str,
) -> AuthorizationOutcome {
    let membership = check_membership(host, org, team, user).await;

    if membership.is_member {
        return AuthorizationOutcome {
            is_authorized: true,
            reason: None,
            membership,
        };
    }

    let reason = if let Some(error) = &membership.error {
        error.clone()
    } else if membership.state == Some(MembershipState::Pending) {
        format!("user '{user}' has a pending invitation to team '{team}'")
    } else {
        format!("user '{user}' is not a member of team '{team}' in organization '{org}'")
    };

    AuthorizationOutcome {
        is_authorized: false,
        reason: Some(reason),
        membership,
    }
}
